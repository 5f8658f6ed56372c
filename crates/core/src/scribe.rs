//! Main conversion API.
//!
//! This module wires the pieces together: parse the page, locate the
//! article body, read its metadata, and assemble the Markdown document.
//! The main entry point is the [`Scribe`] struct, along with convenience
//! functions like [`parse`], [`parse_fragment`] and [`fetch_and_parse`].
//!
//! # Example
//!
//! ```rust
//! use mdscribe_core::parse_fragment;
//!
//! let doc = parse_fragment("<h2>Intro</h2><p>Hello <b>world</b>!</p>").unwrap();
//! assert_eq!(doc.to_markdown(), "#### Intro\n\nHello **world**!");
//! ```

use crate::Result;
use crate::document::Document;
use crate::dom::DomNode;
#[cfg(feature = "fetch")]
use crate::fetch::fetch_url;
use crate::fetch::{FetchConfig, parse_url};
use crate::locate::{SiteLayout, locate_content};
use crate::metadata::{Metadata, extract_metadata};
use crate::parse::{Element, Page};
use crate::transduce::{TransduceConfig, Transducer};

/// Configuration for a [`Scribe`].
///
/// # Example
///
/// ```rust
/// use mdscribe_core::ScribeConfig;
///
/// let config = ScribeConfig::builder()
///     .heading_marker("##")
///     .timeout(10)
///     .cookie("z_c0=token")
///     .build();
/// assert_eq!(config.transduce.heading_marker, "##");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScribeConfig {
    /// Where the article lives on the page.
    pub layout: SiteLayout,

    /// Markdown syntax choices.
    pub transduce: TransduceConfig,

    /// HTTP settings for [`Scribe::fetch_and_parse`].
    pub fetch: FetchConfig,
}

impl ScribeConfig {
    /// Creates a new builder for ScribeConfig.
    pub fn builder() -> ScribeConfigBuilder {
        ScribeConfigBuilder::new()
    }
}

/// Builder for ScribeConfig.
pub struct ScribeConfigBuilder {
    config: ScribeConfig,
}

impl ScribeConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ScribeConfig::default() }
    }

    /// Replaces the page layout.
    pub fn layout(mut self, layout: SiteLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Sets the heading marker.
    pub fn heading_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.transduce.heading_marker = marker.into();
        self
    }

    /// Sets the unordered list bullet.
    pub fn bullet(mut self, bullet: impl Into<String>) -> Self {
        self.config.transduce.bullet = bullet.into();
        self
    }

    /// Sets the figure image attribute preference order.
    pub fn image_source_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.transduce.image_source_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.fetch.user_agent = ua.into();
        self
    }

    /// Sets the `Cookie` header sent when fetching.
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.config.fetch.cookie = Some(cookie.into());
        self
    }

    /// Builds the config.
    pub fn build(self) -> ScribeConfig {
        self.config
    }
}

impl Default for ScribeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Page-to-Markdown converter.
///
/// # Example
///
/// ```rust
/// use mdscribe_core::Scribe;
///
/// let html = r#"
///     <main class="App-main">
///       <div class="Post-content" data-zop='{"title":"Hi","authorName":"Me"}'>
///         <div class="RichText Post-RichText"><p>snake_case</p></div>
///       </div>
///     </main>"#;
///
/// let doc = Scribe::new().parse(html).unwrap();
/// assert_eq!(doc.metadata.title, "Hi");
/// assert_eq!(doc.body(), "snake\\_case");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scribe {
    config: ScribeConfig,
    transducer: Transducer,
}

impl Scribe {
    /// Creates a new Scribe with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new Scribe with a custom configuration.
    pub fn with_config(config: ScribeConfig) -> Self {
        let transducer = Transducer::new(config.transduce.clone());
        Self { config, transducer }
    }

    pub fn config(&self) -> &ScribeConfig {
        &self.config
    }

    /// Converts a full article page.
    ///
    /// # Errors
    ///
    /// Fails if the layout regions or metadata are missing, or if any block
    /// cannot be transduced.
    pub fn parse(&self, html: &str) -> Result<Document> {
        let page = Page::parse(html);
        self.convert_page(&page)
    }

    /// Converts a full article page and records its source URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScribeError::InvalidUrl`] if the URL is invalid, or
    /// any error from [`Scribe::parse`].
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document> {
        let url = parse_url(url)?;
        Ok(self.parse(html)?.with_source_url(url.as_str()))
    }

    /// Converts a bare HTML fragment whose top-level elements are the blocks.
    ///
    /// No layout lookup happens and the metadata is left empty.
    pub fn parse_fragment(&self, html: &str) -> Result<Document> {
        let page = Page::parse_fragment(html);
        let blocks = top_level_blocks(&page.root());
        Document::assemble(Metadata::default(), &blocks, &self.transducer)
    }

    /// Fetches a page with the configured HTTP settings and converts it.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_parse(&self, url: &str) -> Result<Document> {
        let html = fetch_url(url, &self.config.fetch).await?;
        self.parse_with_url(&html, url)
    }

    fn convert_page(&self, page: &Page) -> Result<Document> {
        let _span = tracing::info_span!("convert_page").entered();

        let located = locate_content(page, &self.config.layout)?;
        let metadata = extract_metadata(&located.post, &self.config.layout)?;
        tracing::debug!(title = %metadata.title, author = %metadata.author, "read metadata");

        let blocks = top_level_blocks(&located.body);
        Document::assemble(metadata, &blocks, &self.transducer)
    }
}

/// Child elements of the body, as owned trees.
fn top_level_blocks(body: &Element<'_>) -> Vec<DomNode> {
    let loose = body.own_text();
    if !loose.trim().is_empty() {
        tracing::warn!(text = %loose.trim(), "skipping text outside any block");
    }

    body.child_elements().map(|el| el.to_dom()).collect()
}

/// Convert a full article page with defaults.
pub fn parse(html: &str) -> Result<Document> {
    Scribe::new().parse(html)
}

/// Convert a bare HTML fragment with defaults.
pub fn parse_fragment(html: &str) -> Result<Document> {
    Scribe::new().parse_fragment(html)
}

/// Fetch and convert a page with defaults.
#[cfg(feature = "fetch")]
pub async fn fetch_and_parse(url: &str) -> Result<Document> {
    Scribe::new().fetch_and_parse(url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScribeError;

    const ARTICLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><title>ignored</title></head>
        <body>
          <main role="main" class="App-main">
            <div class="Post-content" data-zop='{"authorName":"Lin","itemId":42,"title":"Rust_notes","type":"article"}'>
              <img class="TitleImage" src="https://pic.example/title.jpg">
              <div class="RichText ztext Post-RichText">
                <p>Intro with <a href="https://rust-lang.org">Rust</a>.</p>
                <h2>Setup</h2>
                <ul><li>cargo</li><li>rustup</li></ul>
              </div>
            </div>
          </main>
        </body>
        </html>
    "#;

    #[test]
    fn test_scribe_config_default() {
        let config = ScribeConfig::default();
        assert_eq!(config.transduce.heading_marker, "####");
        assert_eq!(config.transduce.bullet, "*");
        assert_eq!(config.fetch.timeout, 30);
        assert_eq!(config.layout.metadata_attribute, "data-zop");
    }

    #[test]
    fn test_scribe_config_builder() {
        let config = ScribeConfig::builder()
            .bullet("-")
            .image_source_attributes(["src"])
            .user_agent("test-agent")
            .cookie("a=b")
            .timeout(5)
            .build();

        assert_eq!(config.transduce.bullet, "-");
        assert_eq!(config.transduce.image_source_attributes, ["src"]);
        assert_eq!(config.fetch.user_agent, "test-agent");
        assert_eq!(config.fetch.cookie.as_deref(), Some("a=b"));
        assert_eq!(config.fetch.timeout, 5);
    }

    #[test]
    fn test_parse_article() {
        let doc = Scribe::new().parse(ARTICLE_HTML).unwrap();

        assert_eq!(doc.metadata.title, "Rust_notes");
        assert_eq!(doc.metadata.author, "Lin");
        assert_eq!(doc.metadata.title_image.as_deref(), Some("https://pic.example/title.jpg"));
        assert_eq!(
            doc.body(),
            "Intro with [Rust](https://rust-lang.org).\n\n#### Setup\n\n* cargo\n* rustup\n"
        );
    }

    #[test]
    fn test_parse_with_url() {
        let doc = Scribe::new().parse_with_url(ARTICLE_HTML, "https://example.com/p/42").unwrap();
        assert_eq!(doc.source_url.as_deref(), Some("https://example.com/p/42"));

        let err = Scribe::new().parse_with_url(ARTICLE_HTML, "nope").unwrap_err();
        assert!(matches!(err, ScribeError::InvalidUrl(_)));
    }

    #[test]
    fn test_custom_config_flows_through() {
        let scribe = Scribe::with_config(ScribeConfig::builder().heading_marker("##").bullet("-").build());
        let doc = scribe.parse(ARTICLE_HTML).unwrap();
        assert!(doc.body().contains("## Setup\n\n- cargo\n- rustup\n"));
    }

    #[test]
    fn test_parse_page_without_layout() {
        let err = parse("<html><body><p>x</p></body></html>").unwrap_err();
        assert!(matches!(err, ScribeError::ContentNotFound { .. }));
    }

    #[test]
    fn test_parse_fragment_ignores_whitespace_between_blocks() {
        let doc = parse_fragment("<p>a</p>\n  <p>b</p>\n").unwrap();
        assert_eq!(doc.blocks, ["a", "b"]);
        assert_eq!(doc.metadata, Metadata::default());
    }

    #[test]
    fn test_parse_fragment_unknown_tag() {
        let err = parse_fragment("<p>ok</p><table><tr><td>x</td></tr></table>").unwrap_err();
        assert!(matches!(err, ScribeError::UnrecognizedTag(ref t) if t == "table"));
    }

    #[test]
    fn test_parse_fragment_code_block_inside_list_item() {
        let doc = parse_fragment(r#"<ul><li>see<pre><code class="language-py">x = 1</code></pre>then run it</li></ul>"#)
            .unwrap();
        assert_eq!(doc.body(), "* see\n  ```py\n  x = 1\n  ```\n  then run it\n");
    }

    #[test]
    fn test_parse_fragment_quote_keeps_paragraphs() {
        let doc = parse_fragment("<blockquote><p>first para</p><p>second para</p></blockquote>").unwrap();
        assert_eq!(doc.body(), "> first para\n> \n> second para");
    }

    #[test]
    fn test_parse_fragment_huge_list_start() {
        let err = parse_fragment(r#"<ol start="18446744073709551615"><li>a</li><li>b</li></ol>"#).unwrap_err();
        assert!(matches!(err, ScribeError::UnrecognizedShape { ref tag, .. } if tag == "ol"));
    }

    #[test]
    fn test_parse_fragment_empty_bold() {
        let doc = parse_fragment("<p><b></b></p><p>after</p>").unwrap();
        assert_eq!(doc.blocks, ["", "after"]);
    }
}
