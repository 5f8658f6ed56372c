//! Locating the article body inside a full page.
//!
//! A [`SiteLayout`] names the nested regions that lead from the page to the
//! rich-text body: the main region, the post container inside it, and the
//! body inside the post. The defaults match the column-article layout the
//! converter was built for.

use crate::parse::{Element, Page};
use crate::{Result, ScribeError};

/// Selectors and attribute names describing where content lives on a page.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    /// Main page region
    pub main_selector: String,
    /// Post container, searched inside the main region
    pub post_selector: String,
    /// Rich-text body, searched inside the post container
    pub body_selector: String,
    /// Attribute on the post container holding the JSON metadata payload
    pub metadata_attribute: String,
    /// Cover image, searched inside the post container
    pub title_image_selector: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            main_selector: "main.App-main".to_string(),
            post_selector: "div.Post-content".to_string(),
            body_selector: "div.RichText.Post-RichText".to_string(),
            metadata_attribute: "data-zop".to_string(),
            title_image_selector: r#"img[class*="TitleImage"]"#.to_string(),
        }
    }
}

/// The regions found by [`locate_content`].
#[derive(Debug, Clone)]
pub struct Located<'a> {
    /// Post container, which carries the metadata
    pub post: Element<'a>,
    /// Rich-text body whose child elements are the top-level blocks
    pub body: Element<'a>,
}

fn first_in<'a>(scope: &Element<'a>, selector: &str) -> Result<Element<'a>> {
    scope
        .select_first(selector)?
        .ok_or_else(|| ScribeError::ContentNotFound { selector: selector.to_string() })
}

/// Walk main region → post container → body, taking the first match at
/// each step.
///
/// # Errors
///
/// Returns [`ScribeError::ContentNotFound`] naming the first selector that
/// matched nothing.
pub fn locate_content<'a>(page: &'a Page, layout: &SiteLayout) -> Result<Located<'a>> {
    let main = page
        .select_first(&layout.main_selector)?
        .ok_or_else(|| ScribeError::ContentNotFound { selector: layout.main_selector.clone() })?;
    let post = first_in(&main, &layout.post_selector)?;
    let body = first_in(&post, &layout.body_selector)?;

    tracing::debug!(blocks = body.child_elements().count(), "located article body");

    Ok(Located { post, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <div class="RichText Post-RichText"><p>decoy</p></div>
            <main role="main" class="App-main">
                <div class="Post-content" data-zop="{}">
                    <div class="RichText ztext Post-RichText"><p>one</p><p>two</p></div>
                </div>
            </main>
        </body></html>
    "#;

    #[test]
    fn test_locates_nested_body() {
        let page = Page::parse(PAGE);
        let located = locate_content(&page, &SiteLayout::default()).unwrap();

        assert_eq!(located.post.attr("data-zop"), Some("{}"));
        let texts: Vec<_> = located.body.child_elements().map(|e| e.text()).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn test_missing_main_region() {
        let page = Page::parse("<html><body><p>nothing</p></body></html>");
        let err = locate_content(&page, &SiteLayout::default()).unwrap_err();
        assert!(matches!(err, ScribeError::ContentNotFound { ref selector } if selector == "main.App-main"));
    }

    #[test]
    fn test_missing_body() {
        let page = Page::parse(r#"<main class="App-main"><div class="Post-content"></div></main>"#);
        let err = locate_content(&page, &SiteLayout::default()).unwrap_err();
        assert!(matches!(err, ScribeError::ContentNotFound { ref selector } if selector.contains("Post-RichText")));
    }

    #[test]
    fn test_custom_layout() {
        let layout = SiteLayout {
            main_selector: "article".to_string(),
            post_selector: "section".to_string(),
            body_selector: ".body".to_string(),
            ..Default::default()
        };
        let page = Page::parse(r#"<article><section><div class="body"><hr></div></section></article>"#);
        let located = locate_content(&page, &layout).unwrap();
        assert_eq!(located.body.child_elements().count(), 1);
    }
}
