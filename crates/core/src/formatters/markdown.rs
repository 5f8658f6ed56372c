use std::collections::HashSet;

use serde::Serialize;

use crate::document::Document;
use crate::dom::DomNode;

/// Configuration for Markdown rendering
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Include TOML frontmatter with metadata
    pub include_frontmatter: bool,
    /// Include title heading, cover image and byline before the body
    pub include_title_heading: bool,
    /// Generate reference table for all links
    pub include_references: bool,
}

/// A collected link reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    /// The link text
    pub text: String,
    /// The link URL
    pub url: String,
}

/// Render a document to Markdown.
///
/// With the default configuration this is exactly [`Document::body`].
pub fn convert_to_markdown(document: &Document, config: &MarkdownConfig) -> String {
    let mut output = String::new();

    if config.include_frontmatter {
        output.push_str(&generate_frontmatter(document));
        output.push('\n');
    }

    if config.include_title_heading {
        output.push_str(&generate_title_block(document));
    }

    output.push_str(&document.body());

    if config.include_references && !document.links.is_empty() {
        output.push_str("\n\n## References\n\n");
        output.push_str(&generate_reference_table(&document.links));
    }

    output
}

/// Generate TOML frontmatter from metadata
fn generate_frontmatter(document: &Document) -> String {
    let metadata = &document.metadata;
    let mut frontmatter = String::from("+++");

    frontmatter.push_str(&format!("\ntitle = {}", toml_escape_string(&metadata.title)));
    frontmatter.push_str(&format!("\nauthor = {}", toml_escape_string(&metadata.author)));

    if let Some(cover) = &metadata.title_image {
        frontmatter.push_str(&format!("\ncover = {}", toml_escape_string(cover)));
    }

    if let Some(source) = &document.source_url {
        frontmatter.push_str(&format!("\nsource = {}", toml_escape_string(source)));
    }

    frontmatter.push_str("\n+++\n");

    frontmatter
}

/// `# title`, cover image and byline, each followed by a blank line.
fn generate_title_block(document: &Document) -> String {
    let metadata = &document.metadata;
    let mut block = String::new();

    if !metadata.title.is_empty() {
        block.push_str(&format!("# {}\n\n", metadata.title));
    }

    if let Some(cover) = &metadata.title_image {
        block.push_str(&format!("![]({})\n\n", cover));
    }

    if !metadata.author.is_empty() {
        block.push_str(&format!("*{}*\n\n", metadata.author));
    }

    block
}

/// Escape a string for TOML format
fn toml_escape_string(s: &str) -> String {
    format!(
        "\"{}\"",
        s.replace('\\', "\\\\").replace('\"', "\\\"").replace('\n', "\\n")
    )
}

/// Collect distinct `a[href]` targets from a list of block trees
pub fn collect_links(nodes: &[DomNode]) -> Vec<LinkReference> {
    let mut links = Vec::new();
    let mut seen_urls = HashSet::new();

    for element in nodes.iter().flat_map(|n| std::iter::once(n).chain(n.descendants())) {
        if element.tag != "a" {
            continue;
        }

        let url = match element.attr("href") {
            Some(u) => u.to_string(),
            None => continue,
        };
        let text = element.text_content().split_whitespace().collect::<Vec<_>>().join(" ");

        if text.is_empty() || url.is_empty() {
            continue;
        }

        if seen_urls.insert(url.clone()) {
            links.push(LinkReference { text, url });
        }
    }

    links
}

/// Generate a reference table from collected links
fn generate_reference_table(links: &[LinkReference]) -> String {
    let mut table = String::from("| # | Text | URL |\n");
    table.push_str("|---|------|-----|\n");

    for (i, link) in links.iter().enumerate() {
        let escaped_text = escape_pipe(&link.text);
        let escaped_url = escape_pipe(&link.url);
        table.push_str(&format!("| {} | {} | {} |\n", i + 1, escaped_text, escaped_url));
    }

    table
}

/// Escape pipe characters for Markdown tables
fn escape_pipe(s: &str) -> String {
    s.replace('|', "\\|")
}
