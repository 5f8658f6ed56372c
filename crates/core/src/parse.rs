//! HTML parsing and element selection.
//!
//! This module provides the [`Page`] and [`Element`] types, thin wrappers
//! around scraper used to locate the article body and read metadata before
//! the body is converted into a [`DomNode`] tree.
//!
//! # Example
//!
//! ```rust
//! use mdscribe_core::Page;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let page = Page::parse(html);
//! let paragraph = page.select_first("p.content").unwrap().unwrap();
//! assert_eq!(paragraph.text(), "Paragraph");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::dom::DomNode;
use crate::{Result, ScribeError};

fn selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScribeError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A parsed HTML page or fragment.
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses a complete HTML document.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parses an HTML fragment.
    ///
    /// The fragment's top-level nodes become children of the root element.
    pub fn parse_fragment(html: &str) -> Self {
        Self { html: Html::parse_fragment(html) }
    }

    /// The root element (`<html>`).
    pub fn root(&self) -> Element<'_> {
        Element { element: self.html.root_element() }
    }

    /// First element matching a CSS selector.
    pub fn select_first(&'_ self, selector_str: &str) -> Result<Option<Element<'_>>> {
        let sel = selector(selector_str)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenated text of this element's subtree.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.element.children().filter_map(ElementRef::wrap).map(|element| Element { element })
    }

    /// Character data directly inside this element, outside any child element.
    pub fn own_text(&self) -> String {
        self.element
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|text| &**text)
            .collect()
    }

    /// First descendant matching a CSS selector.
    pub fn select_first(&self, selector_str: &str) -> Result<Option<Element<'a>>> {
        let sel = selector(selector_str)?;
        Ok(self.element.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Converts this element's subtree into an owned [`DomNode`] tree.
    pub fn to_dom(&self) -> DomNode {
        DomNode::from_element(self.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
        </head>
        <body>
            <div class="wrap">loose <p class="content">Paragraph 1</p> text <p class="content">Paragraph 2</p></div>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_first() {
        let page = Page::parse(SAMPLE_HTML);
        let first = page.select_first("p.content").unwrap().unwrap();
        assert_eq!(first.text(), "Paragraph 1");
        assert!(page.select_first("table").unwrap().is_none());
    }

    #[test]
    fn test_element_attributes() {
        let page = Page::parse(SAMPLE_HTML);
        let link = page.select_first("a").unwrap().unwrap();

        assert_eq!(link.attr("href"), Some("https://example.com"));
        assert_eq!(link.tag_name(), "a");
    }

    #[test]
    fn test_invalid_selector() {
        let page = Page::parse(SAMPLE_HTML);
        assert!(matches!(page.select_first("[[invalid"), Err(ScribeError::HtmlParseError(_))));
    }

    #[test]
    fn test_children_and_own_text() {
        let page = Page::parse(SAMPLE_HTML);
        let wrap = page.select_first("div.wrap").unwrap().unwrap();

        let tags: Vec<_> = wrap.child_elements().map(|e| e.tag_name()).collect();
        assert_eq!(tags, ["p", "p"]);
        assert_eq!(wrap.own_text(), "loose  text ");
    }

    #[test]
    fn test_fragment_root_children() {
        let page = Page::parse_fragment("<p>a</p><hr><p>b</p>");
        let tags: Vec<_> = page.root().child_elements().map(|e| e.tag_name()).collect();
        assert_eq!(tags, ["p", "hr", "p"]);
    }

    #[test]
    fn test_to_dom() {
        let page = Page::parse_fragment("<p>x <i>y</i> z</p>");
        let node = page.select_first("p").unwrap().unwrap().to_dom();
        assert_eq!(node.text, "x ");
        assert_eq!(node.children[0].tail, " z");
    }
}
