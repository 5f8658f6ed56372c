//! Owned element tree with text/tail semantics.
//!
//! scraper stores character data as sibling text nodes. The converter instead
//! walks a tree where each element carries the text before its first child
//! (`text`) and the text following its own end tag (`tail`). A parent renders
//! `text, child, child.tail, child, child.tail, ...`, which reproduces the
//! exact interleaving of the source's inline stream.

use std::collections::HashMap;

use scraper::{ElementRef, Node};

use crate::{Result, ScribeError};

/// The closed tag vocabulary understood by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Paragraph,
    Heading(u8),
    OrderedList,
    UnorderedList,
    ListItem,
    Blockquote,
    Figure,
    /// `div`; only valid as a `highlight` code container.
    Division,
    Preformatted,
    HorizontalRule,
    Span,
    Strong,
    Emphasis,
    Link,
    LineBreak,
    Image,
    Code,
}

impl Tag {
    /// Map a lowercase tag name onto the vocabulary.
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "p" => Self::Paragraph,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "ol" => Self::OrderedList,
            "ul" => Self::UnorderedList,
            "li" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            "figure" => Self::Figure,
            "div" => Self::Division,
            "pre" => Self::Preformatted,
            "hr" => Self::HorizontalRule,
            "span" => Self::Span,
            "strong" | "b" => Self::Strong,
            "em" | "i" => Self::Emphasis,
            "a" => Self::Link,
            "br" => Self::LineBreak,
            "img" => Self::Image,
            "code" => Self::Code,
            _ => return None,
        };
        Some(tag)
    }

    /// Whether the tag may appear inside an inline container.
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Self::Span | Self::Strong | Self::Emphasis | Self::Link | Self::LineBreak | Self::Image | Self::Code
        )
    }
}

/// A read-only element with its own text, its tail, and its child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomNode {
    /// Lowercase tag name
    pub tag: String,
    /// Character data before the first child element
    pub text: String,
    /// Character data after this element's end tag, owned by the parent's stream
    pub tail: String,
    /// Child elements in document order
    pub children: Vec<DomNode>,
    /// Attribute map
    pub attributes: HashMap<String, String>,
}

impl DomNode {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Default::default() }
    }

    /// Set the leading text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the tail text.
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Build the tree rooted at a scraper element.
    ///
    /// Comments and other non-element nodes are skipped. Text on either side
    /// of a skipped node lands in the same `text`/`tail` slot.
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let value = element.value();
        let mut node = DomNode {
            tag: value.name().to_ascii_lowercase(),
            attributes: value.attrs().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            ..Default::default()
        };

        for child in element.children() {
            match child.value() {
                Node::Text(text) => match node.children.last_mut() {
                    Some(last) => last.tail.push_str(text),
                    None => node.text.push_str(text),
                },
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        node.children.push(DomNode::from_element(el));
                    }
                }
                _ => {}
            }
        }

        node
    }

    /// Resolve this node's tag against the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::UnrecognizedTag`] for anything outside it.
    pub fn kind(&self) -> Result<Tag> {
        Tag::from_name(&self.tag).ok_or_else(|| ScribeError::UnrecognizedTag(self.tag.clone()))
    }

    /// Look up an optional attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the space-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class").is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// All character data in this subtree, excluding this node's own tail.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
            out.push_str(&child.tail);
        }
        out
    }

    /// Depth-first pre-order iterator over descendants (not including `self`).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: self.children.iter().rev().collect() }
    }

    /// First descendant with the given tag name.
    pub fn find(&self, tag: &str) -> Option<&DomNode> {
        self.descendants().find(|n| n.tag == tag)
    }
}

/// Iterator returned by [`DomNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a DomNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a DomNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
