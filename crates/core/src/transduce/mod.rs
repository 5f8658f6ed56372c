//! Element-to-Markdown transducer.
//!
//! [`Transducer`] turns a [`DomNode`] into a Markdown fragment by dispatching
//! on the node's [`Tag`]. Block tags are handled in [`block`], inline tags in
//! [`inline`]. Container tags (paragraph, blockquote, list item, span,
//! strong, emphasis) share one concatenation routine parameterized by a
//! [`Wrap`] and the [`Flow`] its children are dispatched in.
//!
//! The vocabulary is closed: any tag outside it, at any depth, aborts the
//! conversion with [`ScribeError::UnrecognizedTag`].
//!
//! # Example
//!
//! ```rust
//! use mdscribe_core::{DomNode, Transducer};
//!
//! let p = DomNode::new("p")
//!     .with_text("Hello ")
//!     .with_child(DomNode::new("b").with_text("world").with_tail("!"));
//!
//! let md = Transducer::default().block(&p).unwrap();
//! assert_eq!(md, "Hello **world**!");
//! ```

mod block;
mod inline;

use crate::dom::{DomNode, Tag};
use crate::escape::escape_underscores;
use crate::{Result, ScribeError};

/// Configuration for Markdown transduction.
#[derive(Debug, Clone)]
pub struct TransduceConfig {
    /// Marker emitted before heading labels (default: `####`)
    pub heading_marker: String,
    /// Marker for unordered list items (default: `*`)
    pub bullet: String,
    /// Figure image attributes, most preferred first
    pub image_source_attributes: Vec<String>,
}

impl Default for TransduceConfig {
    fn default() -> Self {
        Self {
            heading_marker: "####".to_string(),
            bullet: "*".to_string(),
            image_source_attributes: vec!["data-original".to_string(), "data-actualsrc".to_string(), "src".to_string()],
        }
    }
}

/// How a container's children are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Only inline tags are allowed.
    Inline,
    /// Block and inline tags are both allowed.
    Block,
}

/// Syntax wrapped around a container's concatenated stream.
#[derive(Debug, Clone, Copy)]
enum Wrap<'w> {
    Bare,
    Surround(&'w str),
    LinePrefix(&'w str),
}

impl Wrap<'_> {
    fn apply(self, inner: String) -> String {
        match self {
            Wrap::Bare => inner,
            Wrap::Surround(_) if inner.is_empty() => inner,
            Wrap::Surround(delim) => format!("{delim}{inner}{delim}"),
            Wrap::LinePrefix(prefix) => {
                let mut out = String::with_capacity(inner.len() + prefix.len());
                for (i, line) in inner.split('\n').enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    out.push_str(prefix);
                    out.push_str(line);
                }
                out
            }
        }
    }
}

/// Recursive converter from element nodes to Markdown fragments.
///
/// A transducer holds only configuration, so one instance can convert any
/// number of trees, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct Transducer {
    config: TransduceConfig,
}

impl Transducer {
    pub fn new(config: TransduceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransduceConfig {
        &self.config
    }

    /// Convert a node in block position.
    ///
    /// # Errors
    ///
    /// Fails with [`ScribeError::UnrecognizedTag`] if the node is not a
    /// block tag, or with whatever error its subtree raises.
    pub fn block(&self, node: &DomNode) -> Result<String> {
        let tag = node.kind()?;
        tracing::debug!(tag = %node.tag, "transducing block");
        self.block_tag(node, tag)
    }

    /// Convert a node in inline position.
    ///
    /// # Errors
    ///
    /// Fails with [`ScribeError::UnrecognizedTag`] if the node is not an
    /// inline tag, or with whatever error its subtree raises.
    pub fn inline(&self, node: &DomNode) -> Result<String> {
        let tag = node.kind()?;
        self.inline_tag(node, tag)
    }

    /// Shared container rule: own text, then each child followed by its tail.
    ///
    /// In block flow a block child starts on its own line, consecutive block
    /// children are separated by a blank line, and text following a block
    /// resumes on a new line. Whitespace between blocks is dropped.
    fn container(&self, node: &DomNode, flow: Flow, wrap: Wrap<'_>) -> Result<String> {
        let mut out = escape_underscores(&node.text);
        let mut after_block = false;

        for child in &node.children {
            let tag = child.kind()?;

            if flow == Flow::Block && !tag.is_inline() {
                let fragment = self.block_tag(child, tag)?;
                if after_block {
                    out.truncate(out.trim_end().len());
                    out.push_str("\n\n");
                } else if out.trim().is_empty() {
                    out.clear();
                } else if !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(&fragment);
                after_block = true;
            } else {
                let fragment = self.inline_tag(child, tag)?;
                push_run(&mut out, &fragment, &mut after_block);
            }

            push_run(&mut out, &escape_underscores(&child.tail), &mut after_block);
        }

        Ok(wrap.apply(out))
    }
}

/// Append inline output, moving it onto a fresh line when it follows a block.
fn push_run(out: &mut String, run: &str, after_block: &mut bool) {
    if !*after_block {
        out.push_str(run);
        return;
    }
    let run = run.trim_start();
    if run.is_empty() {
        return;
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(run);
    *after_block = false;
}

fn unrecognized(node: &DomNode) -> ScribeError {
    ScribeError::UnrecognizedTag(node.tag.clone())
}
