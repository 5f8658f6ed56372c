//! Document assembly.
//!
//! This module defines [`Document`], the converted article: its metadata
//! and the Markdown fragment of every top-level block, in source order.

use serde::Serialize;

use crate::dom::DomNode;
use crate::formatters::markdown::{LinkReference, MarkdownConfig, collect_links, convert_to_markdown};
use crate::metadata::Metadata;
use crate::transduce::Transducer;
use crate::{Result, ScribeError};

/// Separator placed between top-level blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// A fully converted article.
///
/// Built once by [`Document::assemble`] and only rendered afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Title, author and cover image.
    pub metadata: Metadata,

    /// Source URL if known.
    pub source_url: Option<String>,

    /// One Markdown fragment per top-level block.
    pub blocks: Vec<String>,

    /// Distinct link targets in body order.
    pub links: Vec<LinkReference>,
}

impl Document {
    /// Transduce every top-level node as a block.
    ///
    /// # Errors
    ///
    /// The first failing block aborts assembly; no partial document is returned.
    pub fn assemble(metadata: Metadata, nodes: &[DomNode], transducer: &Transducer) -> Result<Self> {
        let _span = tracing::debug_span!("assemble", blocks = nodes.len()).entered();

        let blocks = nodes.iter().map(|node| transducer.block(node)).collect::<Result<Vec<_>>>()?;
        let links = collect_links(nodes);

        Ok(Self { metadata, source_url: None, blocks, links })
    }

    /// Records where the document came from.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// The Markdown body: all blocks joined by [`BLOCK_SEPARATOR`].
    pub fn body(&self) -> String {
        self.blocks.join(BLOCK_SEPARATOR)
    }

    /// Gets the body as Markdown (no frontmatter, no title).
    pub fn to_markdown(&self) -> String {
        self.to_markdown_with_config(&MarkdownConfig::default())
    }

    /// Gets the document as Markdown with custom configuration.
    pub fn to_markdown_with_config(&self, config: &MarkdownConfig) -> String {
        convert_to_markdown(self, config)
    }

    /// Gets the document as structured JSON, including the rendered body.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(self).map_err(|e| ScribeError::SerializeError(e.to_string()))?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("body".to_string(), serde_json::Value::String(self.body()));
        }
        Ok(value)
    }
}
