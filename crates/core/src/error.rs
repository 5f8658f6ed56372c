//! Error types for mdscribe operations.
//!
//! This module defines the main error type [`ScribeError`] which represents
//! everything that can go wrong while fetching a page, locating its article
//! body, and transducing that body into Markdown.
//!
//! Every transduction failure is fatal for the whole document: there is no
//! partial output mode.
//!
//! # Example
//!
//! ```rust
//! use mdscribe_core::{ScribeError, parse_fragment};
//!
//! match parse_fragment("<marquee>hi</marquee>") {
//!     Err(ScribeError::UnrecognizedTag(tag)) => assert_eq!(tag, "marquee"),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mdscribe operations.
#[derive(Error, Debug)]
pub enum ScribeError {
    /// An element whose tag has no dispatch rule was found in the tree.
    #[error("Unrecognized tag <{0}>")]
    UnrecognizedTag(String),

    /// A known tag appeared in a form the converter has no rule for.
    ///
    /// Examples are a heading wrapping several elements, or a list with a
    /// non-item child.
    #[error("Unrecognized shape for <{tag}>: {reason}")]
    UnrecognizedShape { tag: String, reason: String },

    /// A figure had no image descendant.
    #[error("Figure contains no image")]
    NoImageFound,

    /// A code block's `<code>` element has no `language-*` class.
    #[error("Code block is missing a `language-*` class")]
    MissingLanguageClass,

    /// A required attribute was absent.
    #[error("Missing attribute `{name}` on <{tag}>")]
    MissingAttribute { tag: String, name: String },

    /// The page layout did not contain the expected content region.
    #[error("Content not found (no element matches `{selector}`)")]
    ContentNotFound { selector: String },

    /// The embedded metadata payload was not valid JSON.
    #[error("Invalid article metadata: {0}")]
    InvalidMetadata(#[source] serde_json::Error),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues
    /// and non-success status codes.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// Output serialization failed.
    #[error("Failed to serialize document: {0}")]
    SerializeError(String),
}

impl ScribeError {
    pub(crate) fn missing_attribute(tag: &str, name: &str) -> Self {
        Self::MissingAttribute { tag: tag.to_string(), name: name.to_string() }
    }

    pub(crate) fn shape(tag: &str, reason: impl Into<String>) -> Self {
        Self::UnrecognizedShape { tag: tag.to_string(), reason: reason.into() }
    }
}

/// Result type alias for ScribeError.
pub type Result<T> = std::result::Result<T, ScribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_tag_names_the_tag() {
        let err = ScribeError::UnrecognizedTag("table".to_string());
        assert_eq!(err.to_string(), "Unrecognized tag <table>");
    }

    #[test]
    fn test_missing_attribute_display() {
        let err = ScribeError::missing_attribute("a", "href");
        assert!(err.to_string().contains("`href`"));
        assert!(err.to_string().contains("<a>"));
    }

    #[test]
    fn test_shape_error_display() {
        let err = ScribeError::shape("h2", "2 child elements");
        assert_eq!(err.to_string(), "Unrecognized shape for <h2>: 2 child elements");
    }

    #[test]
    fn test_timeout_error() {
        let err = ScribeError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }
}
