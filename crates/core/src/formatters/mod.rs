pub mod markdown;

pub use markdown::{LinkReference, MarkdownConfig, convert_to_markdown};
