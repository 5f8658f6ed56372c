pub mod document;
pub mod dom;
pub mod error;
pub mod escape;
pub mod fetch;
pub mod formatters;
pub mod locate;
pub mod metadata;
pub mod parse;
pub mod scribe;
pub mod transduce;

pub use document::{BLOCK_SEPARATOR, Document};
pub use dom::{DomNode, Tag};
pub use error::{Result, ScribeError};
pub use escape::escape_underscores;
pub use fetch::{FetchConfig, fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use formatters::{LinkReference, MarkdownConfig, convert_to_markdown};
pub use locate::{Located, SiteLayout, locate_content};
pub use metadata::{Metadata, extract_metadata};
pub use parse::{Element, Page};
#[cfg(feature = "fetch")]
pub use scribe::fetch_and_parse;
pub use scribe::{Scribe, ScribeConfig, ScribeConfigBuilder, parse, parse_fragment};
pub use transduce::{TransduceConfig, Transducer};
