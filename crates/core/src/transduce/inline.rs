use super::{Flow, Transducer, Wrap, unrecognized};
use crate::dom::{DomNode, Tag};
use crate::escape::{code_span, escape_underscores};
use crate::{Result, ScribeError};

impl Transducer {
    pub(super) fn inline_tag(&self, node: &DomNode, tag: Tag) -> Result<String> {
        match tag {
            Tag::Span => self.container(node, Flow::Inline, Wrap::Bare),
            Tag::Strong => self.container(node, Flow::Inline, Wrap::Surround("**")),
            Tag::Emphasis => self.container(node, Flow::Inline, Wrap::Surround("*")),
            Tag::Link => self.link(node),
            Tag::LineBreak => Ok("\n".to_string()),
            Tag::Image => {
                let src = node.attr("src").ok_or_else(|| ScribeError::missing_attribute(&node.tag, "src"))?;
                Ok(format!("![]({src})"))
            }
            Tag::Code => Ok(code_span(&node.text_content())),
            _ => Err(unrecognized(node)),
        }
    }

    /// `[label](href)`. With element children only the first one forms the label.
    fn link(&self, node: &DomNode) -> Result<String> {
        let href = node.attr("href").ok_or_else(|| ScribeError::missing_attribute(&node.tag, "href"))?;

        let label = match node.children.first() {
            Some(first) => self.inline(first)?,
            None => escape_underscores(&node.text),
        };

        Ok(format!("[{label}]({href})"))
    }
}
