use std::sync::LazyLock;

use regex::Regex;

use super::{Flow, Transducer, Wrap, unrecognized};
use crate::dom::{DomNode, Tag};
use crate::escape::{escape_underscores, fence_for};
use crate::{Result, ScribeError};

static LANGUAGE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)language-(\S+)").expect("language class pattern is valid"));

/// Class marking a `div` as a syntax-highlighted code container.
const HIGHLIGHT_CLASS: &str = "highlight";

impl Transducer {
    pub(super) fn block_tag(&self, node: &DomNode, tag: Tag) -> Result<String> {
        match tag {
            Tag::Paragraph => self.container(node, Flow::Block, Wrap::Bare),
            Tag::Heading(_) => self.heading(node),
            Tag::OrderedList => self.list(node, true),
            Tag::UnorderedList => self.list(node, false),
            Tag::ListItem => self.list_item(node, &self.config.bullet),
            Tag::Blockquote => self.container(node, Flow::Block, Wrap::LinePrefix("> ")),
            Tag::Figure => self.figure(node),
            Tag::Division if node.has_class(HIGHLIGHT_CLASS) => self.code_block(node, tag),
            Tag::Division => Err(ScribeError::shape(&node.tag, "not a `highlight` code container")),
            Tag::Preformatted => self.code_block(node, tag),
            Tag::HorizontalRule => Ok("---".to_string()),
            _ => Err(unrecognized(node)),
        }
    }

    fn heading(&self, node: &DomNode) -> Result<String> {
        if node.children.len() > 1 {
            return Err(ScribeError::shape(
                &node.tag,
                format!("heading wraps {} child elements", node.children.len()),
            ));
        }

        let label = match node.children.first() {
            Some(child) => self.inline(child)?,
            None => escape_underscores(&node.text),
        };
        Ok(format!("{} {}", self.config.heading_marker, label))
    }

    fn list(&self, node: &DomNode, ordered: bool) -> Result<String> {
        let start = node.attr("start").and_then(|s| s.trim().parse::<usize>().ok()).unwrap_or(1);
        let mut out = String::new();

        for (i, item) in node.children.iter().enumerate() {
            if item.kind()? != Tag::ListItem {
                return Err(ScribeError::shape(&node.tag, format!("list contains <{}>", item.tag)));
            }

            let marker = if ordered {
                let number = start
                    .checked_add(i)
                    .ok_or_else(|| ScribeError::shape(&node.tag, format!("item number overflows from start {start}")))?;
                format!("{number}.")
            } else {
                self.config.bullet.clone()
            };
            out.push_str(&self.list_item(item, &marker)?);
            out.push('\n');
        }

        Ok(out)
    }

    /// One marker, then the item's content with continuation lines indented
    /// under the marker.
    fn list_item(&self, node: &DomNode, marker: &str) -> Result<String> {
        let content = self.container(node, Flow::Block, Wrap::Bare)?;
        let indent = " ".repeat(marker.chars().count() + 1);

        let mut out = format!("{marker} ");
        for (i, line) in content.trim_end_matches('\n').split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
                if !line.is_empty() {
                    out.push_str(&indent);
                }
            }
            out.push_str(line);
        }

        Ok(out)
    }

    fn figure(&self, node: &DomNode) -> Result<String> {
        let img = node.find("img").ok_or(ScribeError::NoImageFound)?;

        let url = self
            .config
            .image_source_attributes
            .iter()
            .find_map(|name| img.attr(name))
            .ok_or_else(|| ScribeError::missing_attribute(&img.tag, "src"))?;

        Ok(format!("![]({url})"))
    }

    fn code_block(&self, node: &DomNode, tag: Tag) -> Result<String> {
        let pre = if tag == Tag::Preformatted { Some(node) } else { node.find("pre") };
        let code = pre
            .and_then(|pre| pre.find("code"))
            .ok_or_else(|| ScribeError::shape(&node.tag, "code block without <pre><code>"))?;

        let language = code
            .attr("class")
            .and_then(|class| LANGUAGE_CLASS.captures(class))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or(ScribeError::MissingLanguageClass)?;

        let content = code.text_content();
        let content = content.strip_suffix('\n').unwrap_or(&content);
        let fence = fence_for(content);

        Ok(format!("{fence}{language}\n{content}\n{fence}"))
    }
}
