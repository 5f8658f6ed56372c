use serde::{Deserialize, Serialize};

use crate::locate::SiteLayout;
use crate::parse::Element;
use crate::{Result, ScribeError};

/// Document-level metadata, copied verbatim into the output header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub title_image: Option<String>,
}

/// The JSON payload embedded in the post container's metadata attribute.
#[derive(Debug, Deserialize)]
struct EmbeddedMetadata {
    title: String,
    #[serde(rename = "authorName")]
    author_name: String,
}

/// Extract title and author from the post's embedded JSON attribute, and
/// the cover image from the first matching image inside the post.
///
/// # Errors
///
/// - [`ScribeError::MissingAttribute`] when the post has no metadata attribute
/// - [`ScribeError::InvalidMetadata`] when the payload is not valid JSON or lacks a field
pub fn extract_metadata(post: &Element<'_>, layout: &SiteLayout) -> Result<Metadata> {
    let payload = post
        .attr(&layout.metadata_attribute)
        .ok_or_else(|| ScribeError::missing_attribute(&post.tag_name(), &layout.metadata_attribute))?;

    let embedded: EmbeddedMetadata = serde_json::from_str(payload).map_err(ScribeError::InvalidMetadata)?;

    let title_image = post
        .select_first(&layout.title_image_selector)?
        .and_then(|img| img.attr("src"))
        .map(str::to_string);

    Ok(Metadata { title: embedded.title, author: embedded.author_name, title_image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Page;

    fn post(html: &str) -> Page {
        Page::parse(html)
    }

    const WITH_COVER: &str = r#"
        <div class="Post-content"
             data-zop='{"authorName":"Ada_L","itemId":1,"title":"On engines","type":"article"}'>
            <img class="TitleImage" src="https://pic.example/cover.jpg" alt="">
            <div class="RichText"><p>x</p></div>
        </div>
    "#;

    #[test]
    fn test_extract_metadata_with_cover() {
        let page = post(WITH_COVER);
        let el = page.select_first("div.Post-content").unwrap().unwrap();
        let meta = extract_metadata(&el, &SiteLayout::default()).unwrap();

        assert_eq!(meta.title, "On engines");
        assert_eq!(meta.author, "Ada_L");
        assert_eq!(meta.title_image.as_deref(), Some("https://pic.example/cover.jpg"));
    }

    #[test]
    fn test_extract_metadata_without_cover() {
        let page = post(r#"<div class="Post-content" data-zop='{"title":"T","authorName":"A"}'></div>"#);
        let el = page.select_first("div").unwrap().unwrap();
        let meta = extract_metadata(&el, &SiteLayout::default()).unwrap();

        assert_eq!(meta, Metadata { title: "T".into(), author: "A".into(), title_image: None });
    }

    #[test]
    fn test_missing_metadata_attribute() {
        let page = post(r#"<div class="Post-content"></div>"#);
        let el = page.select_first("div").unwrap().unwrap();
        let err = extract_metadata(&el, &SiteLayout::default()).unwrap_err();

        assert!(matches!(err, ScribeError::MissingAttribute { ref name, .. } if name == "data-zop"));
    }

    #[test]
    fn test_invalid_metadata_payload() {
        let page = post(r#"<div data-zop='{"title":"T"}'></div>"#);
        let el = page.select_first("div").unwrap().unwrap();
        let err = extract_metadata(&el, &SiteLayout::default()).unwrap_err();

        assert!(matches!(err, ScribeError::InvalidMetadata(_)));
    }
}
