//! The structured record produced by extraction.
//!
//! [`ScrapedData`] is built once per scrape and never mutated afterwards.
//! Everything downstream (the HTML report, the JSON output, the PDF) is a
//! pure function of it.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Placeholder used when a page has no usable `<title>`.
pub const NO_TITLE: &str = "No title found";
/// Placeholder for a missing `meta[name="description"]`.
pub const NO_DESCRIPTION: &str = "No description";
/// Placeholder for a missing `meta[name="keywords"]`.
pub const NO_KEYWORDS: &str = "No keywords";
/// Placeholder for a missing `meta[name="author"]`.
pub const NO_AUTHOR: &str = "No author";
/// Placeholder for an image without alt text.
pub const NO_ALT_TEXT: &str = "No alt text";

/// Everything extracted from a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedData {
    /// The page URL as requested.
    pub url: String,
    /// Trimmed page title, or [`NO_TITLE`].
    pub title: String,
    /// When the extraction ran.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub meta: PageMeta,
    pub headings: Headings,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub paragraphs: Vec<String>,
    pub lists: Vec<PageList>,
}

impl ScrapedData {
    /// Creates an empty record for `url` with every placeholder filled in.
    pub fn empty(url: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self {
            url: url.into(),
            title: NO_TITLE.to_string(),
            timestamp,
            meta: PageMeta::default(),
            headings: Headings::default(),
            links: Vec::new(),
            images: Vec::new(),
            paragraphs: Vec::new(),
            lists: Vec::new(),
        }
    }
}

/// Values of the description, keywords and author meta tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub description: String,
    pub keywords: String,
    pub author: String,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            description: NO_DESCRIPTION.to_string(),
            keywords: NO_KEYWORDS.to_string(),
            author: NO_AUTHOR.to_string(),
        }
    }
}

/// Heading text by level, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

/// An anchor with non-empty text and href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image with its source and alt text (or [`NO_ALT_TEXT`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub alt: String,
    pub src: String,
}

/// Whether a list was ordered or unordered in the source page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ul,
    Ol,
}

impl ListKind {
    /// Parses a lowercase tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ul" => Some(Self::Ul),
            "ol" => Some(Self::Ol),
            _ => None,
        }
    }

    /// The HTML tag name for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ul => "ul",
            Self::Ol => "ol",
        }
    }
}

/// A `ul` or `ol` and the text of its direct `li` children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageList {
    #[serde(rename = "type")]
    pub kind: ListKind,
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_empty_record_uses_placeholders() {
        let data = ScrapedData::empty("https://example.com", datetime!(2024-01-15 10:30:00 UTC));
        assert_eq!(data.title, NO_TITLE);
        assert_eq!(data.meta.description, NO_DESCRIPTION);
        assert_eq!(data.meta.keywords, NO_KEYWORDS);
        assert_eq!(data.meta.author, NO_AUTHOR);
        assert!(data.links.is_empty());
    }

    #[test]
    fn test_list_kind_tags() {
        assert_eq!(ListKind::from_tag("ul"), Some(ListKind::Ul));
        assert_eq!(ListKind::from_tag("ol"), Some(ListKind::Ol));
        assert_eq!(ListKind::from_tag("dl"), None);
        assert_eq!(ListKind::Ol.tag(), "ol");
    }

    #[test]
    fn test_serialized_shape() {
        let mut data = ScrapedData::empty("https://example.com", datetime!(2024-01-15 10:30:00 UTC));
        data.lists.push(PageList { kind: ListKind::Ul, items: vec!["A".into()] });

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["timestamp"], "2024-01-15T10:30:00Z");
        assert_eq!(value["lists"][0]["type"], "ul");
        assert_eq!(value["meta"]["keywords"], NO_KEYWORDS);
        assert!(value["headings"]["h3"].is_array());
    }
}
