//! Structured content extraction.
//!
//! The [`Extractor`] validates a URL, retrieves the page through its
//! [`PageSource`], and walks the parsed document to build a [`ScrapedData`].
//! Each field comes from its own selector query, so a page missing one kind
//! of content still yields every other field.
//!
//! # Example
//!
//! ```rust
//! use folio_core::extract_from_html;
//!
//! let html = r#"<html><head><title>Hi</title></head><body><ul><li>A</li><li>B</li></ul></body></html>"#;
//! let data = extract_from_html(html, "https://example.com").unwrap();
//! assert_eq!(data.title, "Hi");
//! assert_eq!(data.lists[0].items, vec!["A", "B"]);
//! ```

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info};
use url::Url;

use crate::fetch::{FetchConfig, PageSource, SourceKind, build_source, validate_url};
use crate::model::{Headings, Image, Link, ListKind, NO_ALT_TEXT, PageList, ScrapedData};
use crate::parse::Document;
use crate::{FolioError, Result};

/// Paragraphs must be strictly longer than this many characters once trimmed.
pub const MIN_PARAGRAPH_CHARS: usize = 20;

/// Retrieves pages and turns them into [`ScrapedData`].
#[derive(Clone)]
pub struct Extractor {
    source: Arc<dyn PageSource>,
}

impl Extractor {
    /// Creates an extractor around an existing page source.
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    /// Creates an extractor with the page source selected by `kind`.
    pub fn from_config(kind: SourceKind, config: &FetchConfig) -> Result<Self> {
        Ok(Self::new(build_source(kind, config)?))
    }

    /// Name of the underlying page source.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Whether retrieval starts a rendering engine, so callers can bound it.
    pub fn launches_engine(&self) -> bool {
        self.source.launches_engine()
    }

    /// Validates `url`, retrieves it, and extracts its content.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::MissingUrl`] or [`FolioError::InvalidUrl`] before
    /// any retrieval is attempted, and a fetch-class error when the page
    /// cannot be retrieved.
    pub async fn extract(&self, url: &str) -> Result<ScrapedData> {
        let parsed = validate_url(url)?;
        info!(url = %parsed, source = self.source.name(), "scraping page");

        let html = self.source.fetch(&parsed).await?;
        let doc = Document::parse(&html)?;
        let data = extract_document(&doc, url.trim(), OffsetDateTime::now_utc())?;

        debug!(
            url = %parsed,
            links = data.links.len(),
            images = data.images.len(),
            paragraphs = data.paragraphs.len(),
            lists = data.lists.len(),
            "page extracted"
        );

        Ok(data)
    }
}

/// Extracts content from markup that is already available.
///
/// `url` is recorded as the page URL; it only needs to parse, so `file://`
/// URLs are accepted here.
pub fn extract_from_html(html: &str, url: &str) -> Result<ScrapedData> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FolioError::MissingUrl);
    }
    Url::parse(url).map_err(|e| FolioError::InvalidUrl(e.to_string()))?;

    let doc = Document::parse(html)?;
    extract_document(&doc, url, OffsetDateTime::now_utc())
}

/// Builds a [`ScrapedData`] from a parsed document.
pub fn extract_document(doc: &Document, url: &str, timestamp: OffsetDateTime) -> Result<ScrapedData> {
    Ok(ScrapedData {
        url: url.to_string(),
        title: doc.extract_title(),
        timestamp,
        meta: doc.extract_meta(),
        headings: extract_headings(doc)?,
        links: extract_links(doc)?,
        images: extract_images(doc)?,
        paragraphs: extract_paragraphs(doc)?,
        lists: extract_lists(doc)?,
    })
}

/// Trimmed text of every h1, h2 and h3. Blank headings are kept.
pub fn extract_headings(doc: &Document) -> Result<Headings> {
    let texts = |selector: &str| -> Result<Vec<String>> {
        Ok(doc.select(selector)?.iter().map(|el| el.trimmed_text()).collect())
    };

    Ok(Headings { h1: texts("h1")?, h2: texts("h2")?, h3: texts("h3")? })
}

/// Anchors with an href, keeping only those whose text and href are both non-empty.
pub fn extract_links(doc: &Document) -> Result<Vec<Link>> {
    Ok(doc
        .select("a[href]")?
        .iter()
        .filter_map(|el| {
            let text = el.trimmed_text();
            let href = el.attr("href")?;
            if text.is_empty() || href.is_empty() {
                return None;
            }
            Some(Link { text, href: href.to_string() })
        })
        .collect())
}

/// Images with a src attribute; missing or empty alt becomes [`NO_ALT_TEXT`].
pub fn extract_images(doc: &Document) -> Result<Vec<Image>> {
    Ok(doc
        .select("img[src]")?
        .iter()
        .filter_map(|el| {
            let src = el.attr("src")?;
            let alt = el.attr("alt").filter(|alt| !alt.is_empty()).unwrap_or(NO_ALT_TEXT);
            Some(Image { alt: alt.to_string(), src: src.to_string() })
        })
        .collect())
}

/// Trimmed paragraph text longer than [`MIN_PARAGRAPH_CHARS`].
pub fn extract_paragraphs(doc: &Document) -> Result<Vec<String>> {
    Ok(doc
        .select("p")?
        .iter()
        .map(|el| el.trimmed_text())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect())
}

/// Every `ul` and `ol` in document order with its direct `li` children.
///
/// Nested lists appear as their own entries; their items are also part of
/// the enclosing item's text.
pub fn extract_lists(doc: &Document) -> Result<Vec<PageList>> {
    Ok(doc
        .select("ul, ol")?
        .iter()
        .filter_map(|el| {
            let kind = ListKind::from_tag(&el.tag_name())?;
            let items = el
                .children()
                .iter()
                .filter(|child| child.tag_name() == "li")
                .map(|li| li.trimmed_text())
                .collect();
            Some(PageList { kind, items })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NO_AUTHOR, NO_KEYWORDS, NO_TITLE};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SAMPLE: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title> Sample Page </title>
            <meta name="description" content="Example">
        </head>
        <body>
            <h1>First</h1>
            <h1>   </h1>
            <h2>Second</h2>
            <h3>Third</h3>
            <p>Too short.</p>
            <p>   This paragraph is comfortably longer than twenty characters.   </p>
            <a href="https://example.com/a">Example A</a>
            <a href="https://example.com/empty"></a>
            <a href="">No destination</a>
            <a>No href at all</a>
            <img src="/logo.png" alt="Logo">
            <img src="/spacer.gif">
            <img alt="Missing source">
            <ul><li>A</li><li>B</li></ul>
            <ol>
                <li>One</li>
                <li>Two
                    <ul><li>Nested</li></ul>
                </li>
            </ol>
        </body>
        </html>
    "#;

    fn sample() -> ScrapedData {
        extract_from_html(SAMPLE, "https://example.com").unwrap()
    }

    #[test]
    fn test_title_and_meta() {
        let data = sample();
        assert_eq!(data.title, "Sample Page");
        assert_eq!(data.meta.description, "Example");
        assert_eq!(data.meta.keywords, NO_KEYWORDS);
        assert_eq!(data.meta.author, NO_AUTHOR);
    }

    #[test]
    fn test_headings_keep_blank_entries() {
        let data = sample();
        assert_eq!(data.headings.h1, vec!["First", ""]);
        assert_eq!(data.headings.h2, vec!["Second"]);
        assert_eq!(data.headings.h3, vec!["Third"]);
    }

    #[test]
    fn test_links_require_text_and_href() {
        let data = sample();
        assert_eq!(
            data.links,
            vec![Link { text: "Example A".into(), href: "https://example.com/a".into() }]
        );
    }

    #[test]
    fn test_images_alt_placeholder() {
        let data = sample();
        assert_eq!(data.images.len(), 2);
        assert_eq!(data.images[0], Image { alt: "Logo".into(), src: "/logo.png".into() });
        assert_eq!(data.images[1].alt, NO_ALT_TEXT);
    }

    #[test]
    fn test_paragraph_filter() {
        let data = sample();
        assert_eq!(data.paragraphs, vec!["This paragraph is comfortably longer than twenty characters."]);
    }

    #[rstest]
    #[case("12345678901234567890", 0)]
    #[case("123456789012345678901", 1)]
    #[case("   12345678901234567890   ", 0)]
    #[case("ééééééééééééééééééééé", 1)]
    fn test_paragraph_length_boundary(#[case] text: &str, #[case] expected: usize) {
        let html = format!("<p>{}</p>", text);
        let doc = Document::parse(&html).unwrap();
        assert_eq!(extract_paragraphs(&doc).unwrap().len(), expected);
    }

    #[test]
    fn test_simple_list() {
        let doc = Document::parse("<ul><li>A</li><li>B</li></ul>").unwrap();
        let lists = extract_lists(&doc).unwrap();
        assert_eq!(lists, vec![PageList { kind: ListKind::Ul, items: vec!["A".into(), "B".into()] }]);
    }

    #[test]
    fn test_nested_lists_in_document_order() {
        let data = sample();
        assert_eq!(data.lists.len(), 3);
        assert_eq!(data.lists[0].kind, ListKind::Ul);
        assert_eq!(data.lists[1].kind, ListKind::Ol);
        assert_eq!(data.lists[1].items.len(), 2);
        assert!(data.lists[1].items[1].starts_with("Two"));
        assert!(data.lists[1].items[1].contains("Nested"));
        assert_eq!(data.lists[2].items, vec!["Nested"]);
    }

    #[test]
    fn test_empty_document() {
        let data = extract_from_html("", "https://example.com").unwrap();
        assert_eq!(data.title, NO_TITLE);
        assert!(data.headings.h1.is_empty());
        assert!(data.links.is_empty());
        assert!(data.lists.is_empty());
    }

    #[test]
    fn test_extract_from_html_accepts_file_urls() {
        let data = extract_from_html(SAMPLE, "file:///tmp/sample.html").unwrap();
        assert_eq!(data.url, "file:///tmp/sample.html");
        assert!(matches!(extract_from_html(SAMPLE, "nope"), Err(FolioError::InvalidUrl(_))));
        assert!(matches!(extract_from_html(SAMPLE, " "), Err(FolioError::MissingUrl)));
    }

    struct CountingSource {
        calls: AtomicUsize,
        html: &'static str,
    }

    #[async_trait]
    impl PageSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch(&self, _url: &Url) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.html.to_string())
        }
    }

    #[tokio::test]
    async fn test_invalid_url_never_reaches_source() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0), html: SAMPLE });
        let extractor = Extractor::new(source.clone());

        let result = extractor.extract("not-a-url").await;

        assert!(matches!(result, Err(FolioError::InvalidUrl(_))));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extract_through_source() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0), html: SAMPLE });
        let extractor = Extractor::new(source.clone());

        let data = extractor.extract("  https://example.com/page  ").await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(data.url, "https://example.com/page");
        assert_eq!(data.title, "Sample Page");
        assert_eq!(extractor.source_name(), "counting");
    }
}
