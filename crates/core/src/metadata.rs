use crate::Document;
use crate::model::{NO_AUTHOR, NO_DESCRIPTION, NO_KEYWORDS, NO_TITLE, PageMeta};

impl Document {
    /// Extract the page title.
    ///
    /// Uses the trimmed text of the first `<title>` element, falling back to
    /// [`NO_TITLE`] when it is missing or blank.
    pub fn extract_title(&self) -> String {
        self.title()
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string())
    }

    /// Extract the description, keywords and author meta tags.
    ///
    /// Each value is the `content` attribute of the first matching
    /// `meta[name=...]`, kept verbatim. An absent tag, a tag without
    /// `content`, or an empty `content` yields the placeholder.
    pub fn extract_meta(&self) -> PageMeta {
        PageMeta {
            description: self.meta_or("description", NO_DESCRIPTION),
            keywords: self.meta_or("keywords", NO_KEYWORDS),
            author: self.meta_or("author", NO_AUTHOR),
        }
    }

    fn meta_or(&self, name: &str, placeholder: &str) -> String {
        self.meta_content(name)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| placeholder.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML_WITH_META: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>
                Test Page Title
            </title>
            <meta name="author" content="John Doe">
            <meta name="description" content="  This is a test description.  ">
            <meta name="keywords" content="rust, scraping">
            <meta property="og:title" content="OG Title">
        </head>
        <body><h1>Main Heading</h1></body>
        </html>
    "#;

    #[test]
    fn test_extract_title_trims() {
        let doc = Document::parse(HTML_WITH_META).unwrap();
        assert_eq!(doc.extract_title(), "Test Page Title");
    }

    #[test]
    fn test_extract_title_placeholder() {
        let doc = Document::parse("<html><body><h1>Only a heading</h1></body></html>").unwrap();
        assert_eq!(doc.extract_title(), NO_TITLE);

        let doc = Document::parse("<html><head><title>   </title></head></html>").unwrap();
        assert_eq!(doc.extract_title(), NO_TITLE);
    }

    #[test]
    fn test_extract_meta_values_kept_verbatim() {
        let doc = Document::parse(HTML_WITH_META).unwrap();
        let meta = doc.extract_meta();

        assert_eq!(meta.description, "  This is a test description.  ");
        assert_eq!(meta.keywords, "rust, scraping");
        assert_eq!(meta.author, "John Doe");
    }

    #[test]
    fn test_extract_meta_placeholders() {
        let html = r#"
            <html>
            <head>
                <meta name="description" content="Example">
                <meta name="author" content="">
            </head>
            <body></body>
            </html>
        "#;
        let doc = Document::parse(html).unwrap();
        let meta = doc.extract_meta();

        assert_eq!(meta.description, "Example");
        assert_eq!(meta.keywords, NO_KEYWORDS);
        assert_eq!(meta.author, NO_AUTHOR);
    }

    #[test]
    fn test_extract_meta_ignores_property_tags() {
        let html = r#"<html><head><meta property="description" content="OG"></head></html>"#;
        let doc = Document::parse(html).unwrap();
        assert_eq!(doc.extract_meta().description, NO_DESCRIPTION);
    }
}
