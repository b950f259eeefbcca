//! Styled HTML report for a [`ScrapedData`] record.
//!
//! The report is a single self-contained document (inline stylesheet, no
//! external assets) so it can be downloaded as-is or printed to PDF.
//! Rendering is deterministic: the only time shown is the record's own
//! timestamp.

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::model::{Link, ScrapedData};

const FOOTER_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year] at [hour]:[minute]:[second] UTC");

const STYLESHEET: &str = r#"
        body {
            font-family: 'Arial', sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background: #f5f5f5;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 2px solid #667eea;
            padding-bottom: 20px;
            margin-bottom: 30px;
        }
        .header h1 {
            color: #667eea;
            font-size: 28px;
            margin-bottom: 10px;
        }
        .header .url {
            color: #666;
            font-size: 14px;
            word-break: break-all;
        }
        .section {
            margin-bottom: 25px;
        }
        .section h2 {
            color: #333;
            font-size: 20px;
            margin-bottom: 15px;
            border-left: 4px solid #667eea;
            padding-left: 15px;
        }
        .section h3 {
            color: #555;
            font-size: 16px;
            margin-bottom: 10px;
        }
        .meta-info {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 8px;
            margin-bottom: 20px;
        }
        .meta-info p {
            margin: 5px 0;
        }
        .meta-info strong {
            color: #667eea;
        }
        ul, ol {
            margin-left: 20px;
        }
        li {
            margin-bottom: 5px;
        }
        .link-item, .image-item {
            margin-bottom: 8px;
            padding: 8px;
            background: #f8f9fa;
            border-radius: 4px;
            word-break: break-all;
        }
        .link-item a {
            color: #667eea;
            text-decoration: none;
        }
        .paragraph {
            margin-bottom: 15px;
            text-align: justify;
        }
        .timestamp {
            text-align: center;
            color: #999;
            font-size: 12px;
            margin-top: 30px;
            border-top: 1px solid #eee;
            padding-top: 20px;
        }
        .print-btn {
            background: #667eea;
            color: white;
            border: none;
            padding: 10px 20px;
            border-radius: 5px;
            cursor: pointer;
            margin-bottom: 20px;
        }
        @media print {
            body { background: white; }
            .print-btn { display: none; }
        }
"#;

/// Truncation limits and optional chrome of the HTML report.
///
/// The defaults are the limits every report is expected to use; they are
/// configurable for callers that embed the renderer elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlReportConfig {
    /// Paragraphs rendered before the "more paragraphs" note.
    pub max_paragraphs: usize,
    /// Lists rendered.
    pub max_lists: usize,
    /// Items rendered per list.
    pub max_list_items: usize,
    /// Links rendered before the "more links" note.
    pub max_links: usize,
    /// Images rendered before the "more images" note.
    pub max_images: usize,
    /// Include the "Print / Save as PDF" button.
    pub include_print_button: bool,
}

impl Default for HtmlReportConfig {
    fn default() -> Self {
        Self {
            max_paragraphs: 10,
            max_lists: 5,
            max_list_items: 10,
            max_links: 20,
            max_images: 10,
            include_print_button: true,
        }
    }
}

/// HTML report formatter with configurable limits.
pub struct HtmlFormatter {
    config: HtmlReportConfig,
}

impl HtmlFormatter {
    pub fn new(config: HtmlReportConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, data: &ScrapedData) -> String {
        render_report_with_config(data, &self.config)
    }
}

/// Renders the report with the default limits.
pub fn render_report(data: &ScrapedData) -> String {
    render_report_with_config(data, &HtmlReportConfig::default())
}

/// Renders the report with custom limits.
pub fn render_report_with_config(data: &ScrapedData, config: &HtmlReportConfig) -> String {
    let mut output = String::with_capacity(8 * 1024);

    output.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    output.push_str("    <meta charset=\"UTF-8\">\n");
    output.push_str(&format!("    <title>Scraped Data Report: {}</title>\n", escape_html(&data.title)));
    output.push_str(&format!("    <style>{}    </style>\n", STYLESHEET));
    output.push_str("</head>\n<body>\n<div class=\"container\">\n");

    output.push_str("    <div class=\"header\">\n");
    output.push_str(&format!("        <h1>{}</h1>\n", escape_html(&data.title)));
    output.push_str(&format!("        <div class=\"url\">{}</div>\n", escape_html(&data.url)));
    output.push_str("    </div>\n");

    if config.include_print_button {
        output.push_str(
            "    <button class=\"print-btn\" onclick=\"window.print()\">Print / Save as PDF</button>\n",
        );
    }

    output.push_str("    <div class=\"meta-info\">\n        <h3>Page Information</h3>\n");
    output.push_str(&format!(
        "        <p><strong>Description:</strong> {}</p>\n",
        escape_html(&data.meta.description)
    ));
    output.push_str(&format!(
        "        <p><strong>Keywords:</strong> {}</p>\n",
        escape_html(&data.meta.keywords)
    ));
    output.push_str(&format!("        <p><strong>Author:</strong> {}</p>\n", escape_html(&data.meta.author)));
    output.push_str("    </div>\n");

    push_heading_section(&mut output, "Main Headings (H1)", &data.headings.h1);
    push_heading_section(&mut output, "Sub Headings (H2)", &data.headings.h2);
    push_paragraph_section(&mut output, &data.paragraphs, config);
    push_list_section(&mut output, data, config);
    push_link_section(&mut output, &data.links, config);
    push_image_section(&mut output, data, config);

    output.push_str(&format!(
        "    <div class=\"timestamp\">\n        Generated on: {}\n    </div>\n",
        escape_html(&format_timestamp(data.timestamp))
    ));
    output.push_str("</div>\n</body>\n</html>\n");

    output
}

fn push_heading_section(output: &mut String, title: &str, headings: &[String]) {
    if headings.is_empty() {
        return;
    }

    output.push_str(&format!("    <div class=\"section\">\n        <h2>{}</h2>\n        <ul>\n", title));
    for heading in headings {
        output.push_str(&format!("            <li>{}</li>\n", escape_html(heading)));
    }
    output.push_str("        </ul>\n    </div>\n");
}

fn push_paragraph_section(output: &mut String, paragraphs: &[String], config: &HtmlReportConfig) {
    if paragraphs.is_empty() {
        return;
    }

    output.push_str("    <div class=\"section\">\n        <h2>Main Content</h2>\n");
    for paragraph in paragraphs.iter().take(config.max_paragraphs) {
        output.push_str(&format!("        <div class=\"paragraph\">{}</div>\n", escape_html(paragraph)));
    }
    push_remainder_note(output, paragraphs.len(), config.max_paragraphs, "paragraphs");
    output.push_str("    </div>\n");
}

fn push_list_section(output: &mut String, data: &ScrapedData, config: &HtmlReportConfig) {
    if data.lists.is_empty() {
        return;
    }

    output.push_str("    <div class=\"section\">\n        <h2>Lists</h2>\n");
    for list in data.lists.iter().take(config.max_lists) {
        let tag = list.kind.tag();
        output.push_str(&format!("        <h3>{} List</h3>\n", tag.to_uppercase()));
        output.push_str(&format!("        <{}>\n", tag));
        for item in list.items.iter().take(config.max_list_items) {
            output.push_str(&format!("            <li>{}</li>\n", escape_html(item)));
        }
        output.push_str(&format!("        </{}>\n", tag));
    }
    output.push_str("    </div>\n");
}

fn push_link_section(output: &mut String, links: &[Link], config: &HtmlReportConfig) {
    if links.is_empty() {
        return;
    }

    output.push_str(&format!(
        "    <div class=\"section\">\n        <h2>Links ({} found)</h2>\n",
        links.len()
    ));
    for link in links.iter().take(config.max_links) {
        let href = escape_html(&link.href);
        output.push_str("        <div class=\"link-item\">\n");
        output.push_str(&format!("            <strong>{}</strong><br>\n", escape_html(&link.text)));
        if is_safe_href(&link.href) {
            output.push_str(&format!("            <a href=\"{}\">{}</a>\n", href, href));
        } else {
            output.push_str(&format!("            <span>{}</span>\n", href));
        }
        output.push_str("        </div>\n");
    }
    push_remainder_note(output, links.len(), config.max_links, "links");
    output.push_str("    </div>\n");
}

fn push_image_section(output: &mut String, data: &ScrapedData, config: &HtmlReportConfig) {
    if data.images.is_empty() {
        return;
    }

    output.push_str(&format!(
        "    <div class=\"section\">\n        <h2>Images ({} found)</h2>\n",
        data.images.len()
    ));
    for image in data.images.iter().take(config.max_images) {
        output.push_str("        <div class=\"image-item\">\n");
        output.push_str(&format!("            <strong>Alt:</strong> {}<br>\n", escape_html(&image.alt)));
        output.push_str(&format!("            <strong>Source:</strong> {}\n", escape_html(&image.src)));
        output.push_str("        </div>\n");
    }
    push_remainder_note(output, data.images.len(), config.max_images, "images");
    output.push_str("    </div>\n");
}

fn push_remainder_note(output: &mut String, total: usize, shown: usize, noun: &str) {
    if total > shown {
        output.push_str(&format!("        <p><em>... and {} more {}</em></p>\n", total - shown, noun));
    }
}

/// Formats a timestamp for the report footer, e.g. `January 15, 2024 at 10:30:00 UTC`.
pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    let utc = timestamp.to_offset(time::UtcOffset::UTC);
    utc.format(FOOTER_TIME_FORMAT).unwrap_or_else(|_| utc.to_string())
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Whether `href` may be emitted as a clickable link.
///
/// Relative references are allowed; absolute ones only with a scheme that
/// cannot execute script.
fn is_safe_href(href: &str) -> bool {
    let normalized = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.split_once(':') {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => {
            !matches!(scheme, "javascript" | "vbscript" | "data")
        }
        _ => true,
    }
}
