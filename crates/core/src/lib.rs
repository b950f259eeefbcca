//! # Folio Core
//!
//! Web page scraping and report generation.
//!
//! Folio retrieves a page, extracts a fixed set of structured fields from it
//! (title, meta tags, headings, links, images, paragraphs, lists), renders
//! them as a self-contained HTML report, and converts that report to PDF when
//! a rendering engine is available.
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_core::{extract_from_html, render_report};
//!
//! let html = r#"<html><head><title>Example</title></head><body><h1>Hello</h1></body></html>"#;
//! let data = extract_from_html(html, "https://example.com").unwrap();
//! assert_eq!(data.headings.h1, vec!["Hello"]);
//!
//! let report = render_report(&data);
//! assert!(report.contains("<h1>Example</h1>"));
//! ```
//!
//! ## Fetching
//!
//! ```rust,no_run
//! use folio_core::{Extractor, FetchConfig, SourceKind};
//!
//! # async fn run() -> folio_core::Result<()> {
//! let extractor = Extractor::from_config(SourceKind::Http, &FetchConfig::default())?;
//! let data = extractor.extract("https://example.com").await?;
//! println!("{} links", data.links.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `browser` (default): headless Chromium page source and PDF engine
//!
//! ## Error Handling
//!
//! All fallible functions return [`Result<T>`], which uses [`FolioError`].
//! [`FolioError::kind`] groups failures into validation, fetch, extraction,
//! conversion and I/O classes.

#[cfg(feature = "browser")]
pub mod browser;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod metadata;
pub mod model;
pub mod parse;
pub mod pdf;
pub mod report;

#[cfg(feature = "browser")]
pub use browser::{BrowserSource, ChromiumPdfEngine};
pub use error::{ErrorKind, FolioError, Result};
pub use extract::{Extractor, extract_document, extract_from_html};
pub use fetch::{FetchConfig, HttpSource, PageSource, SourceKind, build_source, validate_url};
pub use fetch::{fetch_file, fetch_stdin, fetch_url};
pub use formatters::{HtmlFormatter, HtmlReportConfig, escape_html, render_report, render_report_with_config};
pub use formatters::{JsonConfig, JsonFormatter, convert_to_json};
pub use model::{Headings, Image, Link, ListKind, PageList, PageMeta, ScrapedData};
pub use parse::Document;
pub use pdf::{PdfEngine, PdfOptions, PdfSession, print_to_pdf};
pub use report::{Report, ReportFormat, ReportOptions, build_report, fallback_report};
