//! Final report assembly: rendered HTML converted to PDF when possible.
//!
//! [`build_report`] always produces a deliverable. When no engine is
//! configured, or the engine fails at any step, the rendered HTML itself
//! becomes the report and [`Report::fallback_reason`] says why.

use tracing::{info, warn};

use crate::formatters::html::{HtmlReportConfig, render_report_with_config};
use crate::model::ScrapedData;
use crate::pdf::{PdfEngine, PdfOptions, print_to_pdf};

/// Format of a delivered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Html,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Html => "text/html; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Html => "html",
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.extension()
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished report ready for delivery.
#[derive(Debug, Clone)]
pub struct Report {
    pub body: Vec<u8>,
    pub format: ReportFormat,
    /// Set when a PDF was wanted but HTML was delivered instead.
    pub fallback_reason: Option<String>,
}

impl Report {
    /// Suggested download name, `scraped-data-<unix millis>.<ext>`.
    pub fn filename(&self, unix_millis: i128) -> String {
        format!("scraped-data-{}.{}", unix_millis, self.format.extension())
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Options for [`build_report`].
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub html: HtmlReportConfig,
    pub pdf: PdfOptions,
}

/// Renders `data` and converts it to PDF with `engine` when one is given.
///
/// Conversion failures never surface as errors: they are logged at warn
/// level and the HTML report is returned.
pub async fn build_report(data: &ScrapedData, engine: Option<&dyn PdfEngine>, options: &ReportOptions) -> Report {
    let html = render_report_with_config(data, &options.html);

    let Some(engine) = engine else {
        return Report { body: html.into_bytes(), format: ReportFormat::Html, fallback_reason: None };
    };

    match print_to_pdf(engine, &html, &options.pdf).await {
        Ok(pdf) => {
            info!(url = %data.url, bytes = pdf.len(), "PDF report generated");
            Report { body: pdf, format: ReportFormat::Pdf, fallback_reason: None }
        }
        Err(e) => {
            warn!(url = %data.url, error = %e, "PDF generation failed, falling back to HTML");
            Report { body: html.into_bytes(), format: ReportFormat::Html, fallback_reason: Some(e.to_string()) }
        }
    }
}

/// HTML report for a PDF attempt that was abandoned before conversion started.
pub fn fallback_report(data: &ScrapedData, options: &ReportOptions, reason: impl Into<String>) -> Report {
    let reason = reason.into();
    warn!(url = %data.url, reason = %reason, "PDF generation skipped, falling back to HTML");
    let html = render_report_with_config(data, &options.html);
    Report { body: html.into_bytes(), format: ReportFormat::Html, fallback_reason: Some(reason) }
}
