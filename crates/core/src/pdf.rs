//! HTML to PDF conversion through a document-rendering engine.
//!
//! A [`PdfEngine`] hands out one [`PdfSession`] per conversion. A session
//! owns an engine instance (for Chromium, a whole browser process) and must
//! be released by its caller; [`print_to_pdf`] does the acquire, print,
//! release sequence and releases on every path.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{FolioError, Result};

const MM_PER_INCH: f64 = 25.4;

/// Page geometry and timing for PDF output.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Paper width in millimetres (A4 by default).
    pub paper_width_mm: f64,
    /// Paper height in millimetres (A4 by default).
    pub paper_height_mm: f64,
    /// Margin applied to all four sides, in millimetres.
    pub margin_mm: f64,
    /// Print CSS backgrounds.
    pub print_background: bool,
    /// Wait after setting the content so styles apply before printing.
    pub settle_delay: Duration,
    /// Upper bound for each engine step (load content, print).
    pub timeout: Duration,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            paper_width_mm: 210.0,
            paper_height_mm: 297.0,
            margin_mm: 20.0,
            print_background: true,
            settle_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
        }
    }
}

impl PdfOptions {
    pub fn paper_width_in(&self) -> f64 {
        self.paper_width_mm / MM_PER_INCH
    }

    pub fn paper_height_in(&self) -> f64 {
        self.paper_height_mm / MM_PER_INCH
    }

    pub fn margin_in(&self) -> f64 {
        self.margin_mm / MM_PER_INCH
    }
}

/// Source of rendering-engine sessions.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Starts an engine instance.
    async fn acquire(&self) -> Result<Box<dyn PdfSession>>;
}

/// One acquired engine instance.
#[async_trait]
pub trait PdfSession: Send {
    /// Loads `html` as the page content and prints it.
    async fn print(&mut self, html: &str, options: &PdfOptions) -> Result<Vec<u8>>;

    /// Shuts the instance down. Called exactly once per acquired session.
    async fn release(self: Box<Self>) -> Result<()>;
}

/// Converts `html` to PDF with a freshly acquired session.
///
/// The session is released whether printing succeeds, fails, or times out.
/// A release failure is logged; it never replaces the print result.
pub async fn print_to_pdf(engine: &dyn PdfEngine, html: &str, options: &PdfOptions) -> Result<Vec<u8>> {
    let mut session = engine.acquire().await?;
    debug!(engine = engine.name(), "rendering engine acquired");

    let printed = match tokio::time::timeout(options.timeout, session.print(html, options)).await {
        Ok(result) => result,
        Err(_) => Err(FolioError::Conversion(format!(
            "printing did not finish within {} seconds",
            options.timeout.as_secs()
        ))),
    };

    if let Err(e) = session.release().await {
        warn!(engine = engine.name(), error = %e, "failed to release rendering engine");
    } else {
        debug!(engine = engine.name(), "rendering engine released");
    }

    printed
}
