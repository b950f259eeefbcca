//! Headless Chromium integration (feature `browser`).
//!
//! Chromium backs two things: [`BrowserSource`], a [`PageSource`] that
//! captures markup after client-side rendering, and [`ChromiumPdfEngine`],
//! which prints rendered reports to PDF. Every use launches a dedicated
//! browser process and shuts it down afterwards. A process that is never
//! closed explicitly is killed when its [`Browser`] handle drops.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::fetch::{FetchConfig, PageSource};
use crate::pdf::{PdfEngine, PdfOptions, PdfSession};
use crate::{FolioError, Result};

const LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

const CHROME_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--disable-gpu",
];

/// A running browser process and the task driving its event loop.
struct Chromium {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl Chromium {
    async fn launch(chrome_path: Option<&PathBuf>, user_agent: Option<&str>) -> std::result::Result<Self, String> {
        let mut builder = BrowserConfig::builder().args(CHROME_ARGS.iter().copied());
        if let Some(path) = chrome_path {
            builder = builder.chrome_executable(path);
        }
        if let Some(user_agent) = user_agent {
            builder = builder.arg(format!("--user-agent={}", user_agent));
        }
        let config = builder.build().map_err(|e| format!("invalid browser configuration: {}", e))?;

        let (browser, mut handler) = tokio::time::timeout(LAUNCH_TIMEOUT, Browser::launch(config))
            .await
            .map_err(|_| format!("browser did not start within {} seconds", LAUNCH_TIMEOUT.as_secs()))?
            .map_err(|e| format!("failed to launch browser: {}", e))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!("browser launched");
        Ok(Self { browser, handler })
    }

    async fn blank_page(&self) -> std::result::Result<Page, String> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| format!("failed to open page: {}", e))
    }

    async fn shutdown(mut self) -> std::result::Result<(), String> {
        let closed = self.browser.close().await.map(|_| ()).map_err(|e| format!("failed to close browser: {}", e));
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "browser process did not exit cleanly");
        }
        self.handler.abort();
        debug!("browser closed");
        closed
    }
}

impl Drop for Chromium {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Retrieves pages by loading them in headless Chromium.
pub struct BrowserSource {
    config: FetchConfig,
}

impl BrowserSource {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    async fn capture(&self, chromium: &Chromium, url: &Url) -> Result<String> {
        let page = chromium.blank_page().await.map_err(FolioError::Browser)?;

        let timeout = Duration::from_secs(self.config.timeout);
        tokio::time::timeout(timeout, page.goto(url.as_str()))
            .await
            .map_err(|_| FolioError::Timeout { timeout: self.config.timeout })?
            .map_err(|e| FolioError::Browser(format!("navigation to {} failed: {}", url, e)))?;

        tokio::time::sleep(self.config.settle_delay).await;

        page.content()
            .await
            .map_err(|e| FolioError::Browser(format!("failed to read page content: {}", e)))
    }
}

#[async_trait]
impl PageSource for BrowserSource {
    fn name(&self) -> &'static str {
        "browser"
    }

    fn launches_engine(&self) -> bool {
        true
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!(%url, "fetching page with headless browser");

        let chromium = Chromium::launch(self.config.chrome_path.as_ref(), Some(self.config.user_agent.as_str()))
            .await
            .map_err(FolioError::Browser)?;

        let captured = self.capture(&chromium, url).await;

        if let Err(e) = chromium.shutdown().await {
            warn!(%url, error = %e, "failed to shut down browser after fetch");
        }

        captured
    }
}

/// Prints reports to PDF with headless Chromium.
#[derive(Debug, Clone, Default)]
pub struct ChromiumPdfEngine {
    chrome_path: Option<PathBuf>,
}

impl ChromiumPdfEngine {
    /// Creates an engine; the Chrome binary is auto-detected when `chrome_path` is `None`.
    pub fn new(chrome_path: Option<PathBuf>) -> Self {
        Self { chrome_path }
    }
}

#[async_trait]
impl PdfEngine for ChromiumPdfEngine {
    fn name(&self) -> &'static str {
        "chromium"
    }

    async fn acquire(&self) -> Result<Box<dyn PdfSession>> {
        let chromium = Chromium::launch(self.chrome_path.as_ref(), None)
            .await
            .map_err(FolioError::Conversion)?;
        Ok(Box::new(ChromiumSession { chromium }))
    }
}

struct ChromiumSession {
    chromium: Chromium,
}

fn print_params(options: &PdfOptions) -> PrintToPdfParams {
    let margin = options.margin_in();
    PrintToPdfParams {
        print_background: Some(options.print_background),
        paper_width: Some(options.paper_width_in()),
        paper_height: Some(options.paper_height_in()),
        margin_top: Some(margin),
        margin_bottom: Some(margin),
        margin_left: Some(margin),
        margin_right: Some(margin),
        ..Default::default()
    }
}

#[async_trait]
impl PdfSession for ChromiumSession {
    async fn print(&mut self, html: &str, options: &PdfOptions) -> Result<Vec<u8>> {
        let page = self.chromium.blank_page().await.map_err(FolioError::Conversion)?;

        page.set_content(html)
            .await
            .map_err(|e| FolioError::Conversion(format!("failed to load report: {}", e)))?;

        tokio::time::sleep(options.settle_delay).await;

        page.pdf(print_params(options))
            .await
            .map_err(|e| FolioError::Conversion(format!("failed to print PDF: {}", e)))
    }

    async fn release(self: Box<Self>) -> Result<()> {
        self.chromium.shutdown().await.map_err(FolioError::Conversion)
    }
}
