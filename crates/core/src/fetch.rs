//! Page retrieval from URLs, files, and stdin.
//!
//! Remote pages are retrieved through a [`PageSource`]. Two sources exist:
//! [`HttpSource`] issues a plain GET and returns the static response body,
//! while `BrowserSource` (feature `browser`) drives headless Chromium and
//! returns the markup after client-side rendering. [`SourceKind`] selects
//! one of them from configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use crate::{FolioError, Result};

/// User-Agent sent by default; a desktop Chrome string so that sites serve
/// their regular markup.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Page retrieval configuration, shared by both page sources.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request (or browser page load) timeout in seconds.
    pub timeout: u64,
    /// User-Agent string.
    pub user_agent: String,
    /// Wait after the DOM is ready before capturing browser-rendered markup.
    pub settle_delay: Duration,
    /// Chrome/Chromium binary; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            settle_delay: Duration::from_secs(2),
            chrome_path: None,
        }
    }
}

/// Retrieves the markup of a page.
///
/// Implementations must not retry and must report every failure as a
/// fetch-class [`FolioError`].
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether each fetch starts a rendering engine instance.
    fn launches_engine(&self) -> bool {
        false
    }

    /// Returns the page markup for an already validated URL.
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Which [`PageSource`] to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// Static HTTP fetch. Fast, but misses JavaScript-rendered content.
    #[default]
    Http,
    /// Headless Chromium. Captures client-side rendering at a higher cost.
    Browser,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "browser" | "chrome" => Ok(Self::Browser),
            _ => Err(format!("Invalid source: {}. Valid options: http, browser", s)),
        }
    }
}

/// Builds the page source selected by `kind`.
pub fn build_source(kind: SourceKind, config: &FetchConfig) -> Result<Arc<dyn PageSource>> {
    match kind {
        SourceKind::Http => Ok(Arc::new(HttpSource::new(config.clone())?)),
        #[cfg(feature = "browser")]
        SourceKind::Browser => Ok(Arc::new(crate::browser::BrowserSource::new(config.clone()))),
        #[cfg(not(feature = "browser"))]
        SourceKind::Browser => Err(FolioError::Browser(
            "browser source requested but the `browser` feature is disabled".to_string(),
        )),
    }
}

/// Checks that `url` is present and names a fetchable http(s) page.
///
/// This never touches the network.
pub fn validate_url(url: &str) -> Result<Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FolioError::MissingUrl);
    }

    let parsed = Url::parse(url).map_err(|e| FolioError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(FolioError::InvalidUrl(format!(
                "unsupported scheme `{}` (expected http:// or https://)",
                other
            )));
        }
    }

    Ok(parsed)
}

/// Fetches pages with a single HTTP GET.
pub struct HttpSource {
    client: Client,
    timeout: u64,
}

impl HttpSource {
    /// Builds the underlying client with the configured timeout and headers.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(FolioError::HttpError)?;

        Ok(Self { client, timeout: config.timeout })
    }

    fn map_error(&self, err: reqwest::Error) -> FolioError {
        if err.is_timeout() { FolioError::Timeout { timeout: self.timeout } } else { FolioError::HttpError(err) }
    }
}

#[async_trait]
impl PageSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!(%url, "fetching page over HTTP");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::HttpStatus { status: status.as_u16(), url: url.to_string() });
        }

        let content = response.text().await.map_err(|e| self.map_error(e))?;
        debug!(%url, bytes = content.len(), "page fetched");

        Ok(content)
    }
}

/// Fetches HTML content from a URL with a one-off [`HttpSource`].
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed = validate_url(url)?;
    HttpSource::new(config.clone())?.fetch(&parsed).await
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        Err(FolioError::FileNotFound(path.to_path_buf()))
    } else {
        fs::read_to_string(path).map_err(FolioError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(FolioError::from)?;

    Ok(buffer)
}
