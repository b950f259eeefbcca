use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use folio_core::{FetchConfig, SourceKind};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub source: SourceKind,
    pub fetch: FetchConfig,
    /// Convert reports to PDF; when off every report is delivered as HTML.
    pub pdf_enabled: bool,
    pub chrome_path: Option<PathBuf>,
    /// Maximum number of rendering engines alive at once.
    pub max_renders: usize,
    pub request_timeout: Duration,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            source: SourceKind::Http,
            fetch: FetchConfig::default(),
            pdf_enabled: true,
            chrome_path: None,
            max_renders: 2,
            request_timeout: Duration::from_secs(120),
            static_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = match var("FOLIO_HOST") {
            Some(v) => v.parse().context("FOLIO_HOST must be an IP address")?,
            None => defaults.host,
        };
        let port = match var("PORT") {
            Some(v) => v.parse().context("PORT must be a valid number")?,
            None => defaults.port,
        };
        let source = match var("FOLIO_SOURCE") {
            Some(v) => v.parse().map_err(|e: String| anyhow!(e)).context("FOLIO_SOURCE is invalid")?,
            None => defaults.source,
        };
        let timeout = match var("FOLIO_FETCH_TIMEOUT") {
            Some(v) => v.parse().context("FOLIO_FETCH_TIMEOUT must be a number of seconds")?,
            None => defaults.fetch.timeout,
        };
        let pdf_enabled = match var("FOLIO_PDF") {
            Some(v) => parse_flag(&v).context("FOLIO_PDF must be true or false")?,
            None => defaults.pdf_enabled,
        };
        let max_renders: usize = match var("FOLIO_MAX_RENDERS") {
            Some(v) => v.parse().context("FOLIO_MAX_RENDERS must be a positive number")?,
            None => defaults.max_renders,
        };
        if max_renders == 0 {
            return Err(anyhow!("FOLIO_MAX_RENDERS must be at least 1"));
        }
        let request_timeout = match var("FOLIO_REQUEST_TIMEOUT") {
            Some(v) => Duration::from_secs(v.parse().context("FOLIO_REQUEST_TIMEOUT must be a number of seconds")?),
            None => defaults.request_timeout,
        };

        let chrome_path = var("FOLIO_CHROME").map(PathBuf::from);
        let fetch = FetchConfig {
            timeout,
            user_agent: var("FOLIO_USER_AGENT").unwrap_or(defaults.fetch.user_agent),
            chrome_path: chrome_path.clone(),
            ..defaults.fetch
        };

        Ok(Self {
            host,
            port,
            source,
            fetch,
            pdf_enabled,
            chrome_path,
            max_renders,
            request_timeout,
            static_dir: var("FOLIO_STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("unrecognised flag value `{}`", other)),
    }
}
