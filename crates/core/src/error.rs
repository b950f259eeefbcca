//! Error types for Folio operations.
//!
//! This module defines the main error type [`FolioError`] which represents
//! all possible errors that can occur while validating a URL, retrieving a
//! page, extracting its content, and converting the rendered report.
//!
//! Every variant belongs to one [`ErrorKind`], which is what callers use to
//! decide how a failure surfaces (a `400`, a `500`, or a silent fallback).
//!
//! # Example
//!
//! ```rust
//! use folio_core::{ErrorKind, FolioError, validate_url};
//!
//! match validate_url("not-a-url") {
//!     Err(e) => assert_eq!(e.kind(), ErrorKind::Validation),
//!     Ok(_) => unreachable!(),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scraping and report operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// No URL was supplied, or it was blank.
    #[error("URL is required")]
    MissingUrl,

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed, is relative, or uses a scheme
    /// that cannot be fetched.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request or page load timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status.
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { status: u16, url: String },

    /// Headless browser failures (launch, navigation, capture).
    #[error("Browser error: {0}")]
    Browser(String),

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The HTML to PDF conversion step failed.
    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a [`FolioError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input; never retried, reported as a client error.
    Validation,
    /// The page could not be retrieved.
    Fetch,
    /// The page was retrieved but could not be processed.
    Extraction,
    /// Report conversion failed; recovered by falling back to HTML.
    Conversion,
    /// Local file or stream I/O.
    Io,
}

impl FolioError {
    /// Classifies this error.
    ///
    /// [`FolioError::Browser`] is reported as a fetch failure since page
    /// sources are the only callers that let it escape; the PDF engine wraps
    /// its browser failures in [`FolioError::Conversion`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            FolioError::MissingUrl | FolioError::InvalidUrl(_) => ErrorKind::Validation,
            FolioError::HttpError(_)
            | FolioError::Timeout { .. }
            | FolioError::HttpStatus { .. }
            | FolioError::Browser(_) => ErrorKind::Fetch,
            FolioError::HtmlParseError(_) | FolioError::Serialization(_) => ErrorKind::Extraction,
            FolioError::Conversion(_) => ErrorKind::Conversion,
            FolioError::FileNotFound(_) | FolioError::WriteError(_) => ErrorKind::Io,
        }
    }

    /// Returns true for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

/// Result type alias for FolioError.
pub type Result<T> = std::result::Result<T, FolioError>;
