use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::FolioError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failures a handler reports to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,

    /// The URL did not parse or does not use http(s); the reason is passed on as `details`.
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    /// Retrieval or extraction failed; the message is passed on as `details`.
    #[error("Failed to scrape data: {0}")]
    Scrape(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::MissingUrl => ApiError::MissingUrl,
            FolioError::InvalidUrl(reason) => ApiError::InvalidUrl(reason),
            other => ApiError::Scrape(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingUrl => (StatusCode::BAD_REQUEST, ErrorBody { error: "URL is required", details: None }),
            ApiError::InvalidUrl(reason) => {
                (StatusCode::BAD_REQUEST, ErrorBody { error: "Invalid URL format", details: Some(reason) })
            }
            ApiError::Scrape(details) => {
                error!(error = %details, "scrape failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody { error: "Failed to scrape data", details: Some(details) },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
