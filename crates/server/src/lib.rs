//! HTTP front end for Folio.
//!
//! `POST /api/scrape` takes `{"url": "..."}`, scrapes the page, and answers
//! with the report as a download: a PDF when the rendering engine succeeds,
//! otherwise the HTML report. `GET /api/health` is a liveness probe. Any other
//! path is served from the configured static directory.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;

pub use app::{AppState, build_app};
pub use config::Config;
pub use error::ApiError;
