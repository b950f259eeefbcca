use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use folio_core::{Extractor, PdfEngine, ReportOptions};
use tokio::sync::{Semaphore, SemaphorePermit};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::routes::{health_handler, scrape_handler};

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Extractor,
    pub pdf_engine: Option<Arc<dyn PdfEngine>>,
    /// Bounds the number of engine instances alive at once, for PDF
    /// rendering and browser fetches alike.
    pub engine_permits: Arc<Semaphore>,
    /// Longest a request waits for an engine permit.
    pub engine_wait: Duration,
    pub report_options: Arc<ReportOptions>,
}

impl AppState {
    pub fn new(extractor: Extractor, pdf_engine: Option<Arc<dyn PdfEngine>>, max_renders: usize) -> Self {
        let report_options = ReportOptions::default();
        Self {
            extractor,
            pdf_engine,
            engine_permits: Arc::new(Semaphore::new(max_renders.max(1))),
            engine_wait: report_options.pdf.timeout,
            report_options: Arc::new(report_options),
        }
    }

    /// Waits up to `engine_wait` for an engine permit; `None` when none frees up.
    pub async fn engine_permit(&self) -> Option<SemaphorePermit<'_>> {
        tokio::time::timeout(self.engine_wait, self.engine_permits.acquire())
            .await
            .ok()
            .and_then(|acquired| acquired.ok())
    }

    /// Builds the page source and PDF engine named by `config`.
    pub fn from_config(config: &Config) -> folio_core::Result<Self> {
        let extractor = Extractor::from_config(config.source, &config.fetch)?;
        let pdf_engine = if config.pdf_enabled { pdf_engine(config) } else { None };

        info!(
            source = extractor.source_name(),
            pdf = pdf_engine.as_ref().map(|e| e.name()).unwrap_or("disabled"),
            max_renders = config.max_renders,
            "application state ready"
        );

        Ok(Self::new(extractor, pdf_engine, config.max_renders))
    }
}

#[cfg(feature = "browser")]
fn pdf_engine(config: &Config) -> Option<Arc<dyn PdfEngine>> {
    Some(Arc::new(folio_core::ChromiumPdfEngine::new(config.chrome_path.clone())))
}

#[cfg(not(feature = "browser"))]
fn pdf_engine(_config: &Config) -> Option<Arc<dyn PdfEngine>> {
    tracing::warn!("PDF output requested but the `browser` feature is disabled; reports will be HTML");
    None
}

/// Builds the router: API routes, static files, and the middleware stack.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let static_files = ServeDir::new(&config.static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/api/scrape", post(scrape_handler))
        .route("/api/health", get(health_handler))
        .fallback_service(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
