use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use folio_core::{Report, build_report, fallback_report, validate_url};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Format actually delivered, `pdf` or `html`.
pub const REPORT_FORMAT_HEADER: HeaderName = HeaderName::from_static("x-report-format");
/// Present with value `true` when a PDF was attempted and HTML was delivered.
pub const REPORT_FALLBACK_HEADER: HeaderName = HeaderName::from_static("x-report-fallback");

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Scrapes the requested page and returns the report as a download.
///
/// A body that is missing, not JSON, or has no usable `url` is treated as a
/// missing URL.
pub async fn scrape_handler(
    State(state): State<AppState>, payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let url = match payload {
        Ok(Json(ScrapeRequest { url: Some(url) })) => url,
        Ok(_) => return Err(ApiError::MissingUrl),
        Err(rejection) => {
            debug!(error = %rejection, "unreadable scrape request body");
            return Err(ApiError::MissingUrl);
        }
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("scrape", %request_id);

    async move {
        let data = if state.extractor.launches_engine() {
            validate_url(&url)?;
            let Some(_permit) = state.engine_permit().await else {
                return Err(ApiError::Scrape(format!(
                    "no page engine became free within {} seconds",
                    state.engine_wait.as_secs()
                )));
            };
            state.extractor.extract(&url).await?
        } else {
            state.extractor.extract(&url).await?
        };

        let report = match state.pdf_engine.as_deref() {
            Some(engine) => match state.engine_permit().await {
                Some(_permit) => build_report(&data, Some(engine), &state.report_options).await,
                None => fallback_report(
                    &data,
                    &state.report_options,
                    format!("no rendering engine became free within {} seconds", state.engine_wait.as_secs()),
                ),
            },
            None => build_report(&data, None, &state.report_options).await,
        };

        info!(
            url = %data.url,
            format = %report.format,
            fallback = report.is_fallback(),
            bytes = report.body.len(),
            "report delivered"
        );

        Ok::<_, ApiError>(download(report))
    }
    .instrument(span)
    .await
}

fn download(report: Report) -> Response {
    let unix_millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let disposition = format!("attachment; filename=\"{}\"", report.filename(unix_millis));

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(report.content_type()));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(report.body.len()));
    headers.insert(REPORT_FORMAT_HEADER, HeaderValue::from_static(report.format.as_str()));
    if report.is_fallback() {
        headers.insert(REPORT_FALLBACK_HEADER, HeaderValue::from_static("true"));
    }
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(CONTENT_DISPOSITION, value);
    }

    (headers, report.body).into_response()
}
