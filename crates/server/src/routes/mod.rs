mod health;
mod scrape;

pub use health::{HealthResponse, health_handler};
pub use scrape::{REPORT_FALLBACK_HEADER, REPORT_FORMAT_HEADER, ScrapeRequest, scrape_handler};
