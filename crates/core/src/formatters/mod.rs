pub mod html;
pub mod json;

pub use html::{HtmlFormatter, HtmlReportConfig, escape_html, render_report, render_report_with_config};
pub use json::{JsonConfig, JsonFormatter, convert_to_json};
