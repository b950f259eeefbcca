use crate::Result;
use crate::model::ScrapedData;
use serde::Serialize;

/// Counts of each extracted collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonSummary {
    pub headings: usize,
    pub links: usize,
    pub images: usize,
    pub paragraphs: usize,
    pub lists: usize,
}

impl From<&ScrapedData> for JsonSummary {
    fn from(data: &ScrapedData) -> Self {
        let headings = &data.headings;
        Self {
            headings: headings.h1.len() + headings.h2.len() + headings.h3.len(),
            links: data.links.len(),
            images: data.images.len(),
            paragraphs: data.paragraphs.len(),
            lists: data.lists.len(),
        }
    }
}

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    data: &'a ScrapedData,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<JsonSummary>,
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Append a `summary` object with collection counts
    pub include_summary: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Convert a scraped record to JSON
pub fn convert_to_json(data: &ScrapedData, config: &JsonConfig) -> Result<String> {
    let output = JsonOutput { data, summary: config.include_summary.then(|| JsonSummary::from(data)) };

    if config.pretty { Ok(serde_json::to_string_pretty(&output)?) } else { Ok(serde_json::to_string(&output)?) }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, data: &ScrapedData) -> Result<String> {
        convert_to_json(data, &self.config)
    }
}
