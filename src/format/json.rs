//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::results::SearchResponse;

/// JSON formatter - outputs full response as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON response"
    }

    fn format(&self, response: &SearchResponse, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(response)?)
    }
}
