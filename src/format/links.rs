//! Directions link output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::results::SearchResponse;

/// Links formatter - one directions URL per result, one per line
pub struct LinksFormatter;

impl LinksFormatter {
    /// Format links with optional provider override
    pub fn format_with_provider(
        &self,
        response: &SearchResponse,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let mut output = String::new();
        for location in &response.results {
            let url = config.format_url(
                provider,
                location.coordinates.lat,
                location.coordinates.lng,
            )?;
            output.push_str(&format!("{}\t{}\n", location.name, url));
        }
        Ok(output)
    }
}

impl OutputFormatter for LinksFormatter {
    fn name(&self) -> &str {
        "links"
    }

    fn description(&self) -> &str {
        "Directions link per result"
    }

    fn format(&self, response: &SearchResponse, config: &Config) -> Result<String> {
        self.format_with_provider(response, config, None)
    }
}
