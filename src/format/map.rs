//! Map view output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::MapView;
use crate::results::SearchResponse;

/// Map formatter - the widget-ready map view as JSON
pub struct MapFormatter;

impl OutputFormatter for MapFormatter {
    fn name(&self) -> &str {
        "map"
    }

    fn description(&self) -> &str {
        "Map view JSON for the Maps JavaScript widget"
    }

    fn format(&self, response: &SearchResponse, config: &Config) -> Result<String> {
        let key = config.maps_js_key();
        let view = MapView::build(&response.results, &config.map, key.as_deref())?;
        Ok(serde_json::to_string_pretty(&view)?)
    }
}
