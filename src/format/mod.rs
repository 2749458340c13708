//! Output formatters
//!
//! Provides trait-based output formatting for search responses.

pub mod gpx;
pub mod json;
pub mod links;
pub mod map;
pub mod text;

use crate::config::Config;
use crate::error::Result;
use crate::results::SearchResponse;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a search response
    ///
    /// Results are rendered in the order the response holds them.
    fn format(&self, response: &SearchResponse, config: &Config) -> Result<String>;
}

const FORMATTERS: [(&str, &str); 5] = [
    ("text", "Human-readable result list"),
    ("json", "Full JSON response"),
    ("gpx", "GPX waypoint file"),
    ("links", "Directions link per result"),
    ("map", "Map view JSON for the Maps JavaScript widget"),
];

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "links" => Some(Box::new(links::LinksFormatter)),
        "map" => Some(Box::new(map::MapFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    FORMATTERS
        .iter()
        .map(|(name, description)| FormatInfo {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}
