//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::results::{directions_url, website_url, SearchResponse};

/// Text formatter - numbered result list with links
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable result list"
    }

    fn format(&self, response: &SearchResponse, config: &Config) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&format!("{} near ", response.query.category));
        match &response.query.address {
            Some(address) => output.push_str(address),
            None => output.push_str(&format!(
                "({:.6}, {:.6})",
                response.query.location.lat, response.query.location.lng
            )),
        }
        output.push('\n');
        output.push_str(&format!(
            "{} result{}, sorted by {}\n",
            response.count,
            if response.count == 1 { "" } else { "s" },
            response.sort
        ));

        if response.results.is_empty() {
            output.push_str("\nNo locations found. Try another search.\n");
            return Ok(output);
        }

        for (i, location) in response.results.iter().enumerate() {
            output.push('\n');
            output.push_str(&format!("{:>2}. {}\n", i + 1, location.name));
            if !location.address.is_empty() {
                output.push_str(&format!("    {}\n", location.address));
            }

            let mut facts = Vec::new();
            if let Some(distance) = &location.distance {
                facts.push(distance.clone());
            }
            if let Some(rating) = location.rating {
                facts.push(format!("rated {:.1}", rating));
            }
            if !facts.is_empty() {
                output.push_str(&format!("    {}\n", facts.join(" · ")));
            }

            output.push_str(&format!("    Directions: {}\n", directions_url(config, location)?));
            if let Some(site) = website_url(location) {
                output.push_str(&format!("    Website: {}\n", site));
            }
        }

        Ok(output)
    }
}
