//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::escape_html as escape_xml;
use crate::results::{website_url, SearchResponse};

/// GPX formatter - one waypoint per result plus the search center
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, response: &SearchResponse, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="gay2z">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!(
            "    <name>{}</name>\n",
            escape_xml(response.query.category.display_name())
        ));
        gpx.push_str(&format!(
            "    <time>{}</time>\n",
            response.searched_at.to_rfc3339()
        ));
        gpx.push_str("  </metadata>\n");

        // Center waypoint
        let center = response.query.location;
        gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, center.lat, center.lng));
        gpx.push('\n');
        gpx.push_str("    <name>Search center</name>\n");
        if let Some(address) = &response.query.address {
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(address)));
        }
        gpx.push_str("  </wpt>\n");

        // Result waypoints
        for location in &response.results {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                location.coordinates.lat, location.coordinates.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&location.name)));

            let mut desc = location.address.clone();
            if let Some(distance) = &location.distance {
                if !desc.is_empty() {
                    desc.push_str(", ");
                }
                desc.push_str(&format!("{} away", distance));
            }
            if !desc.is_empty() {
                gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(&desc)));
            }

            if let Some(site) = website_url(location) {
                gpx.push_str(&format!(r#"    <link href="{}"/>"#, escape_xml(&site)));
                gpx.push('\n');
            }
            gpx.push_str(&format!("    <type>{}</type>\n", escape_xml(&location.category)));

            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
