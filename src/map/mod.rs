//! Map view model
//!
//! Everything the Maps JavaScript widget needs to draw a result set: center,
//! zoom, styled markers with info windows, and the viewport to fit. The
//! front end only replays this onto `google.maps`.

use crate::config::MapConfig;
use crate::constants::api::GOOGLE_MAPS_JS_URL;
use crate::coord::{Bounds, Coordinates};
use crate::error::{Error, Result};
use crate::search::DisplayLocation;
use serde::{Deserialize, Serialize};

const MARKER_FILL: &str = "#FF1493";
const MARKER_STROKE: &str = "#FFFFFF";

/// One entry of the widget's `styles` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyle {
    pub feature_type: String,
    pub element_type: String,
    pub stylers: Vec<Styler>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Styler {
    pub color: String,
}

/// Circle symbol drawn for each marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub scale: u8,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_weight: u8,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            scale: 8,
            fill_color: MARKER_FILL.to_string(),
            fill_opacity: 1.0,
            stroke_color: MARKER_STROKE.to_string(),
            stroke_weight: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: String,
    pub position: Coordinates,
    pub title: String,
    /// Info window content; every interpolated value is escaped
    pub info_html: String,
    pub icon: MarkerIcon,
}

impl MapMarker {
    pub fn for_location(location: &DisplayLocation) -> Self {
        Self {
            id: location.id.clone(),
            position: location.coordinates,
            title: location.name.clone(),
            info_html: info_window_html(location),
            icon: MarkerIcon::default(),
        }
    }
}

/// Ready-to-draw map for a result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    /// Only present when there is at least one marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_bounds: Option<Bounds>,
    pub styles: Vec<MapStyle>,
    /// Widget loader URL including the browser key
    pub script_url: String,
}

impl MapView {
    /// Build the view for `locations` in their current order
    ///
    /// Fails with [`Error::MapUnavailable`] when no browser key is available,
    /// since the widget cannot load without one.
    pub fn build(
        locations: &[DisplayLocation],
        settings: &MapConfig,
        maps_js_key: Option<&str>,
    ) -> Result<Self> {
        let key = maps_js_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::MapUnavailable("no Maps JavaScript key configured".to_string()))?;

        let center = locations
            .first()
            .map(|l| l.coordinates)
            .unwrap_or_else(|| Coordinates::new(settings.default_lat, settings.default_lng));

        Ok(Self {
            center,
            zoom: settings.zoom,
            markers: locations.iter().map(MapMarker::for_location).collect(),
            fit_bounds: Bounds::containing(locations.iter().map(|l| l.coordinates)),
            styles: dark_style(),
            script_url: script_url(key),
        })
    }
}

/// Loader URL for the Maps JavaScript widget
pub fn script_url(key: &str) -> String {
    format!("{}?key={}", GOOGLE_MAPS_JS_URL, urlencoding::encode(key))
}

/// The dark theme applied to every map
pub fn dark_style() -> Vec<MapStyle> {
    [
        ("geometry", "#242f3e"),
        ("labels.text.fill", "#746855"),
        ("labels.text.stroke", "#242f3e"),
    ]
    .into_iter()
    .map(|(element, color)| MapStyle {
        feature_type: "all".to_string(),
        element_type: element.to_string(),
        stylers: vec![Styler {
            color: color.to_string(),
        }],
    })
    .collect()
}

fn info_window_html(location: &DisplayLocation) -> String {
    let mut html = format!(
        concat!(
            r#"<div style="color: black; padding: 8px;">"#,
            r#"<h3 style="color: {fill}; margin: 0 0 4px; font-weight: bold;">{name}</h3>"#,
            r#"<p style="margin: 0 0 4px;">{address}</p>"#,
            r#"<p style="margin: 0; color: #666;">{category}</p>"#,
        ),
        fill = MARKER_FILL,
        name = escape_html(&location.name),
        address = escape_html(&location.address),
        category = escape_html(&location.category),
    );
    if let Some(distance) = &location.distance {
        html.push_str(&format!(
            r#"<p style="margin: 4px 0 0; color: #666;">{} away</p>"#,
            escape_html(distance)
        ));
    }
    html.push_str("</div>");
    html
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
