//! Result presentation
//!
//! Sorting, list/map view selection and the per-result action links.
//! Nothing here fetches: toggling sort or view only re-renders the stored set.

pub mod response;

use crate::config::Config;
use crate::coord::distance::parse_miles;
use crate::error::{Error, Result};
use crate::search::DisplayLocation;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use response::{QuerySummary, SearchResponse};

/// Sort order for the result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Distance,
    Rating,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Distance => write!(f, "distance"),
            Self::Rating => write!(f, "rating"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "rating" => Ok(Self::Rating),
            other => Err(Error::Config(format!("Unknown sort key: {}", other))),
        }
    }
}

/// Which presentation is showing; exactly one at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::List => Self::Map,
            Self::Map => Self::List,
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "map" => Ok(Self::Map),
            other => Err(Error::Config(format!("Unknown view: {}", other))),
        }
    }
}

/// Sorted copy of `locations`; the input is left as it was
///
/// Rating sorts descending with unrated entries after every rated one. Distance sorts
/// ascending on the leading number of "N.N miles", with missing or garbled
/// values counted as 0. Equal keys keep their incoming order.
pub fn sort_results(locations: &[DisplayLocation], key: SortKey) -> Vec<DisplayLocation> {
    let mut sorted = locations.to_vec();

    match key {
        SortKey::Rating => sorted.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::Distance => sorted.sort_by(|a, b| {
            distance_value(a)
                .partial_cmp(&distance_value(b))
                .unwrap_or(Ordering::Equal)
        }),
    }

    sorted
}

fn distance_value(location: &DisplayLocation) -> f64 {
    location.distance.as_deref().map(parse_miles).unwrap_or(0.0)
}

/// Directions link for one result using the configured provider
pub fn directions_url(config: &Config, location: &DisplayLocation) -> Result<String> {
    config.format_url(None, location.coordinates.lat, location.coordinates.lng)
}

/// Website link, with a scheme added when the stored value has none
pub fn website_url(location: &DisplayLocation) -> Option<String> {
    location.website.as_deref().map(|site| {
        if site.starts_with("http") {
            site.to_string()
        } else {
            format!("https://{}", site)
        }
    })
}
