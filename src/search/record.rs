//! Result records at each stage of the pipeline

use crate::coord::distance::format_miles;
use crate::coord::Coordinates;
use crate::search::places::RawPlace;
use crate::search::Category;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vendor place plus the fields the orchestrator computes
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPlace {
    pub place: RawPlace,
    /// Great-circle distance from the search center; zero without geometry
    pub distance_meters: f64,
    pub website: Option<String>,
}

impl EnrichedPlace {
    pub fn new(place: RawPlace, distance_meters: f64) -> Self {
        Self {
            place,
            distance_meters,
            website: None,
        }
    }

    /// Final shape handed to presentation
    ///
    /// The category is always the one searched for, whatever the vendor's
    /// own tags say.
    pub fn into_display(self, category: Category) -> DisplayLocation {
        let coordinates = self
            .place
            .location()
            .unwrap_or_else(|| Coordinates::new(0.0, 0.0));

        DisplayLocation {
            id: self
                .place
                .place_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self
                .place
                .name
                .unwrap_or_else(|| "Unknown Location".to_string()),
            category: category.display_name().to_string(),
            address: self.place.vicinity.unwrap_or_default(),
            distance: Some(format_miles(self.distance_meters)),
            rating: self.place.rating,
            website: self.website,
            coordinates,
        }
    }
}

/// One search result as the list and map render it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayLocation {
    pub id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    /// "N.N miles"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub coordinates: Coordinates,
}
