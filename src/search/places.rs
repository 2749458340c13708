//! Nearby-search and place-detail types
//!
//! Request and response shapes for the places service, plus the trait the
//! orchestrator searches through.

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Parameters for one nearby search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyRequest {
    pub location: Coordinates,
    pub radius_meters: u32,
    pub keyword: String,
    /// Vendor place-type restriction, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
}

impl NearbyRequest {
    pub fn new(location: Coordinates, radius_meters: u32, keyword: impl Into<String>) -> Self {
        Self {
            location,
            radius_meters,
            keyword: keyword.into(),
            place_type: None,
        }
    }

    /// Restrict the search to one place type
    pub fn with_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = Some(place_type.into());
        self
    }

    /// Same search with the type restriction removed
    pub fn without_type(&self) -> Self {
        Self {
            place_type: None,
            ..self.clone()
        }
    }
}

/// Geometry block of a vendor place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceGeometry {
    pub location: Coordinates,
}

/// A place exactly as the nearby search returned it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlace {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Rough address
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl RawPlace {
    /// Coordinates of the place, if the vendor supplied geometry
    pub fn location(&self) -> Option<Coordinates> {
        self.geometry.as_ref().map(|g| g.location)
    }
}

/// The two detail fields the enrichment step asks for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub website: Option<String>,
    /// Vendor's own page for the place
    #[serde(default)]
    pub url: Option<String>,
}

impl PlaceDetails {
    /// Website, falling back to the vendor page
    pub fn best_link(self) -> Option<String> {
        self.website
            .filter(|w| !w.is_empty())
            .or(self.url.filter(|u| !u.is_empty()))
    }
}

/// Detail fields requested for every result
pub const DETAIL_FIELDS: [&str; 2] = ["website", "url"];

/// Trait for places backends
pub trait PlacesBackend: Send + Sync {
    /// Run one nearby search
    ///
    /// An empty match set is `Ok(vec![])`; any other non-OK vendor status is an error.
    fn nearby_search(
        &self,
        request: &NearbyRequest,
    ) -> impl std::future::Future<Output = Result<Vec<RawPlace>>> + Send;

    /// Look up the requested detail fields of one place
    fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> impl std::future::Future<Output = Result<PlaceDetails>> + Send;
}
