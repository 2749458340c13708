//! Places API backend (Nearby Search and Place Details)
//!
//! Only the first page of nearby results is read; `next_page_token` is ignored.

use super::GoogleMapsClient;
use crate::error::Result;
use crate::search::places::{NearbyRequest, PlaceDetails, PlacesBackend, RawPlace};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct NearbyBody {
    #[serde(default)]
    results: Vec<RawPlace>,
}

#[derive(Debug, Deserialize)]
struct DetailsBody {
    #[serde(default)]
    result: Option<PlaceDetails>,
}

impl PlacesBackend for GoogleMapsClient {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<Vec<RawPlace>> {
        let location = request.location.to_query_value();
        let radius = request.radius_meters.to_string();

        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("keyword", request.keyword.as_str()),
        ];
        if let Some(place_type) = &request.place_type {
            params.push(("type", place_type.as_str()));
        }

        let body: NearbyBody = self
            .get_json("Places", "place/nearbysearch/json", &params, true)
            .await?;
        Ok(body.results)
    }

    async fn place_details(&self, place_id: &str, fields: &[&str]) -> Result<PlaceDetails> {
        let fields = fields.join(",");
        let body: DetailsBody = self
            .get_json(
                "Place Details",
                "place/details/json",
                &[("place_id", place_id), ("fields", fields.as_str())],
                false,
            )
            .await?;
        Ok(body.result.unwrap_or_default())
    }
}
