//! Two-phase nearby search with merge and detail enrichment
//!
//! 1. Primary search restricted to establishments.
//! 2. If that comes back sparse, a broader untyped search with the same
//!    center, radius and keyword; its new ids are appended.
//! 3. Every surviving record gets a distance and, via a bounded batch of
//!    detail lookups, a website.

use crate::config::SearchConfig;
use crate::constants::place_types::ESTABLISHMENT;
use crate::coord::distance::distance_or_zero;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::search::places::{NearbyRequest, PlacesBackend, RawPlace, DETAIL_FIELDS};
use crate::search::record::{DisplayLocation, EnrichedPlace};
use crate::search::SearchQuery;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Tunables for one orchestrator
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub radius_meters: u32,
    /// Primary count below which the secondary search runs
    pub min_results: usize,
    /// Detail lookups in flight at once
    pub detail_concurrency: usize,
    pub establishment_type: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            radius_meters: config.radius_meters,
            min_results: config.min_results,
            detail_concurrency: config.detail_concurrency.max(1),
            establishment_type: ESTABLISHMENT.to_string(),
        }
    }
}

/// Runs the nearby-search pipeline against a [`PlacesBackend`]
pub struct SearchOrchestrator<'a, P> {
    places: &'a P,
    settings: SearchSettings,
}

impl<'a, P: PlacesBackend> SearchOrchestrator<'a, P> {
    pub fn new(places: &'a P, settings: SearchSettings) -> Self {
        Self { places, settings }
    }

    /// Search around the query location for the query category
    ///
    /// A failed primary search fails the whole search; a failed secondary
    /// search falls back to the primary results.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<DisplayLocation>> {
        let category = query.category;
        let primary_request =
            NearbyRequest::new(query.location, self.settings.radius_meters, category.keyword())
                .with_type(self.settings.establishment_type.clone());

        let primary = self.places.nearby_search(&primary_request).await?;
        info!(%category, count = primary.len(), "primary search complete");

        let merged = if primary.len() < self.settings.min_results {
            match self.places.nearby_search(&primary_request.without_type()).await {
                Ok(secondary) => {
                    let before = primary.len();
                    let merged = merge_results(primary, secondary);
                    info!(
                        %category,
                        added = merged.len() - before,
                        "secondary search merged"
                    );
                    merged
                }
                Err(e) => {
                    warn!(%category, error = %e, "secondary search failed, keeping primary results");
                    merge_results(primary, Vec::new())
                }
            }
        } else {
            // Dense primary pages still get deduplicated
            merge_results(primary, Vec::new())
        };

        let enriched = self.enrich(query.location, merged).await;

        Ok(enriched
            .into_iter()
            .map(|place| place.into_display(category))
            .collect())
    }

    /// Attach distance and website to every record, preserving order
    async fn enrich(&self, origin: Coordinates, places: Vec<RawPlace>) -> Vec<EnrichedPlace> {
        stream::iter(places)
            .map(|place| async move {
                let distance = distance_or_zero(origin, place.location());
                let website = self.website_for(&place).await;
                EnrichedPlace {
                    place,
                    distance_meters: distance,
                    website,
                }
            })
            .buffered(self.settings.detail_concurrency.max(1))
            .collect()
            .await
    }

    /// Website for one place; lookup failures leave it unset
    async fn website_for(&self, place: &RawPlace) -> Option<String> {
        let place_id = place.place_id.as_deref()?;

        match self.places.place_details(place_id, &DETAIL_FIELDS).await {
            Ok(details) => details.best_link(),
            Err(e) => {
                debug!(place_id, error = %e, "detail lookup failed");
                None
            }
        }
    }
}

/// Append the secondary records whose id has not been seen yet
///
/// Primary records keep their order and come first. A record with no id is
/// never considered a duplicate.
pub fn merge_results(primary: Vec<RawPlace>, secondary: Vec<RawPlace>) -> Vec<RawPlace> {
    let mut seen: HashSet<String> = HashSet::with_capacity(primary.len() + secondary.len());
    let mut merged = Vec::with_capacity(primary.len() + secondary.len());

    for place in primary.into_iter().chain(secondary) {
        match &place.place_id {
            Some(id) if !seen.insert(id.clone()) => continue,
            _ => merged.push(place),
        }
    }

    merged
}
