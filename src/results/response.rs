//! Completed search as returned by the API and written by the CLI

use crate::coord::Coordinates;
use crate::results::{sort_results, SortKey};
use crate::search::{Category, DisplayLocation, SearchQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What was searched for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySummary {
    /// Geocoded address, when the search started from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub location: Coordinates,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub id: Uuid,
    pub query: QuerySummary,
    /// Sorted by `sort`
    pub results: Vec<DisplayLocation>,
    pub count: usize,
    pub sort: SortKey,
    pub searched_at: DateTime<Utc>,
}

impl SearchResponse {
    pub fn new(
        query: SearchQuery,
        address: Option<String>,
        results: &[DisplayLocation],
        sort: SortKey,
    ) -> Self {
        let results = sort_results(results, sort);
        Self {
            id: Uuid::new_v4(),
            query: QuerySummary {
                address,
                location: query.location,
                category: query.category,
            },
            count: results.len(),
            results,
            sort,
            searched_at: Utc::now(),
        }
    }
}
