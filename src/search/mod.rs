//! Nearby search
//!
//! - Fixed category list and the vendor keyword for each
//! - Places backend trait and vendor record shapes
//! - The two-phase search, merge and enrichment pipeline

pub mod category;
pub mod orchestrator;
pub mod places;
pub mod record;

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

pub use category::{available_categories, Category};
pub use orchestrator::{SearchOrchestrator, SearchSettings};
pub use record::DisplayLocation;

/// A geocoded center plus the category to look for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub location: Coordinates,
    pub category: Category,
}

impl SearchQuery {
    pub fn new(location: Coordinates, category: Category) -> Self {
        Self { location, category }
    }
}
