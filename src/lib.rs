//! gay2z: find LGBTQ+ venues and services near an address
//!
//! A library, CLI and small web app that geocodes an address, runs a
//! two-phase nearby search against the Google Maps Platform, and presents
//! the merged results as a sortable list or a map.
//!
//! ## Features
//!
//! - Country-restricted geocoding with a street/postcode precision filter
//! - Primary establishment search with a broader fallback when sparse
//! - Dedup by place id, great-circle distances, bounded website lookups
//! - List/map presentation, directions links, GPX and JSON output
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use gay2z::coord::{distance, Coordinates};
//! use gay2z::results::{sort_results, SortKey};
//!
//! let downing_street = Coordinates::new(51.5034, -0.1276);
//! let soho = Coordinates::new(51.5136, -0.1365);
//!
//! let meters = distance::haversine_distance(downing_street, soho);
//! println!("{}", distance::format_miles(meters));
//!
//! // Sorting never touches the stored result set
//! let sorted = sort_results(&[], SortKey::Rating);
//! assert!(sorted.is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod form;
pub mod format;
pub mod geo;
pub mod google;
pub mod map;
pub mod results;
pub mod search;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use google::GoogleMapsClient;
pub use search::{Category, DisplayLocation, SearchQuery};
