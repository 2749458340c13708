//! Geocoding module
//!
//! Provides geocoding (address to coordinates), reverse geocoding for the
//! "use my location" autofill, and IP geolocation for the CLI.

pub mod geocoder;
pub mod ip_location;

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use geocoder::{is_precise, Geocoder};

/// A geocoded location result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// One match returned by a geocoding backend, best match first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub formatted_address: String,
    pub location: Coordinates,
    /// Vendor place-type tags (e.g. "street_address", "locality")
    pub types: Vec<String>,
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode an address, restricted to one country
    ///
    /// Any non-OK vendor status (including no match) is an error.
    fn geocode(
        &self,
        address: &str,
        country: &str,
    ) -> impl std::future::Future<Output = Result<Vec<GeocodeCandidate>>> + Send;

    /// Reverse geocode coordinates to candidate addresses
    fn reverse_geocode(
        &self,
        location: Coordinates,
    ) -> impl std::future::Future<Output = Result<Vec<GeocodeCandidate>>> + Send;
}

/// Get the IP location service
pub fn get_ip_locator() -> ip_location::IpLocator {
    ip_location::IpLocator::new()
}
