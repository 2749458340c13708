//! Address geocoder with a precision filter
//!
//! Only results tagged at street, premise or postcode level are accepted;
//! a whole-town match would make a "nearby" search meaningless.

use crate::constants::place_types::PRECISE_GEOCODE_TYPES;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation};
use tracing::{debug, warn};

/// Whether a geocode result's type tags are precise enough to search around
pub fn is_precise(types: &[String]) -> bool {
    types
        .iter()
        .any(|t| PRECISE_GEOCODE_TYPES.contains(&t.as_str()))
}

/// Country-restricted geocoder over any [`GeoBackend`]
pub struct Geocoder<'a, G> {
    backend: &'a G,
    country: String,
}

impl<'a, G: GeoBackend> Geocoder<'a, G> {
    pub fn new(backend: &'a G, country: impl Into<String>) -> Self {
        Self {
            backend,
            country: country.into(),
        }
    }

    /// Resolve free-text input to a precise location
    ///
    /// Empty input fails before any call is made. There is no retry.
    pub async fn locate(&self, address: &str) -> Result<GeoLocation> {
        let address = address.trim();
        if address.is_empty() {
            return Err(Error::EmptyAddress);
        }

        let candidates = match self.backend.geocode(address, &self.country).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(address, error = %e, "geocoding failed");
                return Err(Error::LocationNotFound(address.to_string()));
            }
        };

        let top = candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::LocationNotFound(address.to_string()))?;

        if !is_precise(&top.types) {
            debug!(address, types = ?top.types, "geocode result too coarse");
            return Err(Error::ImpreciseLocation(address.to_string()));
        }

        Ok(GeoLocation {
            lat: top.location.lat,
            lng: top.location.lng,
            display_name: top.formatted_address,
        })
    }

    /// Formatted address for a point, used to fill in the address field
    pub async fn address_for(&self, location: Coordinates) -> Result<String> {
        location.validate()?;

        let not_found = || Error::AddressNotFound {
            lat: location.lat,
            lng: location.lng,
        };

        match self.backend.reverse_geocode(location).await {
            Ok(candidates) => candidates
                .into_iter()
                .next()
                .map(|c| c.formatted_address)
                .ok_or_else(not_found),
            Err(e) => {
                warn!(lat = location.lat, lng = location.lng, error = %e, "reverse geocoding failed");
                Err(not_found())
            }
        }
    }
}
