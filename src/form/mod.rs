//! Search form
//!
//! Validates the address and category, geocodes the address through the
//! precision filter, then debounces before handing a [`SearchQuery`] on.

pub mod debounce;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation, Geocoder};
use crate::search::{Category, SearchQuery};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use debounce::Debouncer;

/// Address and category as entered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub category: Option<Category>,
}

/// A submission that survived validation, geocoding and the debounce
#[derive(Debug, Clone)]
pub struct Submission {
    pub query: SearchQuery,
    /// Address as the geocoder formatted it
    pub resolved: GeoLocation,
}

impl SearchForm {
    pub fn new(address: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            address: address.into(),
            category,
        }
    }

    /// Check the inputs without making any call
    ///
    /// Returns the trimmed address and the chosen category.
    pub fn validate(&self) -> Result<(&str, Category)> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(Error::EmptyAddress);
        }
        let category = self.category.ok_or(Error::MissingCategory)?;
        Ok((address, category))
    }

    /// Validate, geocode, then wait out the debounce window
    ///
    /// The returned submission is ready to dispatch to the orchestrator. A
    /// newer submission arriving during the window makes this one fail with
    /// [`Error::Superseded`].
    pub async fn submit<G: GeoBackend>(
        &self,
        geocoder: &Geocoder<'_, G>,
        debouncer: &Debouncer,
    ) -> Result<Submission> {
        let (address, category) = self.validate()?;
        let resolved = geocoder.locate(address).await?;

        debouncer.settle().await?;

        info!(%category, address = %resolved.display_name, "dispatching search");
        Ok(Submission {
            query: SearchQuery::new(resolved.coordinates(), category),
            resolved,
        })
    }
}

/// Fill the address field from the device position
pub async fn use_my_location<G: GeoBackend>(
    geocoder: &Geocoder<'_, G>,
    position: Coordinates,
) -> Result<String> {
    geocoder.address_for(position).await
}
