//! Google Maps Platform REST client
//!
//! One HTTP client serves the Geocoding, Nearby Search and Place Details
//! endpoints. Every response carries a `status` field in its JSON envelope;
//! anything other than `OK` is surfaced as [`Error::Vendor`].

mod geocode;
mod places;

use crate::config::Config;
use crate::constants::api::GOOGLE_MAPS_API_URL;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("gay2z/", env!("CARGO_PKG_VERSION"));

/// Status meaning "request fine, nothing matched"
pub(crate) const ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Client for the Google Maps REST APIs
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Status envelope shared by every endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(flatten)]
    body: T,
}

impl GoogleMapsClient {
    /// Create a client pointed at the production API
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(api_key, timeout_secs, GOOGLE_MAPS_API_URL)
    }

    /// Create a client with a custom base URL (mock servers in tests)
    pub fn with_base_url(
        api_key: impl Into<String>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from configuration
    ///
    /// Fails when no server-side key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.google_api_key().ok_or_else(|| {
            Error::Config(
                "No Google API key configured. Set api_keys.google or GOOGLE_MAPS_API_KEY"
                    .to_string(),
            )
        })?;
        Self::new(api_key, config.search.request_timeout_secs)
    }

    /// Build an endpoint URL with encoded query parameters and the key
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}?", self.base_url, path);
        for (name, value) in params {
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            url.push('&');
        }
        url.push_str("key=");
        url.push_str(&urlencoding::encode(&self.api_key));
        url
    }

    /// GET an endpoint and unwrap its status envelope
    ///
    /// `ZERO_RESULTS` is passed through as success when `allow_zero` is set.
    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        path: &str,
        params: &[(&str, &str)],
        allow_zero: bool,
    ) -> Result<T> {
        let url = self.endpoint(path, params);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let envelope: Envelope<T> = serde_json::from_slice(&response.bytes().await?)?;

        debug!(service, status = %envelope.status, "vendor response");

        check_status(
            service,
            envelope.status,
            envelope.error_message,
            allow_zero,
        )?;
        Ok(envelope.body)
    }
}

fn check_status(
    service: &'static str,
    status: String,
    message: Option<String>,
    allow_zero: bool,
) -> Result<()> {
    if status == "OK" || (allow_zero && status == ZERO_RESULTS) {
        Ok(())
    } else {
        Err(Error::Vendor {
            service,
            status,
            message,
        })
    }
}
