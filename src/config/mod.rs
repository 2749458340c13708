//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/gay2z/config.toml

pub mod defaults;

use crate::constants::api::GOOGLE_API_KEY_ENV;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search pipeline settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Map view settings
    #[serde(default)]
    pub map: MapConfig,

    /// Directions URL settings
    #[serde(default)]
    pub url: UrlConfig,

    /// API keys for the mapping service
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Search pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Country every geocode is restricted to
    #[serde(default = "default_country")]
    pub country: String,

    /// Nearby search radius in meters
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,

    /// Primary result count below which the secondary search runs
    #[serde(default = "default_min_results")]
    pub min_results: usize,

    /// Maximum concurrent place-detail lookups
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,

    /// Submission debounce window
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// HTTP timeout for each vendor call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Map view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_map_lat")]
    pub default_lat: f64,

    #[serde(default = "default_map_lng")]
    pub default_lng: f64,

    #[serde(default = "default_map_zoom")]
    pub zoom: u8,
}

/// Directions URL settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default directions provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// Provider name -> template with {lat} and {lng} placeholders
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

/// API keys
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    /// Server-side key for Geocoding, Nearby Search and Place Details
    #[serde(default)]
    pub google: String,

    /// Browser key for the Maps JavaScript widget (falls back to `google`)
    #[serde(default)]
    pub maps_js: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}
fn default_radius_meters() -> u32 {
    DEFAULT_RADIUS_METERS
}
fn default_min_results() -> usize {
    DEFAULT_MIN_RESULTS
}
fn default_detail_concurrency() -> usize {
    DEFAULT_DETAIL_CONCURRENCY
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_map_lat() -> f64 {
    DEFAULT_MAP_LAT
}
fn default_map_lng() -> f64 {
    DEFAULT_MAP_LNG
}
fn default_map_zoom() -> u8 {
    DEFAULT_MAP_ZOOM
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/dir/?api=1&destination={lat},{lng}".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/directions?route=%3B{lat}%2C{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?daddr={lat},{lng}".to_string(),
    );
    providers
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            radius_meters: default_radius_meters(),
            min_results: default_min_results(),
            detail_concurrency: default_detail_concurrency(),
            debounce_ms: default_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_lat: default_map_lat(),
            default_lng: default_map_lng(),
            zoom: default_map_zoom(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key". API keys are never echoed back.
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["search", "country"] => Some(self.search.country.clone()),
            ["search", "radius_meters"] => Some(self.search.radius_meters.to_string()),
            ["search", "min_results"] => Some(self.search.min_results.to_string()),
            ["search", "detail_concurrency"] => Some(self.search.detail_concurrency.to_string()),
            ["search", "debounce_ms"] => Some(self.search.debounce_ms.to_string()),
            ["search", "request_timeout_secs"] => {
                Some(self.search.request_timeout_secs.to_string())
            }

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["map", "default_lat"] => Some(self.map.default_lat.to_string()),
            ["map", "default_lng"] => Some(self.map.default_lng.to_string()),
            ["map", "zoom"] => Some(self.map.zoom.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            ["api_keys", "google"] => Some(mask(&self.api_keys.google)),
            ["api_keys", "maps_js"] => Some(mask(&self.api_keys.maps_js)),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["search", "country"] => {
                if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(Error::Config(format!(
                        "Country must be a two-letter code: {}",
                        value
                    )));
                }
                self.search.country = value.to_lowercase();
            }
            ["search", "radius_meters"] => {
                self.search.radius_meters = parse_value(value, "radius")?;
            }
            ["search", "min_results"] => {
                self.search.min_results = parse_value(value, "min_results")?;
            }
            ["search", "detail_concurrency"] => {
                let n: usize = parse_value(value, "concurrency")?;
                if n == 0 {
                    return Err(Error::Config("Concurrency must be at least 1".to_string()));
                }
                self.search.detail_concurrency = n;
            }
            ["search", "debounce_ms"] => {
                self.search.debounce_ms = parse_value(value, "debounce")?;
            }
            ["search", "request_timeout_secs"] => {
                self.search.request_timeout_secs = parse_value(value, "timeout")?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse_value(value, "port")?;
            }

            ["map", "default_lat"] => {
                self.map.default_lat = parse_value(value, "latitude")?;
            }
            ["map", "default_lng"] => {
                self.map.default_lng = parse_value(value, "longitude")?;
            }
            ["map", "zoom"] => {
                self.map.zoom = parse_value(value, "zoom")?;
            }

            ["url", "default"] => {
                if !self.url.providers.contains_key(value) {
                    return Err(Error::Config(format!("Unknown URL provider: {}", value)));
                }
                self.url.default = value.to_string();
            }

            ["api_keys", "google"] => {
                self.api_keys.google = value.to_string();
            }
            ["api_keys", "maps_js"] => {
                self.api_keys.maps_js = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "search.country",
            "search.radius_meters",
            "search.min_results",
            "search.detail_concurrency",
            "search.debounce_ms",
            "search.request_timeout_secs",
            "server.host",
            "server.port",
            "map.default_lat",
            "map.default_lng",
            "map.zoom",
            "url.default",
            "api_keys.google",
            "api_keys.maps_js",
        ]
    }

    /// Server-side Google key, falling back to the environment
    pub fn google_api_key(&self) -> Option<String> {
        if !self.api_keys.google.is_empty() {
            return Some(self.api_keys.google.clone());
        }
        std::env::var(GOOGLE_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    /// Browser key for the Maps JavaScript widget
    pub fn maps_js_key(&self) -> Option<String> {
        if !self.api_keys.maps_js.is_empty() {
            return Some(self.api_keys.maps_js.clone());
        }
        self.google_api_key()
    }

    /// Format a directions URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Map center used when there are no results
    pub fn default_map_center(&self) -> Coordinates {
        Coordinates::new(self.map.default_lat, self.map.default_lng)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

fn mask(key: &str) -> String {
    if key.is_empty() {
        String::new()
    } else {
        "***".to_string()
    }
}
