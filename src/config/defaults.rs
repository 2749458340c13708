//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Country every geocode is restricted to (ISO 3166-1 alpha-2)
pub const DEFAULT_COUNTRY: &str = "gb";

/// Nearby search radius in meters
pub const DEFAULT_RADIUS_METERS: u32 = 50_000;

/// Primary result count below which the untyped secondary search runs
pub const DEFAULT_MIN_RESULTS: usize = 10;

/// Maximum place-detail lookups in flight at once
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 8;

/// Search submission debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Per-request HTTP timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Map center when there are no results (central London)
pub const DEFAULT_MAP_LAT: f64 = 51.5074;
pub const DEFAULT_MAP_LNG: f64 = -0.1278;

/// Map zoom level
pub const DEFAULT_MAP_ZOOM: u8 = 12;

/// Default directions provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "gay2z";
