//! Centralized constants for the gay2z crate
//!
//! Values shared by more than one module live here.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Meters in one statute mile
    pub const METERS_PER_MILE: f64 = 1609.34;
}

/// External API endpoints
pub mod api {
    /// Google Maps Platform REST base
    pub const GOOGLE_MAPS_API_URL: &str = "https://maps.googleapis.com/maps/api";

    /// Maps JavaScript widget loader
    pub const GOOGLE_MAPS_JS_URL: &str = "https://maps.googleapis.com/maps/api/js";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// Environment variable consulted when no Google key is configured
    pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
}

/// Place-type tags used by the Google APIs
pub mod place_types {
    /// Geocode result types considered precise enough for a nearby search
    pub const PRECISE_GEOCODE_TYPES: [&str; 4] =
        ["street_address", "premise", "subpremise", "postal_code"];

    /// Type restriction for the primary nearby search
    pub const ESTABLISHMENT: &str = "establishment";
}

/// Per-browser session handling in the web server
pub mod session {
    /// Request header carrying the page-load id
    pub const SESSION_HEADER: &str = "x-session-id";

    /// Sessions idle this long are dropped
    pub const IDLE_TIMEOUT_SECS: u64 = 60 * 60;
}
