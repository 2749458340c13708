//! Error types for gay2z

use thiserror::Error;

/// Main error type for gay2z operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Address is empty")]
    EmptyAddress,

    #[error("No category selected")]
    MissingCategory,

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Geocode result for '{0}' is not precise enough")]
    ImpreciseLocation(String),

    #[error("No geocode result for '{0}'")]
    LocationNotFound(String),

    #[error("No address found for ({lat}, {lng})")]
    AddressNotFound { lat: f64, lng: f64 },

    #[error("{service} returned status {status}{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Vendor {
        service: &'static str,
        status: String,
        message: Option<String>,
    },

    #[error("Submission superseded by a newer one")]
    Superseded,

    #[error("Missing or malformed session id")]
    MissingSession,

    #[error("Map widget unavailable: {0}")]
    MapUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geo error: {0}")]
    Geo(String),
}

impl Error {
    /// Message shown inline to the person searching
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyAddress => "Please enter a location".to_string(),
            Self::MissingCategory => "Please choose what you are looking for".to_string(),
            Self::InvalidCategory(name) => format!("Unknown category: {}", name),
            Self::InvalidCoordinates(_) => "Those coordinates are not valid".to_string(),
            Self::ImpreciseLocation(_) => {
                "Please enter a more specific address or postcode".to_string()
            }
            Self::LocationNotFound(_) => {
                "Could not find this location. Please try another.".to_string()
            }
            Self::AddressNotFound { .. } => "Could not find address for this location".to_string(),
            Self::Superseded => "A newer search replaced this one".to_string(),
            Self::MissingSession => "Please refresh the page".to_string(),
            Self::MapUnavailable(_) => {
                "Google Maps is not loaded. Please refresh the page.".to_string()
            }
            Self::Vendor { .. } | Self::Http(_) | Self::Json(_) => {
                "Unable to search right now. Please try again later.".to_string()
            }
            Self::Config(_) | Self::Io(_) | Self::Server(_) | Self::Geo(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
        }
    }
}

/// Result type alias for gay2z operations
pub type Result<T> = std::result::Result<T, Error>;
