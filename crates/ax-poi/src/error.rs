//! Error types for ax-poi.

use thiserror::Error;

/// Failures of the provider session itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("session for provider {provider:?} has expired")]
    Expired { provider: String },

    #[error("provider {provider:?} requires a credential but the session has none")]
    MissingCredential { provider: String },
}

/// Errors raised while fetching or parsing POI records.
#[derive(Debug, Error)]
pub enum PoiError {
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("POI parse error: {0}")]
    Parse(String),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type PoiResult<T> = Result<T, PoiError>;
