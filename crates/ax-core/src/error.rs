//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised while validating core inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("invalid coordinate ({lon}, {lat})")]
    InvalidCoordinate { lon: f64, lat: f64 },
}

/// Shorthand result type for `ax-core`.
pub type CoreResult<T> = Result<T, CoreError>;
