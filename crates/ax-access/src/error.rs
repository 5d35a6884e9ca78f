//! Calculator error type.

use thiserror::Error;

use ax_core::{CoreError, NodeId};
use ax_poi::{AuthError, PoiError};
use ax_spatial::SpatialError;

/// Errors produced by `ax-access`.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("no POIs found for amenity {tag:?} inside the area of interest")]
    CategoryLoad { tag: String },

    #[error("point ({lon}, {lat}) is outside the network coverage")]
    OutOfBounds { lon: f64, lat: f64 },

    #[error("node {node} is present in the {present} results but missing from the {missing} results")]
    MergeInconsistency {
        node:    NodeId,
        present: &'static str,
        missing: &'static str,
    },

    #[error("authentication failed: {0}")]
    Auth(AuthError),

    #[error("POI source error: {0}")]
    Poi(PoiError),

    #[error("spatial network error: {0}")]
    Spatial(SpatialError),
}

impl AccessError {
    /// Whether the error only concerns one category group, so a
    /// multi-group analysis can record it and move on.
    pub fn is_category_local(&self) -> bool {
        matches!(self, Self::CategoryLoad { .. } | Self::Auth(_) | Self::Poi(_))
    }
}

impl From<PoiError> for AccessError {
    fn from(e: PoiError) -> Self {
        match e {
            PoiError::Auth(auth) => Self::Auth(auth),
            other => Self::Poi(other),
        }
    }
}

impl From<SpatialError> for AccessError {
    fn from(e: SpatialError) -> Self {
        match e {
            SpatialError::OutOfBounds { lon, lat } => Self::OutOfBounds { lon, lat },
            other => Self::Spatial(other),
        }
    }
}

pub type AccessResult<T> = Result<T, AccessError>;
