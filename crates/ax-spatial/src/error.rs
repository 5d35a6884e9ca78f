//! Spatial-subsystem error type.

use thiserror::Error;

use ax_core::{CategoryKey, NodeId};

/// Errors produced by `ax-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("point ({lon}, {lat}) is outside the network coverage")]
    OutOfBounds { lon: f64, lat: f64 },

    #[error("network has no nodes")]
    EmptyNetwork,

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("category {0} is not registered on this network")]
    UnknownCategory(CategoryKey),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
