//! `ax-core` — foundational types for the `rust_access` workspace.
//!
//! Every other `ax-*` crate depends on this one.  It has no `ax-*`
//! dependencies and only `rand` and `thiserror` as external ones (plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                     |
//! | [`geo`]      | `GeoPoint`, haversine distance                         |
//! | [`bbox`]     | `BoundingBox`, AOI ring parsing                        |
//! | [`query`]    | `QueryPoint`                                           |
//! | [`category`] | `CategoryKey` and output column naming                 |
//! | [`sample`]   | Deterministic random query points inside an AOI        |
//! | [`error`]    | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod bbox;
pub mod category;
pub mod error;
pub mod geo;
pub mod ids;
pub mod query;
pub mod sample;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bbox::BoundingBox;
pub use category::CategoryKey;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
pub use query::QueryPoint;
pub use sample::sample_points;
