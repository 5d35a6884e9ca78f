//! `ax-spatial` — the spatial network provider.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`network`]    | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`        |
//! | [`search`]     | Bounded single-source Dijkstra (`reachable_within`)       |
//! | [`pois`]       | `PoiSet`, the POI multiset keyed by snapped node         |
//! | [`provider`]   | `SpatialNetwork` trait, `Nearest`, `NodeMap`              |
//! | [`categories`] | `CategorizedNetwork`: immutable network + POI categories  |
//! | [`osm`]        | `load_walk_network` (feature = `"osm"` only)              |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `osm`      | Enables OSM PBF loading via the `osmpbf` crate.           |
//! | `parallel` | Per-source searches run on the Rayon pool.                |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `ax-core` types.     |

pub mod categories;
pub mod error;
pub mod network;
pub mod pois;
pub mod provider;
pub mod search;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use categories::CategorizedNetwork;
pub use error::{SpatialError, SpatialResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use pois::PoiSet;
pub use provider::{Nearest, NodeMap, SpatialNetwork};
pub use search::{Reached, reachable_within};
