//! The spatial network provider interface.
//!
//! Proximity scoring talks to the street network only through
//! [`SpatialNetwork`], so a different engine (contraction hierarchies, an
//! external routing service) can be swapped in without touching the
//! calculator.  [`RoadNetwork`] is the bundled implementation.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync`: categorized snapshots share the
//! network behind an `Arc`.

use rustc_hash::{FxHashMap, FxHashSet};

use ax_core::{BoundingBox, GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::search::reachable_within;
use crate::{PoiSet, SpatialError, SpatialResult};

/// Per-source results, keyed by the (deduplicated) source node.
pub type NodeMap<T> = FxHashMap<NodeId, T>;

/// One entry of a nearest-k result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest {
    /// Network distance from the source node, metres.
    pub distance_m: f64,
    /// 1-based position in the ascending result list.
    pub rank: usize,
}

/// A routable graph with node snapping and POI proximity queries.
pub trait SpatialNetwork: Send + Sync {
    /// Area the network covers; `None` when it has no nodes.
    fn coverage(&self) -> Option<BoundingBox>;

    /// Snap `pos` to its nearest node.
    ///
    /// Fails with [`SpatialError::OutOfBounds`] when `pos` is outside
    /// [`coverage`](Self::coverage).
    fn nearest_node(&self, pos: GeoPoint) -> SpatialResult<NodeId>;

    /// For every source node, up to `k` POIs of `pois` within
    /// `max_distance_m`, ascending by network distance.
    ///
    /// Sources with no POI in range map to an empty list.  Order among equal
    /// distances is implementation-defined.
    fn nearest_k(
        &self,
        sources: &[NodeId],
        pois: &PoiSet,
        k: usize,
        max_distance_m: f64,
    ) -> SpatialResult<NodeMap<Vec<Nearest>>>;

    /// For every source node, how many POIs of `pois` are reachable within
    /// `max_distance_m` (boundary inclusive).
    fn count_within(
        &self,
        sources: &[NodeId],
        pois: &PoiSet,
        max_distance_m: f64,
    ) -> SpatialResult<NodeMap<u32>>;
}

// ── RoadNetwork implementation ────────────────────────────────────────────────

impl SpatialNetwork for RoadNetwork {
    fn coverage(&self) -> Option<BoundingBox> {
        RoadNetwork::coverage(self)
    }

    fn nearest_node(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        self.snap_within_coverage(pos)
    }

    fn nearest_k(
        &self,
        sources: &[NodeId],
        pois: &PoiSet,
        k: usize,
        max_distance_m: f64,
    ) -> SpatialResult<NodeMap<Vec<Nearest>>> {
        let sources = self.unique_sources(sources)?;
        Ok(for_each_source(&sources, |src| {
            let mut found: Vec<Nearest> = Vec::with_capacity(k);
            if pois.is_empty() || k == 0 {
                return found;
            }
            'search: for reached in reachable_within(self, src, max_distance_m) {
                for _ in 0..pois.at(reached.node) {
                    found.push(Nearest { distance_m: reached.distance_m, rank: found.len() + 1 });
                    if found.len() == k {
                        break 'search;
                    }
                }
            }
            found
        }))
    }

    fn count_within(
        &self,
        sources: &[NodeId],
        pois: &PoiSet,
        max_distance_m: f64,
    ) -> SpatialResult<NodeMap<u32>> {
        let sources = self.unique_sources(sources)?;
        Ok(for_each_source(&sources, |src| {
            if pois.is_empty() {
                return 0;
            }
            reachable_within(self, src, max_distance_m)
                .iter()
                .map(|r| pois.at(r.node))
                .sum()
        }))
    }
}

impl RoadNetwork {
    /// Deduplicate `sources` (first-seen order) and check they exist.
    fn unique_sources(&self, sources: &[NodeId]) -> SpatialResult<Vec<NodeId>> {
        let mut seen = FxHashSet::default();
        let mut unique = Vec::with_capacity(sources.len());
        for &node in sources {
            if !self.contains_node(node) {
                return Err(SpatialError::NodeNotFound(node));
            }
            if seen.insert(node) {
                unique.push(node);
            }
        }
        Ok(unique)
    }
}

#[cfg(not(feature = "parallel"))]
fn for_each_source<T, F>(sources: &[NodeId], f: F) -> NodeMap<T>
where
    F: Fn(NodeId) -> T,
{
    sources.iter().map(|&src| (src, f(src))).collect()
}

#[cfg(feature = "parallel")]
fn for_each_source<T, F>(sources: &[NodeId], f: F) -> NodeMap<T>
where
    T: Send,
    F: Fn(NodeId) -> T + Sync,
{
    use rayon::prelude::*;

    sources.par_iter().map(|&src| (src, f(src))).collect::<Vec<_>>().into_iter().collect()
}
