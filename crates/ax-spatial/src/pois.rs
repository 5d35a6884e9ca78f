//! POI sets: the snapped form of one category's points of interest.

use rustc_hash::FxHashMap;

use ax_core::NodeId;

/// Multiset of network nodes carrying POIs.
///
/// Several POIs may snap to the same node; each one counts separately in
/// radius counts and occupies its own slot in nearest-k results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoiSet {
    per_node: FxHashMap<NodeId, u32>,
    total:    usize,
}

impl PoiSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the snapped node of every POI (one entry per POI).
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut set = Self::new();
        for node in nodes {
            set.insert(node);
        }
        set
    }

    pub fn insert(&mut self, node: NodeId) {
        *self.per_node.entry(node).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of POIs at `node` (0 if none).
    #[inline]
    pub fn at(&self, node: NodeId) -> u32 {
        self.per_node.get(&node).copied().unwrap_or(0)
    }

    /// Total number of POIs.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Distinct nodes carrying at least one POI.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.per_node.keys().copied()
    }
}
