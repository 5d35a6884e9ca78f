//! Bounded single-source Dijkstra over the CSR street graph.
//!
//! Proximity queries never need a full shortest-path tree: only nodes within
//! the search radius matter.  The search keeps tentative distances in a hash
//! map (not an `n`-length vector) so its cost is proportional to the size of
//! the explored neighbourhood, which matters when one query runs a search
//! from every sampled point.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use ax_core::NodeId;

use crate::network::RoadNetwork;

/// A node settled by the search and its network distance from the source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reached {
    pub node: NodeId,
    pub distance_m: f64,
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on cost; NodeId breaks ties so settle order is stable.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Every node reachable from `source` with network distance `<= max_distance_m`,
/// in non-decreasing distance order.  The source itself comes first at 0 m.
///
/// `source` must be a node of `network`.
pub fn reachable_within(network: &RoadNetwork, source: NodeId, max_distance_m: f64) -> Vec<Reached> {
    let mut best: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut settled: Vec<Reached> = Vec::new();
    let mut heap = BinaryHeap::new();

    best.insert(source, 0.0);
    heap.push(State { cost: 0.0, node: source });

    while let Some(State { cost, node }) = heap.pop() {
        // Skip stale heap entries.
        if best.get(&node).is_some_and(|&d| cost > d) {
            continue;
        }
        settled.push(Reached { node, distance_m: cost });

        for edge in network.out_edges(node) {
            let next = network.edge_to[edge.index()];
            let next_cost = cost + network.edge_length_m[edge.index()];
            if next_cost > max_distance_m {
                continue;
            }
            match best.entry(next) {
                Entry::Vacant(slot) => {
                    slot.insert(next_cost);
                    heap.push(State { cost: next_cost, node: next });
                }
                Entry::Occupied(mut slot) => {
                    if next_cost < *slot.get() {
                        slot.insert(next_cost);
                        heap.push(State { cost: next_cost, node: next });
                    }
                }
            }
        }
    }

    settled
}
