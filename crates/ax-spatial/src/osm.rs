//! OSM PBF loader, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use ax_spatial::osm::load_walk_network;
//!
//! let network = load_walk_network(Path::new("manila.osm.pbf"), &aoi)?;
//! ```
//!
//! # What is loaded
//!
//! Walkable `highway=*` ways (see [`walkable`]) whose nodes fall inside the
//! AOI.  Every segment becomes a two-way edge whose length is the haversine
//! distance between its end nodes; pedestrians ignore `oneway`.  Segments
//! with an end outside the AOI are dropped, so the network is clipped to the
//! box it covers.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use osmpbf::{Element, ElementReader};

use ax_core::{BoundingBox, GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::SpatialError;

// ── Public entry point ────────────────────────────────────────────────────────

/// Load the pedestrian street network inside `aoi` from an OSM PBF file.
///
/// The returned network's coverage is `aoi`.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] on read or parse errors.
pub fn load_walk_network(path: &Path, aoi: &BoundingBox) -> Result<RoadNetwork, SpatialError> {
    // ── Phase 1: collect AOI nodes + walkable ways in one sequential pass ──
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut aoi_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut ways: Vec<Vec<i64>> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let pos = GeoPoint::new(n.lat(), n.lon());
                if aoi.contains(pos) {
                    aoi_nodes.insert(n.id(), pos);
                }
            }
            Element::DenseNode(n) => {
                let pos = GeoPoint::new(n.lat(), n.lon());
                if aoi.contains(pos) {
                    aoi_nodes.insert(n.id(), pos);
                }
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                if walkable(&tags) {
                    ways.push(w.refs().collect());
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    // ── Phase 2: number street nodes and link consecutive way nodes ───
    let network = build_clipped(aoi, &aoi_nodes, &ways);
    log::info!(
        "loaded walk network from {}: {} nodes, {} directed edges",
        path.display(),
        network.node_count(),
        network.edge_count()
    );

    Ok(network)
}

/// Build the street network from walkable `ways` over the nodes found
/// inside `aoi`.
///
/// Nodes are numbered in ascending OSM id order so the same extract always
/// yields the same `NodeId`s.
pub(crate) fn build_clipped(
    aoi: &BoundingBox,
    aoi_nodes: &HashMap<i64, GeoPoint>,
    ways: &[Vec<i64>],
) -> RoadNetwork {
    let street_node_ids: BTreeSet<i64> = ways
        .iter()
        .flat_map(|w| w.iter().copied())
        .filter(|id| aoi_nodes.contains_key(id))
        .collect();

    let mut builder = RoadNetworkBuilder::with_capacity(
        street_node_ids.len(),
        street_node_ids.len() * 2,
    )
    .coverage(*aoi);

    let mut osm_to_ax: HashMap<i64, NodeId> = HashMap::with_capacity(street_node_ids.len());
    for osm_id in street_node_ids {
        if let Some(&pos) = aoi_nodes.get(&osm_id) {
            osm_to_ax.insert(osm_id, builder.add_node(pos));
        }
    }

    for way in ways {
        for window in way.windows(2) {
            if let (Some(&a), Some(&b)) = (osm_to_ax.get(&window[0]), osm_to_ax.get(&window[1])) {
                builder.add_street(a, b);
            }
        }
    }

    builder.build()
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` if a way with these tags can be walked.
///
/// Motorways, trunk roads and non-existent roads are excluded, as are ways
/// that forbid pedestrians (`foot=no`) or are private without explicit foot
/// access.
pub(crate) fn walkable(tags: &[(&str, &str)]) -> bool {
    let tag = |key: &str| tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);

    let Some(highway) = tag("highway") else {
        return false;
    };
    let allowed = !matches!(
        highway,
        "motorway" | "motorway_link" | "trunk" | "trunk_link"
            | "construction" | "proposed" | "abandoned" | "raceway"
            | "bus_guideway" | "escape" | "platform"
    );
    let foot = tag("foot");
    let foot_forbidden = foot == Some("no");
    let foot_granted = matches!(foot, Some("yes" | "designated" | "permissive"));
    let private = matches!(tag("access"), Some("private" | "no"));

    allowed && !foot_forbidden && (!private || foot_granted)
}
