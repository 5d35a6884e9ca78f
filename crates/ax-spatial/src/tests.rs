//! Unit tests for ax-spatial.
//!
//! All tests use hand-built networks so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use ax_core::{GeoPoint, NodeId};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Small network with controlled edge lengths.
    ///
    /// Nodes (lat, lon):
    ///   0:(0,0)  1:(0,1)  2:(0,2)
    ///   3:(1,0)           4:(1,2)
    ///
    /// Undirected edges: 0-1 (100), 1-2 (100), 2-4 (100), 0-3 (500), 3-4 (100)
    ///
    /// Network distances from 0: n1=100, n2=200, n4=300, n3=400 (via 4).
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();

        let n0 = b.add_node(GeoPoint::new(0.0, 0.0));
        let n1 = b.add_node(GeoPoint::new(0.0, 1.0));
        let n2 = b.add_node(GeoPoint::new(0.0, 2.0));
        let n3 = b.add_node(GeoPoint::new(1.0, 0.0));
        let n4 = b.add_node(GeoPoint::new(1.0, 2.0));

        b.add_road(n0, n1, 100.0);
        b.add_road(n1, n2, 100.0);
        b.add_road(n2, n4, 100.0);
        b.add_road(n0, n3, 500.0);
        b.add_road(n3, n4, 100.0);

        (b.build(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ax_core::GeoPoint;
    use crate::RoadNetworkBuilder;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(net.coverage().is_none());
    }

    #[test]
    fn street_length_is_haversine() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.5, 0.5));
        let c = b.add_node(GeoPoint::new(0.51, 0.5));
        b.add_street(a, c);
        let net = b.build();
        assert_eq!(net.edge_count(), 2);
        assert!((net.edge_length_m[0] - 1_111.95).abs() < 0.5);
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        for n in [n0, n1, n2, n3, n4] {
            assert_eq!(net.out_edges(n).count(), 2);
        }
        let targets: Vec<_> = net.out_edges(n0).map(|e| net.edge_to[e.index()]).collect();
        assert!(targets.contains(&n1) && targets.contains(&n3));
    }

    #[test]
    fn directed_only_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 100.0);
        let net = b.build();
        assert_eq!(net.out_edges(a).count(), 1);
        assert_eq!(net.out_edges(c).count(), 0);
    }
}

// ── Spatial snap & coverage ───────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use ax_core::{BoundingBox, GeoPoint};
    use crate::{RoadNetworkBuilder, SpatialError, SpatialNetwork};

    #[test]
    fn snap_nearest() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        assert_eq!(net.nearest_node(GeoPoint::new(0.0, 0.4)).unwrap(), n0);
        assert_eq!(net.nearest_node(GeoPoint::new(0.0, 0.6)).unwrap(), n1);
    }

    #[test]
    fn outside_node_extent_is_out_of_bounds() {
        let (net, _) = super::helpers::grid_network();
        let err = net.nearest_node(GeoPoint::new(5.0, 5.0)).unwrap_err();
        assert!(matches!(err, SpatialError::OutOfBounds { .. }));
        // The raw snap ignores coverage.
        assert!(net.snap_to_node(GeoPoint::new(5.0, 5.0)).is_some());
    }

    #[test]
    fn explicit_coverage_wins() {
        let mut b = RoadNetworkBuilder::new()
            .coverage(BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap());
        b.add_node(GeoPoint::new(0.5, 0.5));
        let net = b.build();
        // Far from the only node but inside the declared AOI.
        assert!(net.nearest_node(GeoPoint::new(0.95, 0.05)).is_ok());
        assert!(net.nearest_node(GeoPoint::new(1.5, 0.5)).is_err());
    }

    #[test]
    fn empty_network_rejects_snaps() {
        let net = RoadNetworkBuilder::new().build();
        assert!(matches!(
            net.nearest_node(GeoPoint::new(0.0, 0.0)),
            Err(SpatialError::EmptyNetwork)
        ));
    }
}

// ── Bounded search ────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use crate::reachable_within;

    #[test]
    fn distances_and_order() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        let reached = reachable_within(&net, n0, f64::INFINITY);
        let order: Vec<_> = reached.iter().map(|r| r.node).collect();
        assert_eq!(order, [n0, n1, n2, n4, n3]);
        let dist: Vec<_> = reached.iter().map(|r| r.distance_m).collect();
        assert_eq!(dist, [0.0, 100.0, 200.0, 300.0, 400.0]);
    }

    #[test]
    fn radius_is_inclusive() {
        let (net, [n0, n1, n2, ..]) = super::helpers::grid_network();
        let reached = reachable_within(&net, n0, 200.0);
        let nodes: Vec<_> = reached.iter().map(|r| r.node).collect();
        assert_eq!(nodes, [n0, n1, n2]);
    }

    #[test]
    fn zero_radius_reaches_only_source() {
        let (net, [_, _, n2, ..]) = super::helpers::grid_network();
        let reached = reachable_within(&net, n2, 0.0);
        assert_eq!(reached.len(), 1);
        assert_eq!(reached[0].node, n2);
    }
}

// ── Provider queries ──────────────────────────────────────────────────────────

#[cfg(test)]
mod provider {
    use ax_core::NodeId;
    use crate::{PoiSet, SpatialError, SpatialNetwork};

    #[test]
    fn nearest_k_ascending_with_ranks() {
        let (net, [n0, n1, _, n3, n4]) = super::helpers::grid_network();
        let pois = PoiSet::from_nodes([n3, n1, n4]);
        let res = net.nearest_k(&[n0], &pois, 2, 1_000.0).unwrap();
        let row = &res[&n0];
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].distance_m, 100.0);
        assert_eq!(row[0].rank, 1);
        assert_eq!(row[1].distance_m, 300.0);
        assert_eq!(row[1].rank, 2);
    }

    #[test]
    fn nearest_k_truncated_by_radius() {
        let (net, [n0, _, _, n3, n4]) = super::helpers::grid_network();
        let pois = PoiSet::from_nodes([n3, n4]);
        let res = net.nearest_k(&[n0], &pois, 3, 350.0).unwrap();
        assert_eq!(res[&n0].len(), 1);
    }

    #[test]
    fn co_located_pois_fill_separate_slots() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        let pois = PoiSet::from_nodes([n1, n1, n1]);
        let res = net.nearest_k(&[n0], &pois, 2, 1_000.0).unwrap();
        assert_eq!(res[&n0].len(), 2);
        assert!(res[&n0].iter().all(|n| n.distance_m == 100.0));

        let counts = net.count_within(&[n0], &pois, 1_000.0).unwrap();
        assert_eq!(counts[&n0], 3);
    }

    #[test]
    fn count_within_inclusive_boundary() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        let pois = PoiSet::from_nodes([n1, n2, n3, n4]);
        let counts = net.count_within(&[n0, n4], &pois, 200.0).unwrap();
        assert_eq!(counts[&n0], 2); // n1 @100, n2 @200
        assert_eq!(counts[&n4], 4); // n4 @0, n2 @100, n3 @100, n1 @200
    }

    #[test]
    fn duplicate_sources_collapse() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let pois = PoiSet::new();
        let counts = net.count_within(&[n0, n0, n0], &pois, 100.0).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&n0], 0);
    }

    #[test]
    fn unknown_source_rejected() {
        let (net, _) = super::helpers::grid_network();
        let err = net.count_within(&[NodeId(99)], &PoiSet::new(), 100.0).unwrap_err();
        assert!(matches!(err, SpatialError::NodeNotFound(NodeId(99))));
    }
}

// ── Category snapshots ────────────────────────────────────────────────────────

#[cfg(test)]
mod categories {
    use ax_core::CategoryKey;
    use crate::{CategorizedNetwork, PoiSet, SpatialError};

    #[test_log::test]
    fn registration_returns_new_snapshot() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        let key = CategoryKey::new(["hospital"]).unwrap();

        let base = CategorizedNetwork::new(net);
        let with = base.with_pois(key.clone(), PoiSet::from_nodes([n1]));

        assert!(matches!(base.pois(&key), Err(SpatialError::UnknownCategory(_))));
        assert_eq!(with.pois(&key).unwrap().len(), 1);
        assert_eq!(with.count_within(&[n0], &key, 100.0).unwrap()[&n0], 1);
    }

    #[test]
    fn re_registration_replaces() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        let key = CategoryKey::new(["school"]).unwrap();

        let once = CategorizedNetwork::new(net).with_pois(key.clone(), PoiSet::from_nodes([n1]));
        let twice = once.with_pois(key.clone(), PoiSet::from_nodes([n1]));

        assert_eq!(
            once.count_within(&[n0], &key, 500.0).unwrap(),
            twice.count_within(&[n0], &key, 500.0).unwrap()
        );
        assert_eq!(twice.pois(&key).unwrap().len(), 1);
    }
}

// ── Rayon path ────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod parallel {
    use ax_core::{GeoPoint, NodeId};
    use crate::{PoiSet, RoadNetwork, RoadNetworkBuilder, SpatialNetwork, reachable_within};

    /// 12 x 12 lattice with 100 m roads between neighbours.
    fn lattice() -> RoadNetwork {
        const SIDE: u32 = 12;
        let mut b = RoadNetworkBuilder::new();
        for row in 0..SIDE {
            for col in 0..SIDE {
                b.add_node(GeoPoint::new(row as f64 * 0.001, col as f64 * 0.001));
            }
        }
        for row in 0..SIDE {
            for col in 0..SIDE {
                let n = NodeId(row * SIDE + col);
                if col + 1 < SIDE {
                    b.add_road(n, NodeId(n.0 + 1), 100.0);
                }
                if row + 1 < SIDE {
                    b.add_road(n, NodeId(n.0 + SIDE), 100.0);
                }
            }
        }
        b.build()
    }

    #[test]
    fn matches_single_threaded_search() {
        let net = lattice();
        let pois = PoiSet::from_nodes([NodeId(5), NodeId(17), NodeId(17), NodeId(80), NodeId(143)]);
        let sources: Vec<NodeId> = (0..net.node_count() as u32).map(NodeId).collect();
        let radius = 450.0;
        let k = 3;

        let counts = net.count_within(&sources, &pois, radius).unwrap();
        let nearest = net.nearest_k(&sources, &pois, k, radius).unwrap();
        assert_eq!(counts.len(), sources.len());
        assert_eq!(nearest.len(), sources.len());

        for &src in &sources {
            let reached = reachable_within(&net, src, radius);
            let expected: Vec<f64> = reached
                .iter()
                .flat_map(|r| std::iter::repeat(r.distance_m).take(pois.at(r.node) as usize))
                .collect();

            assert_eq!(counts[&src] as usize, expected.len(), "count at {src}");
            let got: Vec<f64> = nearest[&src].iter().map(|n| n.distance_m).collect();
            let want: Vec<f64> = expected.into_iter().take(k).collect();
            assert_eq!(got, want, "nearest at {src}");
        }
    }
}

// ── OSM clipping ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "osm"))]
mod osm {
    use std::collections::HashMap;

    use ax_core::{BoundingBox, GeoPoint, NodeId};
    use crate::osm::{build_clipped, walkable};

    fn fixture() -> (BoundingBox, HashMap<i64, GeoPoint>, Vec<Vec<i64>>) {
        let aoi = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let nodes: HashMap<i64, GeoPoint> = [
            (900, GeoPoint::new(0.1, 0.1)),
            (40, GeoPoint::new(0.2, 0.1)),
            (7_000, GeoPoint::new(0.3, 0.1)),
            (12, GeoPoint::new(0.4, 0.1)),
            (555, GeoPoint::new(0.5, 0.5)),
        ]
        .into_iter()
        .collect();
        // 31 lies outside the AOI, so the segment 12-31 is dropped.
        let ways = vec![vec![900, 40, 7_000], vec![7_000, 12, 31]];
        (aoi, nodes, ways)
    }

    #[test]
    fn node_ids_follow_osm_id_order() {
        let (aoi, nodes, ways) = fixture();
        let net = build_clipped(&aoi, &nodes, &ways);

        // 555 is in the AOI but on no walkable way.
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.edge_count(), 6);
        let order: Vec<GeoPoint> = (0..4).map(|i| net.node_pos[NodeId(i).index()]).collect();
        assert_eq!(order, [nodes[&12], nodes[&40], nodes[&900], nodes[&7_000]]);
    }

    #[test]
    fn repeated_builds_agree() {
        let (aoi, nodes, ways) = fixture();
        let first = build_clipped(&aoi, &nodes, &ways);
        for _ in 0..5 {
            let again = build_clipped(&aoi, &nodes, &ways);
            assert_eq!(again.node_pos, first.node_pos);
            assert_eq!(again.edge_to, first.edge_to);
        }
    }

    #[test]
    fn walkable_filters() {
        assert!(walkable(&[("highway", "residential")]));
        assert!(!walkable(&[("highway", "motorway")]));
        assert!(!walkable(&[("highway", "footway"), ("foot", "no")]));
        assert!(!walkable(&[("highway", "service"), ("access", "private")]));
        assert!(walkable(&[("highway", "service"), ("access", "private"), ("foot", "yes")]));
        assert!(!walkable(&[("building", "yes")]));
    }
}
