//! Synthetic street grid over the AOI.
//!
//! Used when no OSM extract is supplied: a regular lattice of two-way
//! streets with haversine edge lengths, clipped to the AOI.

use std::f64::consts::PI;

use ax_core::geo::EARTH_RADIUS_M;
use ax_core::{BoundingBox, GeoPoint};
use ax_spatial::{RoadNetwork, RoadNetworkBuilder};

/// Upper bound on nodes per grid side.
const MAX_SIDE: usize = 400;

/// Metres per degree of latitude.
const M_PER_DEG: f64 = EARTH_RADIUS_M * PI / 180.0;

/// Build a street grid over `aoi` with roughly `spacing_m` between
/// intersections.  Coarser spacing is used when the AOI would need more than
/// `MAX_SIDE` nodes per side.
pub fn build_grid_network(aoi: &BoundingBox, spacing_m: f64) -> RoadNetwork {
    let center = aoi.center();
    let height_m = (aoi.max_lat - aoi.min_lat) * M_PER_DEG;
    let width_m = (aoi.max_lon - aoi.min_lon) * M_PER_DEG * center.lat.to_radians().cos();

    let rows = side_len(height_m, spacing_m);
    let cols = side_len(width_m, spacing_m);
    if rows == MAX_SIDE || cols == MAX_SIDE {
        log::warn!("grid spacing {spacing_m} m too fine for the AOI; capped at {MAX_SIDE} nodes per side");
    }

    let lat_step = (aoi.max_lat - aoi.min_lat) / (rows - 1) as f64;
    let lon_step = (aoi.max_lon - aoi.min_lon) / (cols - 1) as f64;

    let mut b = RoadNetworkBuilder::with_capacity(rows * cols, 4 * rows * cols).coverage(*aoi);
    let mut ids = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let pos = GeoPoint::new(aoi.min_lat + r as f64 * lat_step, aoi.min_lon + c as f64 * lon_step);
            ids.push(b.add_node(pos));
        }
    }
    for r in 0..rows {
        for c in 0..cols {
            let here = ids[r * cols + c];
            if c + 1 < cols {
                b.add_street(here, ids[r * cols + c + 1]);
            }
            if r + 1 < rows {
                b.add_street(here, ids[(r + 1) * cols + c]);
            }
        }
    }

    let net = b.build();
    log::info!("synthetic grid: {rows}x{cols} nodes, {} directed edges", net.edge_count());
    net
}

fn side_len(extent_m: f64, spacing_m: f64) -> usize {
    let n = (extent_m / spacing_m.max(1.0)).round() as usize + 1;
    n.clamp(2, MAX_SIDE)
}
