//! Deterministic random query points inside an AOI.
//!
//! Points are drawn uniformly in lat/lon space from a `SmallRng` seeded with
//! the caller's seed, so the same `(bbox, n, seed)` always yields the same
//! points.  Uniform in degrees is not uniform in area, but the error is
//! negligible for city-sized boxes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{BoundingBox, QueryPoint};

/// Draw `n` query points uniformly inside `bbox`.
pub fn sample_points(bbox: &BoundingBox, n: usize, seed: u64) -> Vec<QueryPoint> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let lon = rng.gen_range(bbox.min_lon..=bbox.max_lon);
            let lat = rng.gen_range(bbox.min_lat..=bbox.max_lat);
            QueryPoint::new(lon, lat)
        })
        .collect()
}
