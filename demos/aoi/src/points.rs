//! Query points: read from CSV or sampled inside the AOI.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use ax_core::{BoundingBox, QueryPoint, sample_points};

#[derive(Deserialize)]
struct PointRow {
    longitude: f64,
    latitude:  f64,
}

/// Read `longitude,latitude` rows from `path`.
pub fn load_points(path: &Path) -> Result<Vec<QueryPoint>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening points file {}", path.display()))?;
    let mut points = Vec::new();
    for row in reader.deserialize::<PointRow>() {
        let row = row.with_context(|| format!("reading {}", path.display()))?;
        points.push(QueryPoint::new(row.longitude, row.latitude));
    }
    Ok(points)
}

/// Points from `path` if given, otherwise `n` seeded samples inside `aoi`.
pub fn query_points(path: Option<&Path>, aoi: &BoundingBox, n: usize, seed: u64) -> Result<Vec<QueryPoint>> {
    match path {
        Some(p) => {
            let points = load_points(p)?;
            log::info!("loaded {} query points from {}", points.len(), p.display());
            Ok(points)
        }
        None => {
            log::info!("sampling {n} query points inside the AOI (seed {seed})");
            Ok(sample_points(aoi, n, seed))
        }
    }
}
