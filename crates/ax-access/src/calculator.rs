//! [`ProximityAccessibilityCalculator`]: the analysis driver.
//!
//! # Lifecycle
//!
//! ```text
//! new(network, aoi, config)
//!   └─ snap_points(points)                       → SnappedPoints
//!   └─ register_category(source, session, tags)  → (new calculator, Registration)
//!        └─ nearest_k_distances / count_within_radius / score_category
//! ```
//!
//! Registration never mutates the receiver: it returns a new calculator
//! whose categorized network shares the street graph with the old one.
//! [`analyse`](ProximityAccessibilityCalculator::analyse) runs the whole
//! sequence for several category groups and collects per-group failures
//! instead of aborting.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use ax_core::{BoundingBox, CategoryKey, CoreError, NodeId, QueryPoint};
use ax_poi::{PoiRecord, PoiSource, ProviderSession, dedupe_records};
use ax_spatial::{CategorizedNetwork, NodeMap, PoiSet, SpatialError, SpatialNetwork};

use crate::{
    AccessConfig, AccessError, AccessResult, AccessWarning, AccessibilityReport,
    AccessibilityTable, CategoryColumns, CategoryFailure, SnappedPoints,
};

/// Outcome of registering one category group.
#[derive(Clone, Debug)]
pub struct Registration {
    pub key:     CategoryKey,
    /// Deduplicated records fetched for the group's tags.
    pub records: Vec<PoiRecord>,
    /// Records left out because they lie outside the network coverage.
    pub skipped: usize,
}

/// Proximity and radius-count scoring of query points against POI
/// categories on a street network.
pub struct ProximityAccessibilityCalculator<N> {
    network: CategorizedNetwork<N>,
    aoi:     BoundingBox,
    config:  AccessConfig,
}

impl<N> Clone for ProximityAccessibilityCalculator<N> {
    fn clone(&self) -> Self {
        Self { network: self.network.clone(), aoi: self.aoi, config: self.config }
    }
}

impl<N> std::fmt::Debug for ProximityAccessibilityCalculator<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximityAccessibilityCalculator")
            .field("aoi", &self.aoi)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<N: SpatialNetwork> ProximityAccessibilityCalculator<N> {
    /// Create a calculator over `network` for the area `aoi`.
    ///
    /// Fails when `config` is invalid, the network is empty, or the AOI does
    /// not overlap the network coverage.
    pub fn new(network: N, aoi: BoundingBox, config: AccessConfig) -> AccessResult<Self> {
        Self::from_categorized(CategorizedNetwork::new(network), aoi, config)
    }

    /// Create a calculator over an already categorized network.
    pub fn from_categorized(
        network: CategorizedNetwork<N>,
        aoi:     BoundingBox,
        config:  AccessConfig,
    ) -> AccessResult<Self> {
        config.validate()?;
        let coverage = network.network().coverage().ok_or(SpatialError::EmptyNetwork)?;
        if !coverage.intersects(&aoi) {
            let c = aoi.center();
            return Err(AccessError::OutOfBounds { lon: c.lon, lat: c.lat });
        }
        Ok(Self { network, aoi, config })
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    pub fn aoi(&self) -> &BoundingBox {
        &self.aoi
    }

    pub fn network(&self) -> &CategorizedNetwork<N> {
        &self.network
    }

    // ── Snapping ──────────────────────────────────────────────────────────────

    /// Assign every query point its nearest network node.
    pub fn snap_points(&self, points: &[QueryPoint]) -> AccessResult<SnappedPoints> {
        if points.is_empty() {
            return Err(AccessError::InvalidInput("no query points given".into()));
        }
        let mut nodes = Vec::with_capacity(points.len());
        for p in points {
            if !p.pos().is_valid() {
                return Err(CoreError::InvalidCoordinate { lon: p.lon, lat: p.lat }.into());
            }
            nodes.push(self.network.network().nearest_node(p.pos())?);
        }
        let snapped = SnappedPoints { points: points.to_vec(), nodes };
        log::info!(
            "snapped {} query points onto {} network nodes",
            snapped.len(),
            snapped.unique_nodes().len()
        );
        Ok(snapped)
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Fetch every tag of `amenities` inside the AOI, snap the POIs, and
    /// register them as one category.
    ///
    /// Returns the new calculator; `self` is left as it was.  Fails with
    /// [`AccessError::CategoryLoad`] when any tag yields no records.
    pub fn register_category<S, T>(
        &self,
        source:    &S,
        session:   &ProviderSession,
        amenities: &[T],
    ) -> AccessResult<(Self, Registration)>
    where
        S: PoiSource + ?Sized,
        T: AsRef<str>,
    {
        let key = category_key(amenities)?;
        let mut records = Vec::new();
        for tag in key.tags() {
            let found = source.fetch(session, &self.aoi, tag)?;
            if found.is_empty() {
                return Err(AccessError::CategoryLoad { tag: tag.clone() });
            }
            records.extend(found);
        }
        let records = dedupe_records(records);

        let mut pois = PoiSet::new();
        let mut skipped = 0;
        for record in &records {
            match self.network.network().nearest_node(record.pos()) {
                Ok(node) => pois.insert(node),
                Err(SpatialError::OutOfBounds { .. }) => skipped += 1,
                Err(e) => return Err(e.into()),
            }
        }
        if skipped > 0 {
            log::warn!("{key}: skipped {skipped} POIs outside the network coverage");
        }
        log::info!("{key}: registered {} POIs from {}", pois.len(), source.name());

        let next = Self {
            network: self.network.with_pois(key.clone(), pois),
            aoi:     self.aoi,
            config:  self.config,
        };
        Ok((next, Registration { key, records, skipped }))
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Per distinct snapped node, the `k` nearest POI distances in metres,
    /// ascending and padded with `None` up to `k`.
    pub fn nearest_k_distances(
        &self,
        snapped: &SnappedPoints,
        key:     &CategoryKey,
    ) -> AccessResult<NodeMap<Vec<Option<f64>>>> {
        let k = self.config.num_pois;
        let found = self.network.nearest_k(&snapped.unique_nodes(), key, k, self.config.max_distance_m)?;
        Ok(found
            .into_iter()
            .map(|(node, nearest)| {
                let mut row: Vec<Option<f64>> =
                    nearest.iter().take(k).map(|n| Some(n.distance_m)).collect();
                row.resize(k, None);
                (node, row)
            })
            .collect())
    }

    /// Per distinct snapped node, the number of POIs within the search
    /// radius (boundary inclusive).
    pub fn count_within_radius(
        &self,
        snapped: &SnappedPoints,
        key:     &CategoryKey,
    ) -> AccessResult<NodeMap<u32>> {
        Ok(self
            .network
            .count_within(&snapped.unique_nodes(), key, self.config.max_distance_m)?)
    }

    /// Run both queries for `key` and merge them back onto the query rows.
    pub fn score_category(
        &self,
        snapped: &SnappedPoints,
        key:     &CategoryKey,
    ) -> AccessResult<CategoryColumns> {
        let nearest = self.nearest_k_distances(snapped, key)?;
        let counts = self.count_within_radius(snapped, key)?;
        let columns = merge_by_node(snapped, key, self.config, &nearest, &counts)?;
        if columns.is_empty_result() {
            log::warn!("{key}: no POIs within {} m of any query point", self.config.max_distance_m);
        }
        Ok(columns)
    }

    // ── Whole analysis ────────────────────────────────────────────────────────

    /// Snap `points` once, then register and score every group.
    ///
    /// Groups are validated before any fetch.  Groups that reduce to the
    /// same [`CategoryKey`] are analysed once, at their first position.
    /// A group whose fetch fails
    /// (no POIs for a tag, auth, source error) is reported in
    /// [`AccessibilityReport::failures`] and the remaining groups still run.
    /// Every other error aborts the analysis.
    pub fn analyse<S, T>(
        &self,
        source:  &S,
        session: &ProviderSession,
        points:  &[QueryPoint],
        groups:  &[Vec<T>],
    ) -> AccessResult<AccessibilityReport>
    where
        S: PoiSource + ?Sized,
        T: AsRef<str>,
    {
        if groups.is_empty() {
            return Err(AccessError::InvalidInput("no category groups given".into()));
        }
        let mut seen = BTreeSet::new();
        let mut unique = Vec::with_capacity(groups.len());
        for group in groups {
            let key = category_key(group)?;
            if seen.insert(key.clone()) {
                unique.push(group);
            } else {
                log::debug!("{key}: repeated category group ignored");
            }
        }

        let snapped = self.snap_points(points)?;
        let mut table = AccessibilityTable::new(snapped.clone());
        let mut amenities = Vec::new();
        let mut warnings = Vec::new();
        let mut failures = Vec::new();
        let mut current = self.clone();

        for group in unique {
            let (next, registration) = match current.register_category(source, session, group) {
                Ok(ok) => ok,
                Err(error) if error.is_category_local() => {
                    log::warn!("category group {:?} failed: {error}", tag_strings(group));
                    failures.push(CategoryFailure { tags: tag_strings(group), error });
                    continue;
                }
                Err(error) => return Err(error),
            };
            current = next;

            let columns = current.score_category(&snapped, &registration.key)?;
            if registration.skipped > 0 {
                warnings.push(AccessWarning::SkippedPois {
                    category: registration.key.clone(),
                    skipped:  registration.skipped,
                });
            }
            if columns.is_empty_result() {
                warnings.push(AccessWarning::EmptyResult { category: registration.key.clone() });
            }
            table.push_group(columns);
            amenities.extend(registration.records);
        }

        Ok(AccessibilityReport {
            table,
            amenities: dedupe_records(amenities),
            warnings,
            failures,
        })
    }
}

fn category_key<T: AsRef<str>>(amenities: &[T]) -> AccessResult<CategoryKey> {
    CategoryKey::new(amenities).map_err(|e| AccessError::InvalidInput(e.to_string()))
}

fn tag_strings<T: AsRef<str>>(amenities: &[T]) -> Vec<String> {
    amenities.iter().map(|t| t.as_ref().to_owned()).collect()
}

/// Join per-node results onto the query rows.
///
/// Every distinct snapped node must appear in both result maps.
pub(crate) fn merge_by_node(
    snapped: &SnappedPoints,
    key:     &CategoryKey,
    config:  AccessConfig,
    nearest: &FxHashMap<NodeId, Vec<Option<f64>>>,
    counts:  &FxHashMap<NodeId, u32>,
) -> AccessResult<CategoryColumns> {
    for &node in nearest.keys() {
        if !counts.contains_key(&node) {
            return Err(AccessError::MergeInconsistency { node, present: "distance", missing: "count" });
        }
    }
    for &node in counts.keys() {
        if !nearest.contains_key(&node) {
            return Err(AccessError::MergeInconsistency { node, present: "count", missing: "distance" });
        }
    }

    let mut rows_nearest = Vec::with_capacity(snapped.len());
    let mut rows_counts = Vec::with_capacity(snapped.len());
    for &node in &snapped.nodes {
        match (nearest.get(&node), counts.get(&node)) {
            (Some(d), Some(&c)) => {
                rows_nearest.push(d.clone());
                rows_counts.push(c);
            }
            _ => {
                return Err(AccessError::MergeInconsistency {
                    node,
                    present: "query",
                    missing: "distance and count",
                });
            }
        }
    }

    Ok(CategoryColumns {
        key:            key.clone(),
        max_distance_m: config.max_distance_m,
        nearest:        rows_nearest,
        counts:         rows_counts,
    })
}
