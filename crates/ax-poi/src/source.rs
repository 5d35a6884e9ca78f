//! The `PoiSource` trait and the in-memory source.

use std::collections::HashSet;

use ax_core::BoundingBox;

use crate::{PoiRecord, PoiResult, ProviderSession};

/// A provider of POI records, queried by AOI and amenity tag.
///
/// Implementors supply [`query`](Self::query); callers use
/// [`fetch`](Self::fetch), which authorises the session first.
pub trait PoiSource {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Whether fetches need a session carrying a credential.
    fn requires_credential(&self) -> bool {
        false
    }

    /// Every record tagged `amenity` inside `bbox`.  An unknown tag yields
    /// an empty list, not an error.
    fn query(&self, bbox: &BoundingBox, amenity: &str) -> PoiResult<Vec<PoiRecord>>;

    /// Authorise `session`, then [`query`](Self::query).
    fn fetch(
        &self,
        session: &ProviderSession,
        bbox: &BoundingBox,
        amenity: &str,
    ) -> PoiResult<Vec<PoiRecord>> {
        session.authorize(self.requires_credential())?;
        let records = self.query(bbox, amenity)?;
        log::debug!("{}: {} records for amenity={amenity}", self.name(), records.len());
        Ok(records)
    }
}

// ── MemoryPoiSource ───────────────────────────────────────────────────────────

/// POI records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPoiSource {
    records: Vec<PoiRecord>,
}

impl MemoryPoiSource {
    pub fn new(records: Vec<PoiRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PoiRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PoiSource for MemoryPoiSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn query(&self, bbox: &BoundingBox, amenity: &str) -> PoiResult<Vec<PoiRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.amenity == amenity && bbox.contains(r.pos()))
            .cloned()
            .collect())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Drop repeated records, keeping the first occurrence.
///
/// Records are the same POI when they share an OSM id, or, lacking ids, the
/// same coordinates, amenity and name.
pub fn dedupe_records(records: Vec<PoiRecord>) -> Vec<PoiRecord> {
    #[derive(PartialEq, Eq, Hash)]
    enum Identity {
        Osm(i64),
        Fields(u64, u64, String, Option<String>),
    }

    let mut seen: HashSet<Identity> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| {
            let id = match r.osm_id {
                Some(id) => Identity::Osm(id),
                None => Identity::Fields(r.lat.to_bits(), r.lon.to_bits(), r.amenity.clone(), r.name.clone()),
            };
            seen.insert(id)
        })
        .collect()
}
