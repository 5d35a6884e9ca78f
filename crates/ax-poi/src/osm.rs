//! OSM PBF POI source, enabled with the `osm` Cargo feature.
//!
//! Reads `amenity=*` nodes straight from an extract.  Each query is a full
//! sequential pass over the file; callers with many tags should prefer
//! loading once into a [`MemoryPoiSource`](crate::MemoryPoiSource) via
//! [`PbfPoiSource::load_all`].

use std::path::{Path, PathBuf};

use osmpbf::{Element, ElementReader};

use ax_core::{BoundingBox, GeoPoint};

use crate::source::{MemoryPoiSource, PoiSource};
use crate::{PoiError, PoiRecord, PoiResult};

/// Amenity nodes read from an OSM PBF file.
#[derive(Debug, Clone)]
pub struct PbfPoiSource {
    path: PathBuf,
    name: String,
}

impl PbfPoiSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            name: path.display().to_string(),
        }
    }

    /// Every amenity node inside `bbox`, whatever its tag, in one pass.
    pub fn load_all(&self, bbox: &BoundingBox) -> PoiResult<MemoryPoiSource> {
        self.scan(bbox, None).map(MemoryPoiSource::new)
    }

    fn scan(&self, bbox: &BoundingBox, amenity: Option<&str>) -> PoiResult<Vec<PoiRecord>> {
        let reader = ElementReader::from_path(&self.path).map_err(|e| PoiError::Osm(e.to_string()))?;
        let mut records = Vec::new();

        reader
            .for_each(|elem| {
                let record = match elem {
                    Element::Node(n) => {
                        amenity_record(n.id(), n.lat(), n.lon(), n.tags().collect(), bbox, amenity)
                    }
                    Element::DenseNode(n) => {
                        amenity_record(n.id(), n.lat(), n.lon(), n.tags().collect(), bbox, amenity)
                    }
                    _ => None,
                };
                records.extend(record);
            })
            .map_err(|e| PoiError::Osm(e.to_string()))?;

        Ok(records)
    }
}

impl PoiSource for PbfPoiSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self, bbox: &BoundingBox, amenity: &str) -> PoiResult<Vec<PoiRecord>> {
        self.scan(bbox, Some(amenity))
    }
}

/// Build a record for an `amenity=*` node inside `bbox`, optionally
/// restricted to one amenity value.
fn amenity_record(
    id: i64,
    lat: f64,
    lon: f64,
    tags: Vec<(&str, &str)>,
    bbox: &BoundingBox,
    wanted: Option<&str>,
) -> Option<PoiRecord> {
    if !bbox.contains(GeoPoint::new(lat, lon)) {
        return None;
    }
    let &(_, amenity) = tags.iter().find(|(k, _)| *k == "amenity")?;
    if wanted.is_some_and(|w| w != amenity) {
        return None;
    }
    let mut record = PoiRecord::new(lat, lon, amenity).with_osm_id(id);
    for (k, v) in tags {
        record.set_tag(k, v);
    }
    Some(record)
}
