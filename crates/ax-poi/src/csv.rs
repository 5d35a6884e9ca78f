//! CSV POI source.
//!
//! # CSV format
//!
//! One row per POI.  `lat`, `lon` and `amenity` are required; every other
//! column is optional and may be left empty.
//!
//! ```csv
//! osm_id,lat,lon,amenity,name,addr:city,addr:street
//! 101,14.6012,121.0321,hospital,St. Luke's,Quezon City,E. Rodriguez Sr. Ave
//! 102,14.5873,121.0614,clinic,,Pasig,
//! ```
//!
//! The whole file is loaded once; queries filter in memory.

use std::io::Read;
use std::path::Path;

use ax_core::{BoundingBox, GeoPoint};

use crate::source::{MemoryPoiSource, PoiSource};
use crate::{PoiError, PoiRecord, PoiResult};

/// POI records loaded from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvPoiSource {
    name:  String,
    inner: MemoryPoiSource,
}

impl CsvPoiSource {
    /// Load every record in `path`.
    pub fn open(path: &Path) -> PoiResult<Self> {
        let file = std::fs::File::open(path)?;
        let records = load_pois_reader(file)?;
        log::info!("loaded {} POI records from {}", records.len(), path.display());
        Ok(Self {
            name:  path.display().to_string(),
            inner: MemoryPoiSource::new(records),
        })
    }

    pub fn records(&self) -> &[PoiRecord] {
        self.inner.records()
    }
}

impl PoiSource for CsvPoiSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self, bbox: &BoundingBox, amenity: &str) -> PoiResult<Vec<PoiRecord>> {
        self.inner.query(bbox, amenity)
    }
}

/// Parse POI records from any `Read` source.
///
/// Rows with out-of-range coordinates or a blank amenity are rejected with
/// the 1-based data row number.
pub fn load_pois_reader<R: Read>(reader: R) -> PoiResult<Vec<PoiRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize::<PoiRecord>().enumerate() {
        let mut row = result?;
        row.amenity = row.amenity.trim().to_owned();
        if row.amenity.is_empty() {
            return Err(PoiError::Parse(format!("row {}: blank amenity", i + 1)));
        }
        if !GeoPoint::new(row.lat, row.lon).is_valid() {
            return Err(PoiError::Parse(format!(
                "row {}: invalid coordinate ({}, {})",
                i + 1,
                row.lon,
                row.lat
            )));
        }
        records.push(row);
    }

    Ok(records)
}
