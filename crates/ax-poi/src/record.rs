//! Raw POI records as returned by a source.

use serde::{Deserialize, Serialize};

use ax_core::GeoPoint;

/// One point of interest: where it is, what amenity it is, and the address
/// fragments OSM usually carries.
///
/// Field names on the wire follow OSM tag names (`addr:city`, …) so CSV
/// exports round-trip through the same columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    #[serde(default)]
    pub osm_id: Option<i64>,
    pub lat: f64,
    pub lon: f64,
    pub amenity: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "addr:city", default)]
    pub addr_city: Option<String>,
    #[serde(rename = "addr:street", default)]
    pub addr_street: Option<String>,
    #[serde(rename = "addr:province", default)]
    pub addr_province: Option<String>,
    #[serde(rename = "addr:town", default)]
    pub addr_town: Option<String>,
    #[serde(rename = "addr:housenumber", default)]
    pub addr_housenumber: Option<String>,
    #[serde(rename = "addr:municipality", default)]
    pub addr_municipality: Option<String>,
}

impl PoiRecord {
    /// Column order used by every tabular export of POI records.
    pub const COLUMNS: [&'static str; 11] = [
        "osm_id",
        "lat",
        "lon",
        "amenity",
        "name",
        "addr:city",
        "addr:street",
        "addr:province",
        "addr:town",
        "addr:housenumber",
        "addr:municipality",
    ];

    /// A record with coordinates and amenity only.
    pub fn new(lat: f64, lon: f64, amenity: impl Into<String>) -> Self {
        Self {
            osm_id: None,
            lat,
            lon,
            amenity: amenity.into(),
            name: None,
            addr_city: None,
            addr_street: None,
            addr_province: None,
            addr_town: None,
            addr_housenumber: None,
            addr_municipality: None,
        }
    }

    pub fn with_osm_id(mut self, id: i64) -> Self {
        self.osm_id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn pos(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Set an address fragment from its OSM tag name; unknown tags are
    /// ignored.
    pub fn set_tag(&mut self, key: &str, value: &str) {
        let slot = match key {
            "name" => &mut self.name,
            "addr:city" => &mut self.addr_city,
            "addr:street" => &mut self.addr_street,
            "addr:province" => &mut self.addr_province,
            "addr:town" => &mut self.addr_town,
            "addr:housenumber" => &mut self.addr_housenumber,
            "addr:municipality" => &mut self.addr_municipality,
            _ => return,
        };
        *slot = Some(value.to_owned());
    }
}
