//! Query points: the sampled locations accessibility is scored for.

use crate::GeoPoint;

/// One input location, in the `longitude, latitude` order used by query
/// tables and CSV inputs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPoint {
    pub lon: f64,
    pub lat: f64,
}

impl QueryPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[inline]
    pub fn pos(self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

impl From<GeoPoint> for QueryPoint {
    fn from(p: GeoPoint) -> Self {
        Self { lon: p.lon, lat: p.lat }
    }
}
