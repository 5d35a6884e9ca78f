//! Axis-aligned bounding box used as the area of interest (AOI).
//!
//! An AOI arrives as a closed polygon ring of five `[lon, lat]` pairs (the
//! GeoJSON rectangle convention: four corners plus the repeated first
//! corner).  Only the extent of the ring matters downstream; the network and
//! POI providers query by box, not by polygon.

use crate::{CoreError, CoreResult, GeoPoint};

/// Number of positions in a closed rectangular ring.
pub const RING_LEN: usize = 5;

/// Inclusive lat/lon rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build a box from its corners, rejecting inverted or degenerate extents.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> CoreResult<Self> {
        let lo = GeoPoint::new(min_lat, min_lon);
        let hi = GeoPoint::new(max_lat, max_lon);
        if !lo.is_valid() || !hi.is_valid() {
            return Err(CoreError::InvalidBoundingBox(format!(
                "corner outside WGS-84 range: {lo} .. {hi}"
            )));
        }
        if min_lat >= max_lat || min_lon >= max_lon {
            return Err(CoreError::InvalidBoundingBox(format!(
                "empty extent: {lo} .. {hi}"
            )));
        }
        Ok(Self { min_lat, min_lon, max_lat, max_lon })
    }

    /// Parse a closed ring of exactly five `[lon, lat]` pairs.
    ///
    /// The first and last positions must be identical.  The box is the
    /// min/max extent of the ring.
    pub fn from_ring(ring: &[[f64; 2]]) -> CoreResult<Self> {
        if ring.len() != RING_LEN {
            return Err(CoreError::InvalidBoundingBox(format!(
                "expected {RING_LEN} positions in a closed ring, got {}",
                ring.len()
            )));
        }
        if ring[0] != ring[RING_LEN - 1] {
            return Err(CoreError::InvalidBoundingBox(
                "ring is not closed (first and last positions differ)".into(),
            ));
        }
        if let Some(&[lon, lat]) = ring.iter().find(|&&[lon, lat]| !GeoPoint::new(lat, lon).is_valid()) {
            return Err(CoreError::InvalidCoordinate { lon, lat });
        }

        let (mut min_lat, mut min_lon) = (f64::INFINITY, f64::INFINITY);
        let (mut max_lat, mut max_lon) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &[lon, lat] in ring {
            min_lat = min_lat.min(lat);
            min_lon = min_lon.min(lon);
            max_lat = max_lat.max(lat);
            max_lon = max_lon.max(lon);
        }
        Self::new(min_lat, min_lon, max_lat, max_lon)
    }

    /// Smallest box enclosing every point, or `None` for an empty iterator.
    ///
    /// Unlike [`new`](Self::new) this accepts a zero-area extent (a single
    /// point), which is what a one-node network covers.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Self {
            min_lat: first.lat,
            min_lon: first.lon,
            max_lat: first.lat,
            max_lon: first.lon,
        };
        for p in iter {
            bb.min_lat = bb.min_lat.min(p.lat);
            bb.min_lon = bb.min_lon.min(p.lon);
            bb.max_lat = bb.max_lat.max(p.lat);
            bb.max_lon = bb.max_lon.max(p.lon);
        }
        Some(bb)
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.min_lat && p.lat <= self.max_lat && p.lon >= self.min_lon && p.lon <= self.max_lon
    }

    /// `true` if the two boxes share at least one point.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
            && self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) * 0.5,
            (self.min_lon + self.max_lon) * 0.5,
        )
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}, {:.6}, {:.6}]",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}
