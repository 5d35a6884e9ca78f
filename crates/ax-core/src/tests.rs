//! Unit tests for ax-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(14.6, 121.0);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn one_hundredth_degree_of_latitude() {
        let a = GeoPoint::new(0.5, 0.5);
        let b = GeoPoint::new(0.51, 0.5);
        let d = a.distance_m(b);
        assert!((d - 1_111.95).abs() < 0.5, "got {d}");
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(14.6, 121.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_valid());
    }
}

#[cfg(test)]
mod bbox {
    use crate::{BoundingBox, CoreError, GeoPoint};

    const UNIT_RING: [[f64; 2]; 5] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]];

    #[test]
    fn ring_extent() {
        let bb = BoundingBox::from_ring(&UNIT_RING).unwrap();
        assert_eq!(bb.min_lat, 0.0);
        assert_eq!(bb.min_lon, 0.0);
        assert_eq!(bb.max_lat, 1.0);
        assert_eq!(bb.max_lon, 1.0);
    }

    #[test]
    fn manila_ring() {
        let ring = [
            [120.98976275, 14.58936896],
            [121.13383232, 14.58936896],
            [121.13383232, 14.77641364],
            [120.98976275, 14.77641364],
            [120.98976275, 14.58936896],
        ];
        let bb = BoundingBox::from_ring(&ring).unwrap();
        assert!(bb.contains(GeoPoint::new(14.6, 121.0)));
        assert!(!bb.contains(GeoPoint::new(14.5, 121.0)));
    }

    #[test]
    fn wrong_length_rejected() {
        let err = BoundingBox::from_ring(&UNIT_RING[..4]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBoundingBox(_)));
    }

    #[test]
    fn open_ring_rejected() {
        let mut ring = UNIT_RING;
        ring[4] = [0.0, 0.5];
        assert!(matches!(
            BoundingBox::from_ring(&ring),
            Err(CoreError::InvalidBoundingBox(_))
        ));
    }

    #[test]
    fn degenerate_ring_rejected() {
        let ring = [[1.0, 1.0]; 5];
        assert!(BoundingBox::from_ring(&ring).is_err());
    }

    #[test]
    fn out_of_range_coordinate_rejected() {
        let ring = [[0.0, 0.0], [200.0, 0.0], [200.0, 1.0], [0.0, 1.0], [0.0, 0.0]];
        assert!(matches!(
            BoundingBox::from_ring(&ring),
            Err(CoreError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn containment_is_inclusive() {
        let bb = BoundingBox::from_ring(&UNIT_RING).unwrap();
        assert!(bb.contains(GeoPoint::new(1.0, 1.0)));
        assert!(bb.contains(GeoPoint::new(0.0, 0.5)));
    }

    #[test]
    fn intersection() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = BoundingBox::new(0.5, 0.5, 2.0, 2.0).unwrap();
        let c = BoundingBox::new(5.0, 5.0, 6.0, 6.0).unwrap();
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn enclosing_single_point() {
        let bb = BoundingBox::enclosing([GeoPoint::new(1.0, 2.0)]).unwrap();
        assert!(bb.contains(GeoPoint::new(1.0, 2.0)));
        assert!(BoundingBox::enclosing(std::iter::empty()).is_none());
    }
}

#[cfg(test)]
mod category {
    use crate::category::format_km;
    use crate::CategoryKey;

    #[test]
    fn label_and_registry_name() {
        let key = CategoryKey::new(["hospital", "clinic"]).unwrap();
        assert_eq!(key.label(), "hospital_clinic");
        assert_eq!(key.registry_name(), "all_hospital_clinic");
    }

    #[test]
    fn duplicates_dropped_order_kept() {
        let key = CategoryKey::new(["school", " clinic ", "school"]).unwrap();
        assert_eq!(key.tags(), ["school", "clinic"]);
    }

    #[test]
    fn empty_and_blank_rejected() {
        assert!(CategoryKey::new(Vec::<String>::new()).is_err());
        assert!(CategoryKey::new(["  "]).is_err());
        assert!(CategoryKey::new(["bad\"tag"]).is_err());
    }

    #[test]
    fn column_names() {
        let key = CategoryKey::new(["hospital"]).unwrap();
        assert_eq!(key.nearest_column(1), "nearest_hospital_1");
        assert_eq!(key.count_column(2_000.0), "count_hospital_within_2.0km");
        assert_eq!(key.count_column(500.0), "count_hospital_within_0.5km");
    }

    #[test]
    fn km_formatting() {
        assert_eq!(format_km(1_250.0), "1.25");
        assert_eq!(format_km(10.0), "0.01");
    }
}

#[cfg(test)]
mod sample {
    use crate::{sample_points, BoundingBox};

    #[test]
    fn points_inside_bbox() {
        let bb = BoundingBox::new(14.58, 120.98, 14.77, 121.13).unwrap();
        let pts = sample_points(&bb, 200, 7);
        assert_eq!(pts.len(), 200);
        assert!(pts.iter().all(|p| bb.contains(p.pos())));
    }

    #[test]
    fn deterministic_per_seed() {
        let bb = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(sample_points(&bb, 10, 42), sample_points(&bb, 10, 42));
        assert_ne!(sample_points(&bb, 10, 42), sample_points(&bb, 10, 43));
    }
}
