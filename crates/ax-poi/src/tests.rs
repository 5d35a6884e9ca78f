//! Unit tests for ax-poi.

#[cfg(test)]
mod csv_loader {
    use std::io::Cursor;

    use crate::{PoiError, load_pois_reader};

    const POIS_CSV: &str = "\
osm_id,lat,lon,amenity,name,addr:city,addr:street
101,14.6012,121.0321,hospital,St. Luke's,Quezon City,E. Rodriguez Sr. Ave
102,14.5873,121.0614, clinic ,,Pasig,
";

    #[test]
    fn parses_optional_columns() {
        let rows = load_pois_reader(Cursor::new(POIS_CSV)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].osm_id, Some(101));
        assert_eq!(rows[0].name.as_deref(), Some("St. Luke's"));
        assert_eq!(rows[0].addr_city.as_deref(), Some("Quezon City"));
        assert_eq!(rows[0].addr_town, None);
        assert_eq!(rows[1].amenity, "clinic");
        assert_eq!(rows[1].name, None);
        assert_eq!(rows[1].addr_street, None);
    }

    #[test]
    fn minimal_columns() {
        let csv = "lat,lon,amenity\n0.5,0.51,school\n";
        let rows = load_pois_reader(Cursor::new(csv)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].osm_id, None);
    }

    #[test]
    fn invalid_coordinate_rejected() {
        let csv = "lat,lon,amenity\n95.0,0.0,school\n";
        let err = load_pois_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, PoiError::Parse(ref m) if m.contains("row 1")));
    }

    #[test]
    fn blank_amenity_rejected() {
        let csv = "lat,lon,amenity\n0.0,0.0,  \n";
        assert!(matches!(load_pois_reader(Cursor::new(csv)), Err(PoiError::Parse(_))));
    }

    #[test]
    fn malformed_number_is_csv_error() {
        let csv = "lat,lon,amenity\nabc,0.0,school\n";
        assert!(matches!(load_pois_reader(Cursor::new(csv)), Err(PoiError::Csv(_))));
    }
}

#[cfg(test)]
mod sources {
    use ax_core::BoundingBox;

    use crate::{MemoryPoiSource, PoiRecord, PoiSource, ProviderSession};

    fn unit_box() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap()
    }

    fn source() -> MemoryPoiSource {
        MemoryPoiSource::new(vec![
            PoiRecord::new(0.5, 0.51, "hospital"),
            PoiRecord::new(0.2, 0.2, "clinic"),
            PoiRecord::new(2.0, 2.0, "hospital"), // outside the box
        ])
    }

    #[test]
    fn filters_by_tag_and_box() {
        let session = ProviderSession::anonymous("memory");
        let got = source().fetch(&session, &unit_box(), "hospital").unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].lat, 0.5);
    }

    #[test]
    fn unknown_tag_is_empty_not_error() {
        let session = ProviderSession::anonymous("memory");
        assert!(source().fetch(&session, &unit_box(), "library").unwrap().is_empty());
    }
}

#[cfg(test)]
mod session {
    use std::time::Duration;

    use ax_core::BoundingBox;

    use crate::{AuthError, MemoryPoiSource, PoiError, PoiRecord, PoiResult, PoiSource, ProviderSession};

    struct GatedSource(MemoryPoiSource);

    impl PoiSource for GatedSource {
        fn name(&self) -> &str {
            "gated"
        }
        fn requires_credential(&self) -> bool {
            true
        }
        fn query(&self, bbox: &BoundingBox, amenity: &str) -> PoiResult<Vec<PoiRecord>> {
            self.0.query(bbox, amenity)
        }
    }

    #[test]
    fn zero_ttl_is_expired() {
        let s = ProviderSession::acquire("overpass", "token", Some(Duration::ZERO));
        assert!(s.is_expired());
        assert_eq!(
            s.authorize(false),
            Err(AuthError::Expired { provider: "overpass".into() })
        );
    }

    #[test]
    fn no_ttl_never_expires() {
        let s = ProviderSession::acquire("overpass", "token", None);
        assert!(!s.is_expired());
        assert!(s.authorize(true).is_ok());
    }

    #[test]
    fn long_ttl_reusable() {
        let s = ProviderSession::acquire("overpass", "token", Some(Duration::from_secs(3_600)));
        assert!(s.authorize(true).is_ok());
        assert!(s.authorize(true).is_ok());
    }

    #[test]
    fn fetch_requires_credential() {
        let src = GatedSource(MemoryPoiSource::new(vec![PoiRecord::new(0.5, 0.5, "school")]));
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();

        let anon = ProviderSession::anonymous("gated");
        let err = src.fetch(&anon, &bbox, "school").unwrap_err();
        assert!(matches!(err, PoiError::Auth(AuthError::MissingCredential { .. })));

        let authed = ProviderSession::acquire("gated", "secret", None);
        assert_eq!(src.fetch(&authed, &bbox, "school").unwrap().len(), 1);
    }

    #[test]
    fn debug_redacts_credential() {
        let s = ProviderSession::acquire("overpass", "hunter2", None);
        let printed = format!("{s:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}

#[cfg(test)]
mod dedupe {
    use crate::{PoiRecord, dedupe_records};

    #[test]
    fn by_osm_id() {
        let rows = vec![
            PoiRecord::new(0.5, 0.5, "hospital").with_osm_id(1),
            PoiRecord::new(0.5, 0.5, "hospital").with_osm_id(1),
            PoiRecord::new(0.5, 0.5, "hospital").with_osm_id(2),
        ];
        assert_eq!(dedupe_records(rows).len(), 2);
    }

    #[test]
    fn by_fields_without_ids() {
        let rows = vec![
            PoiRecord::new(0.5, 0.5, "clinic").with_name("A"),
            PoiRecord::new(0.5, 0.5, "clinic").with_name("A"),
            PoiRecord::new(0.5, 0.5, "clinic").with_name("B"),
        ];
        let out = dedupe_records(rows);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name.as_deref(), Some("A"));
    }

    #[test]
    fn set_tag_fills_address() {
        let mut r = PoiRecord::new(0.0, 0.0, "school");
        r.set_tag("addr:city", "Manila");
        r.set_tag("cuisine", "ignored");
        assert_eq!(r.addr_city.as_deref(), Some("Manila"));
    }
}
