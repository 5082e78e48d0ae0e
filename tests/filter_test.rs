#[cfg(test)]
mod filter_engine {
    use appartmap::models::criteria::FilterCriteria;
    use appartmap::models::listing::Listing;
    use appartmap::services::filter::split_listings;

    fn located(address: &str, rent: Option<i64>) -> Listing {
        Listing {
            address: Some(address.to_string()),
            rent,
            latitude: Some(43.6),
            longitude: Some(3.88),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_gives_empty_outputs() {
        let outcome = split_listings(
            &[],
            &FilterCriteria {
                max_rent: Some(1000),
                property_type: Some("T2".to_string()),
                parking: None,
            },
        );
        assert!(outcome.visible.is_empty());
        assert!(outcome.unlocated.is_empty());
    }

    #[test]
    fn located_listing_within_rent_bound_is_visible() {
        let listings = vec![
            located("1 rue X", Some(800)),
            Listing {
                address: Some("2 rue Y".to_string()),
                rent: Some(1500),
                ..Default::default()
            },
        ];
        let criteria = FilterCriteria {
            max_rent: Some(1000),
            ..Default::default()
        };

        let outcome = split_listings(&listings, &criteria);

        assert_eq!(outcome.visible.len(), 1);
        assert_eq!(outcome.visible[0].address, Some("1 rue X".to_string()));
        assert_eq!(outcome.unlocated.len(), 1);
        assert_eq!(outcome.unlocated[0].address, Some("2 rue Y".to_string()));
    }

    #[test]
    fn unlocated_listings_bypass_every_other_filter() {
        // A listing failing rent, type, and parking still surfaces in the
        // unlocated list when it has no usable coordinates.
        let listings = vec![
            Listing {
                rent: Some(99999),
                property_type: Some("T5".to_string()),
                parking: Some("non".to_string()),
                ..Default::default()
            },
            Listing {
                rent: Some(500),
                latitude: Some(f64::NAN),
                longitude: Some(3.88),
                ..Default::default()
            },
            Listing {
                rent: Some(500),
                latitude: Some(43.6),
                ..Default::default()
            },
        ];
        let criteria = FilterCriteria {
            max_rent: Some(700),
            property_type: Some("T2".to_string()),
            parking: Some("oui".to_string()),
        };

        let outcome = split_listings(&listings, &criteria);

        assert!(outcome.visible.is_empty());
        assert_eq!(outcome.unlocated.len(), 3);
    }

    #[test]
    fn located_listing_failing_a_filter_is_dropped_entirely() {
        let mut too_expensive = located("3 rue Z", Some(2000));
        too_expensive.property_type = Some("T2".to_string());

        let outcome = split_listings(
            &[too_expensive],
            &FilterCriteria {
                max_rent: Some(1000),
                ..Default::default()
            },
        );

        assert!(outcome.visible.is_empty());
        assert!(outcome.unlocated.is_empty());
    }

    #[test]
    fn absent_rent_passes_a_rent_bound() {
        let outcome = split_listings(
            &[located("1 rue X", None)],
            &FilterCriteria {
                max_rent: Some(100),
                ..Default::default()
            },
        );
        assert_eq!(outcome.visible.len(), 1);
    }

    #[test]
    fn unset_rent_bound_is_unbounded() {
        let outcome = split_listings(
            &[located("1 rue X", Some(123456))],
            &FilterCriteria::none(),
        );
        assert_eq!(outcome.visible.len(), 1);
    }

    #[test]
    fn type_and_parking_match_case_insensitively() {
        let mut listing = located("1 rue X", Some(800));
        listing.property_type = Some("t2".to_string());
        listing.parking = Some("OUI".to_string());

        let criteria = FilterCriteria {
            max_rent: None,
            property_type: Some("T2".to_string()),
            parking: Some("oui".to_string()),
        };
        let outcome = split_listings(std::slice::from_ref(&listing), &criteria);
        assert_eq!(outcome.visible.len(), 1);

        // A listing with no type fails a non-empty type filter.
        listing.property_type = None;
        let outcome = split_listings(&[listing], &criteria);
        assert!(outcome.visible.is_empty());
    }

    #[test]
    fn input_order_is_preserved_in_both_outputs() {
        let listings = vec![
            located("a", Some(1)),
            Listing::default(),
            located("b", Some(2)),
            Listing {
                label: Some("x".to_string()),
                ..Default::default()
            },
            located("c", Some(3)),
        ];

        let outcome = split_listings(&listings, &FilterCriteria::none());

        let visible: Vec<_> = outcome
            .visible
            .iter()
            .map(|l| l.address.clone().unwrap())
            .collect();
        assert_eq!(visible, vec!["a", "b", "c"]);
        assert_eq!(outcome.unlocated.len(), 2);
        assert_eq!(outcome.unlocated[1].label, Some("x".to_string()));
    }
}
