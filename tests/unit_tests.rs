// Unit tests for HomeMatch

use homematch::core::{apply, sort_listings, ListingEngine, SwipeSession};
use homematch::models::{Listing, Preferences, PropertyType, SessionStatus, SortBy, SwipeAction};
use homematch::services::{catalog, load_listings, mock_listings, RealtorClient};

fn create_listing(id: &str, price: u64, square_feet: u32, days_on_market: u32) -> Listing {
    Listing {
        id: id.to_string(),
        price,
        address: format!("{} Test Road", id),
        city: "Charlottesville".to_string(),
        state: "VA".to_string(),
        zip_code: "22901".to_string(),
        bedrooms: 3,
        bathrooms: 2.0,
        square_feet,
        property_type: PropertyType::House,
        year_built: 2001,
        images: vec![],
        description: String::new(),
        features: vec!["Garage".to_string()],
        lot_size: None,
        days_on_market,
        has_hoa: None,
        hoa_fee: None,
        pet_friendly: None,
        latitude: None,
        longitude: None,
    }
}

fn ids(listings: &[Listing]) -> Vec<String> {
    listings.iter().map(|l| l.id.clone()).collect()
}

#[test]
fn test_default_bounds_only_reorder() {
    let listings = mock_listings();

    for sort_by in SortBy::ALL {
        let preferences = Preferences {
            sort_by,
            ..Preferences::default()
        };
        let result = apply(&listings, &preferences);

        // Nothing in the catalog is outside the default bounds
        let mut expected = listings.clone();
        sort_listings(&mut expected, sort_by);
        assert_eq!(result, expected, "sort {:?} changed more than the order", sort_by);
    }
}

#[test]
fn test_filtering_is_idempotent() {
    let listings = mock_listings();
    let preferences = Preferences {
        min_bedrooms: 3,
        cities: vec!["Charlottesville".to_string(), "Crozet".to_string()],
        sort_by: SortBy::PricePerSqft,
        ..Preferences::default()
    };

    let once = apply(&listings, &preferences);
    let twice = apply(&once, &preferences);

    assert_eq!(once, twice);
    assert_eq!(once, apply(&listings, &preferences));
}

#[test]
fn test_sort_orders_hold_pairwise() {
    let listings = mock_listings();

    let by = |sort_by| {
        apply(
            &listings,
            &Preferences {
                sort_by,
                ..Preferences::default()
            },
        )
    };

    for pair in by(SortBy::PriceAsc).windows(2) {
        assert!(pair[0].price <= pair[1].price);
    }
    for pair in by(SortBy::PriceDesc).windows(2) {
        assert!(pair[0].price >= pair[1].price);
    }
    for pair in by(SortBy::Newest).windows(2) {
        assert!(pair[0].days_on_market <= pair[1].days_on_market);
    }
    for pair in by(SortBy::SqftDesc).windows(2) {
        assert!(pair[0].square_feet >= pair[1].square_feet);
    }

    let value = by(SortBy::PricePerSqft);
    for pair in value.windows(2) {
        match (pair[0].price_per_sqft(), pair[1].price_per_sqft()) {
            (Some(a), Some(b)) => assert!(a <= b),
            (Some(_), None) | (None, None) => {}
            (None, Some(_)) => panic!("zero footage listing sorted before a priced one"),
        }
    }
    // The catalog's buildable lot has no footage
    assert_eq!(value.last().unwrap().square_feet, 0);
}

#[test]
fn test_price_ascending_example() {
    let listings = vec![
        create_listing("a", 500_000, 2000, 5),
        create_listing("b", 300_000, 2000, 5),
    ];
    let preferences = Preferences {
        sort_by: SortBy::PriceAsc,
        ..Preferences::default()
    };

    let prices: Vec<u64> = apply(&listings, &preferences).iter().map(|l| l.price).collect();
    assert_eq!(prices, vec![300_000, 500_000]);
}

#[test]
fn test_required_features_monotonic() {
    let listings = mock_listings();
    let mut preferences = Preferences::default();
    let mut previous = apply(&listings, &preferences).len();

    for feature in ["Garage", "Mountain View", "Fireplace", "Pool"] {
        preferences.must_have_features.push(feature.to_string());
        let current = apply(&listings, &preferences);

        assert!(current.len() <= previous);
        assert!(current
            .iter()
            .all(|l| preferences.must_have_features.iter().all(|f| l.features.contains(f))));
        previous = current.len();
    }
}

#[test]
fn test_pool_required_excludes_otherwise_matching_listing() {
    let mut with_pool = create_listing("pool", 400_000, 2000, 5);
    with_pool.features.push("Pool".to_string());
    let without_pool = create_listing("dry", 400_000, 2000, 5);

    let preferences = Preferences {
        must_have_features: vec!["Pool".to_string()],
        ..Preferences::default()
    };

    let result = apply(&[with_pool, without_pool], &preferences);
    assert_eq!(ids(&result), vec!["pool"]);
}

#[test]
fn test_equal_prices_keep_input_order() {
    let listings = vec![
        create_listing("x", 350_000, 1500, 9),
        create_listing("y", 350_000, 2500, 2),
        create_listing("z", 250_000, 1800, 4),
    ];
    let preferences = Preferences {
        sort_by: SortBy::PriceAsc,
        ..Preferences::default()
    };

    assert_eq!(ids(&apply(&listings, &preferences)), vec!["z", "x", "y"]);
}

#[test]
fn test_undo_restores_prior_state() {
    let listings: Vec<Listing> = (0..6)
        .map(|i| create_listing(&i.to_string(), 300_000 + i * 10_000, 2000, 5))
        .collect();
    let sequences = [
        vec![SwipeAction::Love],
        vec![SwipeAction::Pass, SwipeAction::Love],
        vec![SwipeAction::Love, SwipeAction::Love, SwipeAction::Pass],
        vec![SwipeAction::Pass, SwipeAction::Pass, SwipeAction::Love, SwipeAction::Pass],
    ];

    for actions in sequences {
        let mut session = SwipeSession::new(listings.clone());
        let (last, prefix) = actions.split_last().unwrap();
        for action in prefix {
            session.swipe(*action).unwrap();
        }

        let cursor = session.cursor();
        let liked = session.liked().to_vec();
        let passed = session.passed().to_vec();

        session.swipe(*last).unwrap();
        assert_eq!(session.undo().unwrap(), *last);

        assert_eq!(session.cursor(), cursor);
        assert_eq!(session.liked(), liked.as_slice());
        assert_eq!(session.passed(), passed.as_slice());
    }
}

#[test]
fn test_exhaustion_status() {
    let listings = vec![
        create_listing("1", 300_000, 2000, 1),
        create_listing("2", 310_000, 2000, 2),
        create_listing("3", 320_000, 2000, 3),
    ];

    let mut with_like = SwipeSession::new(listings.clone());
    with_like.pass().unwrap();
    with_like.love().unwrap();
    with_like.pass().unwrap();
    assert_eq!(with_like.cursor(), 3);
    assert_eq!(with_like.status(), SessionStatus::ExhaustedWithLikes);

    let mut no_likes = SwipeSession::new(listings);
    for _ in 0..3 {
        no_likes.pass().unwrap();
    }
    assert_eq!(no_likes.cursor(), 3);
    assert_eq!(no_likes.status(), SessionStatus::ExhaustedNoLikes);
    assert!(no_likes.love().is_err());
    assert_eq!(no_likes.cursor(), 3);
}

#[test]
fn test_engine_reports_total_candidates() {
    let listings = mock_listings();
    let preferences = Preferences {
        property_types: vec![PropertyType::Condo],
        ..Preferences::default()
    };

    let result = ListingEngine::new().apply(&listings, &preferences);

    assert_eq!(result.total_candidates, listings.len());
    assert!(result.listings.iter().all(|l| l.property_type == PropertyType::Condo));
}

#[test]
fn test_no_api_key_falls_back_to_catalog() {
    let client = RealtorClient::new(
        "http://127.0.0.1:9".to_string(),
        None,
        "realtor.p.rapidapi.com".to_string(),
        1,
    );
    let fallback = mock_listings();

    let outcome = tokio_test::block_on(load_listings(&client, "Charlottesville", "VA", 30, &fallback));

    assert_eq!(outcome.listings, fallback);
    assert_eq!(outcome.warning.as_deref(), Some(catalog::NO_RESULTS_WARNING));
}
