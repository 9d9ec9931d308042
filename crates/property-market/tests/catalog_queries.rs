use std::path::PathBuf;

use property_market::catalog::{
    classify_volume, BoroughTable, CatalogError, CsvListingSource, InMemoryListingSource,
    Listing, PropertyCatalog, SearchScope, SortCriterion, VolumeClass,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/london-listings.csv")
}

fn fixture_catalog() -> PropertyCatalog<CsvListingSource> {
    PropertyCatalog::new(
        CsvListingSource::from_path(fixture_path()),
        BoroughTable::london(),
    )
}

fn ids(listings: &[&Listing]) -> Vec<String> {
    listings.iter().map(|listing| listing.id.clone()).collect()
}

fn priced(id: &str, borough: &str, price: u32, nights: u32) -> Listing {
    Listing {
        id: id.to_string(),
        name: format!("Listing {id}"),
        host_id: "1".to_string(),
        host_name: "Host".to_string(),
        neighbourhood: borough.to_string(),
        room_type: "Private room".to_string(),
        price,
        minimum_nights: nights,
        number_of_reviews: 0,
        reviews_per_month: 0.0,
        calculated_host_listings_count: 1,
        availability_365: 0,
        latitude: 51.5,
        longitude: -0.1,
        last_review: None,
    }
}

#[test]
fn active_listings_respect_the_price_range() {
    let mut catalog = fixture_catalog();
    catalog.set_active_range(100, 200).expect("valid range");

    assert_eq!(catalog.active_len(), 5);
    for borough in catalog.boroughs().iter() {
        for listing in catalog.listings_in(&borough.name) {
            assert!((100..=200).contains(&listing.price), "{} out of range", listing.id);
        }
    }
}

#[test]
fn inverted_range_is_rejected() {
    let mut catalog = fixture_catalog();
    let err = catalog.set_active_range(10, 5).expect_err("max below min");
    assert!(matches!(err, CatalogError::InvalidRange { min: 10, max: 5 }));
}

#[test]
fn volume_classification_thresholds() {
    assert_eq!(classify_volume(0), VolumeClass::Empty);
    assert_eq!(classify_volume(999), VolumeClass::Low);
    assert_eq!(classify_volume(1000), VolumeClass::Medium);
    assert_eq!(classify_volume(2000), VolumeClass::High);
}

#[test]
fn borough_counts_and_listings() {
    let mut catalog = fixture_catalog();
    catalog.set_active_range(0, 1000).expect("valid range");

    assert_eq!(catalog.count_by_borough("Hackney"), 3);
    assert_eq!(catalog.count_by_borough("Bromley"), 0);
    assert!(catalog.listings_in("Bromley").is_empty());
    assert_eq!(
        ids(&catalog.listings_in("Hackney")),
        vec!["25318", "25319", "38151"]
    );
}

#[test]
fn relevancy_search_orders_exact_prefix_substring() {
    let mut catalog = fixture_catalog();
    catalog.set_active_range(0, 1000).expect("valid range");

    let ranked = catalog.search_by_relevancy("loft");
    assert_eq!(ids(&ranked), vec!["25318", "25319", "36274", "38151"]);

    let mut unique = ids(&ranked);
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ranked.len());
}

#[test]
fn substring_search_is_case_insensitive_and_scoped() {
    let mut catalog = fixture_catalog();
    catalog.set_active_range(0, 1000).expect("valid range");

    let everywhere = catalog.search("CHELSEA", &SearchScope::AllBoroughs);
    assert_eq!(ids(&everywhere), vec!["15400", "17506"]);

    let scoped = catalog.search(
        "chelsea",
        &SearchScope::Borough("Hammersmith and Fulham".to_string()),
    );
    assert_eq!(ids(&scoped), vec!["17506"]);
    assert!(catalog
        .search("castle", &SearchScope::AllBoroughs)
        .is_empty());
}

#[test]
fn price_sorts_mirror_each_other() {
    let mut catalog = fixture_catalog();
    catalog.set_active_range(0, 1000).expect("valid range");

    catalog.sort_by(SortCriterion::PriceAsc);
    let ascending: Vec<_> = catalog.listings().iter().map(|l| l.id.clone()).collect();
    catalog.sort_by(SortCriterion::PriceDesc);
    let mut descending: Vec<_> = catalog.listings().iter().map(|l| l.id.clone()).collect();
    descending.reverse();

    assert_eq!(ascending, descending);
    assert_eq!(catalog.listings()[0].price, 300);
}

#[test]
fn review_and_host_sorts_are_stable() {
    let source = InMemoryListingSource::new(vec![
        Listing {
            host_name: "Bea".to_string(),
            number_of_reviews: 5,
            ..priced("1", "Camden", 10, 1)
        },
        Listing {
            host_name: "Ada".to_string(),
            number_of_reviews: 9,
            ..priced("2", "Camden", 10, 1)
        },
        Listing {
            host_name: "Bea".to_string(),
            number_of_reviews: 5,
            ..priced("3", "Camden", 10, 1)
        },
    ]);
    let mut catalog = PropertyCatalog::new(source, BoroughTable::london());
    catalog.set_active_range(0, 100).expect("valid range");

    catalog.sort_by(SortCriterion::ReviewsDesc);
    assert_eq!(ids(&catalog.listings_in("Camden")), vec!["2", "1", "3"]);

    catalog.sort_by(SortCriterion::HostNameAsc);
    assert_eq!(ids(&catalog.listings_in("Camden")), vec!["2", "1", "3"]);
}

#[test]
fn describe_only_sees_the_active_subset() {
    let mut catalog = fixture_catalog();
    catalog.set_active_range(100, 200).expect("valid range");

    let listing = catalog.describe("36299").expect("listing in range");
    assert_eq!(listing.host_name, "Dom");

    let err = catalog.describe("13913").expect_err("priced below range");
    assert!(matches!(err, CatalogError::NotFound(id) if id == "13913"));
    assert!(matches!(
        catalog.describe("unknown-id"),
        Err(CatalogError::NotFound(_))
    ));
}

#[test]
fn narrowing_the_range_keeps_only_matching_listing() {
    let source = InMemoryListingSource::new(vec![
        priced("cheap", "Camden", 50, 1),
        priced("mid", "Camden", 150, 1),
        priced("dear", "Camden", 300, 1),
    ]);
    let mut catalog = PropertyCatalog::new(source, BoroughTable::london());
    catalog.set_active_range(100, 200).expect("valid range");

    assert_eq!(catalog.compute_statistics().active_count, 1);
    assert_eq!(catalog.listings()[0].id, "mid");
}

#[test]
fn most_expensive_borough_compares_average_stay_cost() {
    let source = InMemoryListingSource::new(vec![
        priced("b1", "B", 50, 1),
        priced("a1", "A", 50, 1),
        priced("a2", "A", 150, 1),
        priced("b2", "B", 25, 2),
    ]);
    let mut catalog = PropertyCatalog::new(source, BoroughTable::london());
    catalog.set_active_range(0, 500).expect("valid range");

    let snapshot = catalog.compute_statistics();
    assert_eq!(snapshot.most_expensive_borough.as_deref(), Some("A"));
}

#[test]
fn fixture_statistics_for_mid_range() {
    let mut catalog = fixture_catalog();
    catalog.set_active_range(100, 200).expect("valid range");

    let snapshot = catalog.compute_statistics();
    assert_eq!(snapshot.active_count, 5);
    assert_eq!(snapshot.entire_home_count, 4);
    assert_eq!(
        snapshot.most_expensive_borough.as_deref(),
        Some("Richmond upon Thames")
    );
    assert_eq!(snapshot.average_per_borough, 0);
    let average = snapshot.average_reviews.expect("non-empty subset");
    assert!((average - 45.8).abs() < 1e-9);

    let cheapest = snapshot.cheapest_booking.expect("non-empty subset");
    assert_eq!(cheapest.listing_id, "25319");
    assert_eq!(cheapest.cost, 240);
}
