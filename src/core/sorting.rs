use std::cmp::Ordering;
use crate::models::{Listing, SortBy};

/// Sort listings in place by the active sort key
///
/// The sort is stable: listings that compare equal keep their input order.
/// There is no secondary tie-break.
pub fn sort_listings(listings: &mut [Listing], sort_by: SortBy) {
    match sort_by {
        SortBy::PriceAsc => listings.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceDesc => listings.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Newest => listings.sort_by(|a, b| a.days_on_market.cmp(&b.days_on_market)),
        SortBy::SqftDesc => listings.sort_by(|a, b| b.square_feet.cmp(&a.square_feet)),
        SortBy::PricePerSqft => listings.sort_by(compare_price_per_sqft),
    }
}

/// Ascending price per square foot; zero footage counts as an unbounded ratio
fn compare_price_per_sqft(a: &Listing, b: &Listing) -> Ordering {
    match (a.price_per_sqft(), b.price_per_sqft()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyType;

    fn listing(id: &str, price: u64, square_feet: u32, days_on_market: u32) -> Listing {
        Listing {
            id: id.to_string(),
            price,
            address: format!("{} Test Lane", id),
            city: "Charlottesville".to_string(),
            state: "VA".to_string(),
            zip_code: "22901".to_string(),
            bedrooms: 3,
            bathrooms: 2.0,
            square_feet,
            property_type: PropertyType::House,
            year_built: 2000,
            images: vec![],
            description: String::new(),
            features: vec![],
            lot_size: None,
            days_on_market,
            has_hoa: None,
            hoa_fee: None,
            pet_friendly: None,
            latitude: None,
            longitude: None,
        }
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_price_ascending_and_descending() {
        let mut listings = vec![
            listing("a", 500_000, 2000, 5),
            listing("b", 300_000, 1500, 10),
            listing("c", 700_000, 3000, 1),
        ];

        sort_listings(&mut listings, SortBy::PriceAsc);
        assert_eq!(ids(&listings), vec!["b", "a", "c"]);

        sort_listings(&mut listings, SortBy::PriceDesc);
        assert_eq!(ids(&listings), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_newest_is_fewest_days_on_market() {
        let mut listings = vec![
            listing("a", 500_000, 2000, 30),
            listing("b", 300_000, 1500, 2),
            listing("c", 700_000, 3000, 14),
        ];

        sort_listings(&mut listings, SortBy::Newest);
        assert_eq!(ids(&listings), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sqft_descending() {
        let mut listings = vec![
            listing("a", 500_000, 2000, 30),
            listing("b", 300_000, 3500, 2),
        ];

        sort_listings(&mut listings, SortBy::SqftDesc);
        assert_eq!(ids(&listings), vec!["b", "a"]);
    }

    #[test]
    fn test_price_per_sqft_zero_footage_sorts_last() {
        let mut listings = vec![
            listing("land", 50_000, 0, 1),
            listing("pricey", 900_000, 1000, 1),
            listing("cheap", 200_000, 2000, 1),
            listing("land2", 10_000, 0, 1),
        ];

        sort_listings(&mut listings, SortBy::PricePerSqft);
        assert_eq!(ids(&listings), vec!["cheap", "pricey", "land", "land2"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut listings = vec![
            listing("first", 400_000, 2000, 7),
            listing("second", 400_000, 1800, 7),
            listing("third", 400_000, 2200, 7),
        ];

        sort_listings(&mut listings, SortBy::PriceAsc);
        assert_eq!(ids(&listings), vec!["first", "second", "third"]);

        sort_listings(&mut listings, SortBy::Newest);
        assert_eq!(ids(&listings), vec!["first", "second", "third"]);
    }
}
