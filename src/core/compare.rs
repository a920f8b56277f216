use serde::{Deserialize, Serialize};
use crate::models::{Listing, PropertyType};

/// Fewest listings worth comparing
pub const MIN_COMPARE: usize = 2;
/// Most listings shown side by side
pub const MAX_COMPARE: usize = 3;
/// Feature tags shown per column before collapsing into "+N more"
const FEATURE_PREVIEW: usize = 4;

/// One column of a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub id: String,
    pub price: u64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub image: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub square_feet: u32,
    /// Rounded to whole dollars; `None` for zero footage
    pub price_per_sqft: Option<u64>,
    pub year_built: u16,
    pub property_type: PropertyType,
    pub lot_size: Option<f64>,
    pub features: Vec<String>,
    pub more_features: usize,
}

impl From<&Listing> for ComparisonEntry {
    fn from(listing: &Listing) -> Self {
        let features: Vec<String> = listing
            .features
            .iter()
            .take(FEATURE_PREVIEW)
            .cloned()
            .collect();

        Self {
            id: listing.id.clone(),
            price: listing.price,
            address: listing.address.clone(),
            city: listing.city.clone(),
            state: listing.state.clone(),
            image: listing.images.first().cloned(),
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            square_feet: listing.square_feet,
            price_per_sqft: listing.price_per_sqft().map(|ratio| ratio.round() as u64),
            year_built: listing.year_built,
            property_type: listing.property_type,
            lot_size: listing.lot_size,
            more_features: listing.features.len().saturating_sub(features.len()),
            features,
        }
    }
}

/// Build comparison columns in the given order
pub fn compare<'a, I>(listings: I) -> Vec<ComparisonEntry>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings.into_iter().map(ComparisonEntry::from).collect()
}

/// Ids picked for comparison, capped at [`MAX_COMPARE`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    ids: Vec<String>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove an id
    ///
    /// Returns `false` when the id was not added because the selection is full.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|selected| selected == id) {
            self.ids.remove(pos);
            return true;
        }

        if self.ids.len() >= MAX_COMPARE {
            return false;
        }

        self.ids.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn can_compare(&self) -> bool {
        (MIN_COMPARE..=MAX_COMPARE).contains(&self.ids.len())
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_listing(id: &str, square_feet: u32, features: &[&str]) -> Listing {
        Listing {
            id: id.to_string(),
            price: 450_000,
            address: "42 Compare Ct".to_string(),
            city: "Earlysville".to_string(),
            state: "VA".to_string(),
            zip_code: "22936".to_string(),
            bedrooms: 3,
            bathrooms: 2.5,
            square_feet,
            property_type: PropertyType::Condo,
            year_built: 1998,
            images: vec!["https://img.test/1.jpg".to_string()],
            description: String::new(),
            features: features.iter().map(|f| f.to_string()).collect(),
            lot_size: Some(0.25),
            days_on_market: 12,
            has_hoa: None,
            hoa_fee: None,
            pet_friendly: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_selection_capped_at_three() {
        let mut selection = CompareSelection::new();

        assert!(selection.toggle("a"));
        assert!(!selection.can_compare());
        assert!(selection.toggle("b"));
        assert!(selection.can_compare());
        assert!(selection.toggle("c"));
        assert!(!selection.toggle("d"));
        assert_eq!(selection.len(), 3);
        assert!(!selection.contains("d"));

        // Deselecting frees a slot
        assert!(selection.toggle("a"));
        assert!(selection.toggle("d"));
        assert_eq!(selection.ids(), ["b", "c", "d"]);
    }

    #[test]
    fn test_entry_rounds_price_per_sqft() {
        let listing = create_listing("a", 1800, &[]);
        let entry = ComparisonEntry::from(&listing);

        // 450000 / 1800 = 250
        assert_eq!(entry.price_per_sqft, Some(250));
        assert_eq!(entry.image.as_deref(), Some("https://img.test/1.jpg"));
    }

    #[test]
    fn test_entry_zero_footage() {
        let listing = create_listing("a", 0, &[]);
        assert_eq!(ComparisonEntry::from(&listing).price_per_sqft, None);
    }

    #[test]
    fn test_feature_preview() {
        let listing = create_listing(
            "a",
            1500,
            &["Pool", "Garage", "Deck", "Patio", "Basement", "Fireplace"],
        );
        let entries = compare([&listing]);

        assert_eq!(entries[0].features, vec!["Pool", "Garage", "Deck", "Patio"]);
        assert_eq!(entries[0].more_features, 2);
    }
}
