use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Property type, one of a fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Condo,
    Townhouse,
    Apartment,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::Apartment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Apartment => "apartment",
        }
    }
}

/// A property listing, immutable for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub price: u64,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    pub bedrooms: u32,
    pub bathrooms: f32,
    #[serde(rename = "squareFeet")]
    pub square_feet: u32,
    #[serde(rename = "propertyType")]
    pub property_type: PropertyType,
    #[serde(rename = "yearBuilt")]
    pub year_built: u16,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(rename = "lotSize", default)]
    pub lot_size: Option<f64>,
    #[serde(rename = "daysOnMarket")]
    pub days_on_market: u32,
    #[serde(rename = "hasHOA", default)]
    pub has_hoa: Option<bool>,
    #[serde(rename = "hoaFee", default)]
    pub hoa_fee: Option<f64>,
    #[serde(rename = "petFriendly", default)]
    pub pet_friendly: Option<bool>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Listing {
    /// Helper to get has_hoa as a bool, defaulting to false
    pub fn hoa(&self) -> bool {
        self.has_hoa.unwrap_or(false)
    }

    /// Helper to get pet_friendly as a bool, defaulting to false
    pub fn allows_pets(&self) -> bool {
        self.pet_friendly.unwrap_or(false)
    }

    /// Price per square foot, or `None` when the footage is zero
    pub fn price_per_sqft(&self) -> Option<f64> {
        if self.square_feet == 0 {
            None
        } else {
            Some(self.price as f64 / self.square_feet as f64)
        }
    }
}

/// Active sort order for the filtered deck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    /// Fewest days on market first
    #[default]
    Newest,
    SqftDesc,
    PricePerSqft,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Newest,
        SortBy::PriceAsc,
        SortBy::PriceDesc,
        SortBy::SqftDesc,
        SortBy::PricePerSqft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PriceAsc => "price-asc",
            SortBy::PriceDesc => "price-desc",
            SortBy::Newest => "newest",
            SortBy::SqftDesc => "sqft-desc",
            SortBy::PricePerSqft => "price-per-sqft",
        }
    }

    /// Human readable label shown by the preferences editor
    pub fn label(&self) -> &'static str {
        match self {
            SortBy::PriceAsc => "Price: Low to High",
            SortBy::PriceDesc => "Price: High to Low",
            SortBy::Newest => "Newest First",
            SortBy::SqftDesc => "Largest First",
            SortBy::PricePerSqft => "Best Value ($/sqft)",
        }
    }
}

/// Search preferences. Always replaced wholesale, never patched.
///
/// Zero minimums and empty sets act as no-op bounds. Maximums always apply,
/// so a `max_price` of 0 keeps only listings priced at 0. `min_parking_spots`,
/// `single_story_only` and `new_construction_only` are carried through
/// but listings have no attribute to compare them against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "validate_bounds"))]
pub struct Preferences {
    pub min_price: u64,
    pub max_price: u64,
    pub min_bedrooms: u32,
    #[validate(range(min = 0.0))]
    pub min_bathrooms: f32,
    pub min_square_feet: u32,
    pub max_square_feet: u32,
    pub min_year_built: u16,
    #[validate(range(min = 0.0))]
    pub min_lot_size: f64,
    pub max_days_on_market: u32,
    #[serde(rename = "noHOA")]
    pub no_hoa: bool,
    pub pet_friendly: bool,
    pub min_parking_spots: u32,
    pub single_story_only: bool,
    pub new_construction_only: bool,
    pub property_types: Vec<PropertyType>,
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub must_have_features: Vec<String>,
    pub sort_by: SortBy,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            min_price: 0,
            max_price: 10_000_000,
            min_bedrooms: 0,
            min_bathrooms: 0.0,
            min_square_feet: 0,
            max_square_feet: 10_000,
            min_year_built: 1900,
            min_lot_size: 0.0,
            max_days_on_market: 365,
            no_hoa: false,
            pet_friendly: false,
            min_parking_spots: 0,
            single_story_only: false,
            new_construction_only: false,
            property_types: Vec::new(),
            states: Vec::new(),
            cities: Vec::new(),
            must_have_features: Vec::new(),
            sort_by: SortBy::default(),
        }
    }
}

fn validate_bounds(prefs: &Preferences) -> Result<(), ValidationError> {
    if prefs.min_price > prefs.max_price {
        return Err(ValidationError::new("min_price_exceeds_max_price"));
    }
    if prefs.min_square_feet > prefs.max_square_feet {
        return Err(ValidationError::new("min_square_feet_exceeds_max_square_feet"));
    }
    Ok(())
}

/// A swipe decision on the focal listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Love,
    Pass,
}

/// Where a session stands relative to its deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Browsing,
    ExhaustedWithLikes,
    ExhaustedNoLikes,
}

impl SessionStatus {
    pub fn is_exhausted(&self) -> bool {
        !matches!(self, SessionStatus::Browsing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences_are_valid() {
        let prefs = Preferences::default();
        assert!(prefs.validate().is_ok());
        assert_eq!(prefs.sort_by, SortBy::Newest);
    }

    #[test]
    fn test_inverted_price_bounds_rejected() {
        let prefs = Preferences {
            min_price: 900_000,
            max_price: 100_000,
            ..Preferences::default()
        };
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_zero_maximums_are_enforced() {
        use crate::core::apply;
        use crate::services::mock_listings;

        let prefs = Preferences {
            max_price: 0,
            ..Preferences::default()
        };
        assert!(prefs.validate().is_ok());
        assert!(apply(&mock_listings(), &prefs).is_empty());

        let prefs = Preferences {
            max_square_feet: 0,
            ..Preferences::default()
        };
        let kept = apply(&mock_listings(), &prefs);
        assert!(kept.iter().all(|listing| listing.square_feet == 0));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_preferences_wire_format() {
        let json = r#"{"minPrice":100000,"noHOA":true,"sortBy":"price-per-sqft","propertyTypes":["condo"]}"#;
        let prefs: Preferences = serde_json::from_str(json).unwrap();

        assert_eq!(prefs.min_price, 100_000);
        assert_eq!(prefs.max_price, 10_000_000);
        assert!(prefs.no_hoa);
        assert_eq!(prefs.sort_by, SortBy::PricePerSqft);
        assert_eq!(prefs.property_types, vec![PropertyType::Condo]);
    }

    #[test]
    fn test_zero_footage_has_no_ratio() {
        let listing = Listing {
            id: "z".to_string(),
            price: 100_000,
            address: "1 Lot Rd".to_string(),
            city: "Crozet".to_string(),
            state: "VA".to_string(),
            zip_code: "22932".to_string(),
            bedrooms: 0,
            bathrooms: 0.0,
            square_feet: 0,
            property_type: PropertyType::House,
            year_built: 2000,
            images: vec![],
            description: String::new(),
            features: vec![],
            lot_size: Some(2.0),
            days_on_market: 1,
            has_hoa: None,
            hoa_fee: None,
            pet_friendly: None,
            latitude: None,
            longitude: None,
        };
        assert_eq!(listing.price_per_sqft(), None);
        assert!(!listing.hoa());
    }
}
