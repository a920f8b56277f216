use crate::models::{Listing, PropertyType, SortBy};
use crate::models::responses::{OptionsResponse, SortOption};
use crate::services::realtor::RealtorClient;

pub const STATE_OPTIONS: [&str; 8] = ["VA", "CA", "TX", "FL", "NY", "WA", "CO", "NC"];

pub const CITY_OPTIONS: [&str; 6] = [
    "Charlottesville",
    "Crozet",
    "Scottsville",
    "Earlysville",
    "Keswick",
    "White Hall",
];

pub const FEATURE_OPTIONS: [&str; 23] = [
    "Pool",
    "Garage",
    "Hardwood Floors",
    "Smart Home",
    "Central AC",
    "Fireplace",
    "Deck",
    "Patio",
    "Fenced Yard",
    "Updated Kitchen",
    "Updated Bathrooms",
    "Walk-in Closet",
    "Laundry Room",
    "Basement",
    "Home Office",
    "Ocean View",
    "Mountain View",
    "Lake View",
    "Energy Efficient",
    "Solar Panels",
    "EV Charging",
    "Security System",
    "Gated Community",
];

pub const NO_RESULTS_WARNING: &str = "No properties found. Using mock data.";
pub const FETCH_FAILED_WARNING: &str = "Failed to load real properties. Using mock data.";

/// Everything the preferences editor can offer
pub fn preference_options() -> OptionsResponse {
    OptionsResponse {
        property_types: PropertyType::ALL.iter().map(|t| t.as_str().to_string()).collect(),
        states: STATE_OPTIONS.iter().map(|s| s.to_string()).collect(),
        cities: CITY_OPTIONS.iter().map(|c| c.to_string()).collect(),
        features: FEATURE_OPTIONS.iter().map(|f| f.to_string()).collect(),
        sort_options: SortBy::ALL
            .iter()
            .map(|sort| SortOption {
                value: sort.as_str().to_string(),
                label: sort.label().to_string(),
            })
            .collect(),
    }
}

/// Where a session's listings came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrigin {
    Mock,
    Realtor,
}

/// Listings to start a session with, plus a warning when the remote
/// source could not be used
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub listings: Vec<Listing>,
    pub origin: ListingOrigin,
    pub warning: Option<String>,
}

/// Fetch real listings once, falling back to `fallback` on failure or no results
pub async fn load_listings(
    client: &RealtorClient,
    city: &str,
    state_code: &str,
    limit: u16,
    fallback: &[Listing],
) -> LoadOutcome {
    match client.search_properties(city, state_code, limit).await {
        Ok(listings) if !listings.is_empty() => {
            tracing::info!("Loaded {} listings for {}, {}", listings.len(), city, state_code);
            LoadOutcome {
                listings,
                origin: ListingOrigin::Realtor,
                warning: None,
            }
        }
        Ok(_) => {
            tracing::warn!("No listings found for {}, {}; using mock data", city, state_code);
            LoadOutcome {
                listings: fallback.to_vec(),
                origin: ListingOrigin::Mock,
                warning: Some(NO_RESULTS_WARNING.to_string()),
            }
        }
        Err(e) => {
            tracing::error!("Failed to load listings for {}, {}: {}", city, state_code, e);
            LoadOutcome {
                listings: fallback.to_vec(),
                origin: ListingOrigin::Mock,
                warning: Some(FETCH_FAILED_WARNING.to_string()),
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    price: u64,
    address: &str,
    city: &str,
    zip_code: &str,
    rooms: (u32, f32),
    square_feet: u32,
    property_type: PropertyType,
    year_built: u16,
    days_on_market: u32,
    features: &[&str],
    description: &str,
) -> Listing {
    Listing {
        id: id.to_string(),
        price,
        address: address.to_string(),
        city: city.to_string(),
        state: "VA".to_string(),
        zip_code: zip_code.to_string(),
        bedrooms: rooms.0,
        bathrooms: rooms.1,
        square_feet,
        property_type,
        year_built,
        images: vec![format!(
            "https://images.homematch.test/listings/{}/front.jpg",
            id
        )],
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        lot_size: None,
        days_on_market,
        has_hoa: None,
        hoa_fee: None,
        pet_friendly: None,
        latitude: None,
        longitude: None,
    }
}

/// Built-in listings around Charlottesville, used when real data is off or unavailable
pub fn mock_listings() -> Vec<Listing> {
    vec![
        Listing {
            has_hoa: Some(true),
            hoa_fee: Some(225.0),
            pet_friendly: Some(true),
            latitude: Some(38.0302),
            longitude: Some(-78.4789),
            ..listing(
                "1", 875_000, "123 Main Street", "Charlottesville", "22902",
                (3, 2.5), 2400, PropertyType::Townhouse, 2020, 8,
                &["Deck", "Hardwood Floors", "Smart Home", "Garage"],
                "Modern downtown townhouse with rooftop terrace, walking distance to UVA and the Downtown Mall.",
            )
        },
        Listing {
            lot_size: Some(2.5),
            pet_friendly: Some(true),
            has_hoa: Some(false),
            ..listing(
                "2", 649_000, "4410 Old Three Notch'd Road", "Crozet", "22932",
                (4, 3.0), 2950, PropertyType::House, 2008, 21,
                &["Mountain View", "Fireplace", "Basement", "Fenced Yard", "Garage"],
                "Farmhouse-style home on rolling acreage with Blue Ridge views.",
            )
        },
        Listing {
            has_hoa: Some(true),
            hoa_fee: Some(310.0),
            ..listing(
                "3", 315_000, "600 Water Street #4B", "Charlottesville", "22902",
                (2, 2.0), 1150, PropertyType::Condo, 2015, 3,
                &["Central AC", "Updated Kitchen", "Laundry Room"],
                "Bright corner condo steps from the Pavilion.",
            )
        },
        Listing {
            lot_size: Some(12.0),
            has_hoa: Some(false),
            pet_friendly: Some(true),
            ..listing(
                "4", 1_450_000, "2100 Farmington Drive", "Keswick", "22947",
                (5, 4.5), 4800, PropertyType::House, 1995, 45,
                &["Pool", "Fireplace", "Home Office", "Mountain View", "Garage", "Walk-in Closet"],
                "Estate home with pool and guest cottage in hunt country.",
            )
        },
        Listing {
            pet_friendly: Some(true),
            ..listing(
                "5", 189_000, "12 Emmet Street Apt 3", "Charlottesville", "22903",
                (1, 1.0), 650, PropertyType::Apartment, 1978, 1,
                &["Central AC", "Laundry Room"],
                "Cozy apartment near Grounds, ideal first place.",
            )
        },
        Listing {
            lot_size: Some(0.75),
            has_hoa: Some(false),
            ..listing(
                "6", 389_000, "87 Valley Street", "Scottsville", "24590",
                (3, 2.0), 1720, PropertyType::House, 1962, 60,
                &["Hardwood Floors", "Deck", "Fenced Yard"],
                "Renovated rancher a short walk from the James River.",
            )
        },
        Listing {
            has_hoa: Some(true),
            hoa_fee: Some(95.0),
            pet_friendly: Some(true),
            lot_size: Some(0.2),
            ..listing(
                "7", 529_000, "19 Reas Ford Road", "Earlysville", "22936",
                (4, 2.5), 2600, PropertyType::House, 2022, 12,
                &["Energy Efficient", "Solar Panels", "EV Charging", "Smart Home", "Garage"],
                "New construction with solar array and EV-ready garage.",
            )
        },
        Listing {
            lot_size: Some(5.0),
            has_hoa: Some(false),
            ..listing(
                "8", 725_000, "3300 Browns Gap Turnpike", "White Hall", "22987",
                (4, 3.5), 3100, PropertyType::House, 2001, 90,
                &["Mountain View", "Deck", "Basement", "Security System"],
                "Private retreat backing to Shenandoah National Park.",
            )
        },
        Listing {
            has_hoa: Some(true),
            hoa_fee: Some(180.0),
            ..listing(
                "9", 465_000, "501 Stonefield Boulevard", "Charlottesville", "22903",
                (3, 2.5), 1980, PropertyType::Townhouse, 2017, 30,
                &["Patio", "Updated Bathrooms", "Walk-in Closet", "Gated Community"],
                "End-unit townhouse near shopping and the 29 corridor.",
            )
        },
        Listing {
            pet_friendly: Some(false),
            ..listing(
                "10", 275_000, "1 Lot Off Route 20", "Scottsville", "24590",
                (0, 0.0), 0, PropertyType::House, 2000, 150,
                &[],
                "Buildable lot with septic approval; bring your plans.",
            )
        },
    ]
}
