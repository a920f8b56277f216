use crate::models::{Listing, PropertyType};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Default RapidAPI host for the Realtor API
pub const DEFAULT_HOST: &str = "realtor.p.rapidapi.com";

const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1568605114967-8130f3a36994?w=1200&auto=format&fit=crop";
const DEFAULT_DESCRIPTION: &str = "Beautiful property in a great location.";
const DEFAULT_YEAR_BUILT: u16 = 2000;
const MAX_IMAGES: usize = 6;
const SQFT_PER_ACRE: f64 = 43_560.0;

/// Errors that can occur when interacting with the Realtor API
#[derive(Debug, Error)]
pub enum RealtorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("RapidAPI key not configured")]
    MissingApiKey,
}

#[derive(Debug, Deserialize)]
struct RealtorProperty {
    property_id: String,
    #[serde(default)]
    list_price: Option<f64>,
    location: RealtorLocation,
    #[serde(default)]
    description: RealtorDescription,
    #[serde(default)]
    photos: Option<Vec<RealtorPhoto>>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    list_date: Option<String>,
    #[serde(default)]
    hoa: Option<RealtorHoa>,
    #[serde(default)]
    pet_policy: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RealtorLocation {
    address: RealtorAddress,
}

#[derive(Debug, Deserialize)]
struct RealtorAddress {
    #[serde(default)]
    line: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state_code: String,
    #[serde(default)]
    postal_code: String,
    #[serde(default)]
    coordinate: Option<RealtorCoordinate>,
}

#[derive(Debug, Deserialize)]
struct RealtorCoordinate {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RealtorDescription {
    #[serde(default)]
    beds: Option<f64>,
    #[serde(default)]
    baths: Option<f64>,
    #[serde(default)]
    sqft: Option<f64>,
    #[serde(default)]
    lot_sqft: Option<f64>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    year_built: Option<u16>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RealtorPhoto {
    href: String,
}

#[derive(Debug, Deserialize)]
struct RealtorHoa {
    #[serde(default)]
    fee: Option<f64>,
}

/// Realtor API client (RapidAPI)
///
/// Handles the two calls the app needs:
/// - Searching for-sale listings by city and state
/// - Fetching a single listing's details
pub struct RealtorClient {
    base_url: String,
    api_key: Option<String>,
    host: String,
    client: Client,
}

impl RealtorClient {
    /// Create a new Realtor API client
    pub fn new(base_url: String, api_key: Option<String>, host: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key: api_key.filter(|key| !key.is_empty()),
            host,
            client,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search for-sale listings in a city, newest first
    ///
    /// Returns an empty list without calling out when no API key is set.
    pub async fn search_properties(
        &self,
        city: &str,
        state_code: &str,
        limit: u16,
    ) -> Result<Vec<Listing>, RealtorError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("RapidAPI key not found, skipping listing search");
            return Ok(Vec::new());
        };

        let url = format!("{}/properties/v3/list", self.base_url.trim_end_matches('/'));

        let body = json!({
            "limit": limit,
            "offset": 0,
            "postal_code": "",
            "status": ["for_sale"],
            "sort": {
                "direction": "desc",
                "field": "list_date",
            },
            "location": {
                "city": city,
                "state_code": state_code,
            },
        });

        tracing::debug!("Searching listings in {}, {} (limit {})", city, state_code, limit);

        let response = self
            .client
            .post(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.host)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RealtorError::ApiError(format!(
                "Failed to search listings: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let Some(results) = json
            .pointer("/data/home_search/results")
            .and_then(|r| r.as_array())
        else {
            tracing::warn!("No results found in API response");
            return Ok(Vec::new());
        };

        let now = Utc::now();
        let listings: Vec<Listing> = results
            .iter()
            .filter_map(|result| {
                match serde_json::from_value::<RealtorProperty>(result.clone()) {
                    Ok(raw) => Some(convert_to_listing(raw, now)),
                    Err(e) => {
                        tracing::debug!("Skipping malformed listing: {}", e);
                        None
                    }
                }
            })
            .collect();

        tracing::debug!("Search returned {} listings ({} raw)", listings.len(), results.len());

        Ok(listings)
    }

    /// Fetch a single listing by id
    ///
    /// Returns `Ok(None)` when the API answers without a `data` payload.
    pub async fn get_property_details(
        &self,
        property_id: &str,
    ) -> Result<Option<Listing>, RealtorError> {
        let api_key = self.api_key.as_deref().ok_or(RealtorError::MissingApiKey)?;

        let url = format!(
            "{}/properties/v3/detail?property_id={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(property_id)
        );

        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Failed to fetch listing {}: {}", property_id, status);
            return Err(RealtorError::ApiError(format!(
                "Failed to fetch listing: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let Some(data) = json.get("data").filter(|d| !d.is_null()) else {
            return Ok(None);
        };

        let raw: RealtorProperty = serde_json::from_value(data.clone())
            .map_err(|e| RealtorError::InvalidResponse(format!("Failed to parse listing: {}", e)))?;

        Ok(Some(convert_to_listing(raw, Utc::now())))
    }
}

/// Map a Realtor API property type onto ours; unknown types become houses
fn map_property_type(kind: Option<&str>) -> PropertyType {
    match kind.map(|k| k.to_lowercase()).as_deref() {
        Some("condo") => PropertyType::Condo,
        Some("townhouse") | Some("townhomes") => PropertyType::Townhouse,
        Some("apartment") => PropertyType::Apartment,
        _ => PropertyType::House,
    }
}

/// Derive feature tags from free-form API tags
fn extract_features(tags: &[String]) -> Vec<String> {
    let mut features: Vec<String> = Vec::new();
    let mut push = |feature: &str| {
        if !features.iter().any(|f| f == feature) {
            features.push(feature.to_string());
        }
    };

    for tag in tags {
        let tag = tag.to_lowercase();
        if tag.contains("pool") {
            push("Pool");
        }
        if tag.contains("garage") {
            push("Garage");
        }
        if tag.contains("hardwood") {
            push("Hardwood Floors");
        }
        if tag.contains("fireplace") {
            push("Fireplace");
        }
        if tag.contains("deck") || tag.contains("patio") {
            push("Deck");
        }
        if tag.contains("central") && tag.contains("air") {
            push("Central AC");
        }
        if tag.contains("smart") {
            push("Smart Home");
        }
    }

    features
}

/// Whole days since the listing date; unknown dates count as fresh
fn days_since(list_date: Option<&str>, now: DateTime<Utc>) -> u32 {
    let listed = list_date.and_then(|raw| {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d")
                    .ok()?
                    .and_hms_opt(0, 0, 0)
                    .map(|naive| naive.and_utc())
            })
    });

    match listed {
        Some(listed) => (now - listed).num_days().max(0) as u32,
        None => 0,
    }
}

fn convert_to_listing(raw: RealtorProperty, now: DateTime<Utc>) -> Listing {
    let address = raw.location.address;
    let description = raw.description;

    let images: Vec<String> = raw
        .photos
        .map(|photos| photos.into_iter().take(MAX_IMAGES).map(|p| p.href).collect::<Vec<_>>())
        .filter(|images| !images.is_empty())
        .unwrap_or_else(|| vec![PLACEHOLDER_IMAGE.to_string()]);

    let hoa_fee = raw.hoa.and_then(|hoa| hoa.fee);

    Listing {
        id: raw.property_id,
        price: raw.list_price.unwrap_or(0.0).max(0.0).round() as u64,
        address: address.line,
        city: address.city,
        state: address.state_code,
        zip_code: address.postal_code,
        bedrooms: description.beds.unwrap_or(0.0).max(0.0) as u32,
        bathrooms: description.baths.unwrap_or(0.0).max(0.0) as f32,
        square_feet: description.sqft.unwrap_or(0.0).max(0.0) as u32,
        property_type: map_property_type(description.kind.as_deref()),
        year_built: description.year_built.unwrap_or(DEFAULT_YEAR_BUILT),
        images,
        description: description
            .text
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        features: extract_features(raw.tags.as_deref().unwrap_or_default()),
        lot_size: description.lot_sqft.map(|sqft| sqft / SQFT_PER_ACRE),
        days_on_market: days_since(raw.list_date.as_deref(), now),
        has_hoa: Some(hoa_fee.map(|fee| fee != 0.0).unwrap_or(false)),
        hoa_fee,
        pet_friendly: Some(
            raw.pet_policy
                .map(|policy| policy.to_lowercase().contains("allow"))
                .unwrap_or(false),
        ),
        latitude: address.coordinate.as_ref().map(|c| c.lat),
        longitude: address.coordinate.as_ref().map(|c| c.lon),
    }
}
