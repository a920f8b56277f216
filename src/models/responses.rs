use serde::{Deserialize, Serialize};
use crate::core::compare::ComparisonEntry;
use crate::core::session::DeckView;
use crate::models::domain::{Listing, SwipeAction};

/// Response for session creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// Set when the listing source fell back to the built-in catalog
    pub warning: Option<String>,
    pub deck: DeckView,
}

/// Response for love, pass and gesture endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    /// `None` when a gesture fell short of the thresholds
    pub action: Option<SwipeAction>,
    pub celebrate: bool,
    pub deck: DeckView,
}

/// Liked listings of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedResponse {
    pub liked: Vec<Listing>,
    pub count: usize,
}

/// Side by side comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub entries: Vec<ComparisonEntry>,
}

/// Options offered by the preferences editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    #[serde(rename = "propertyTypes")]
    pub property_types: Vec<String>,
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub features: Vec<String>,
    #[serde(rename = "sortOptions")]
    pub sort_options: Vec<SortOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOption {
    pub value: String,
    pub label: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "activeSessions")]
    pub active_sessions: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
