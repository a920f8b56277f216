use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to start a new swipe session
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[serde(alias = "use_real_data", rename = "useRealData", default)]
    pub use_real_data: Option<bool>,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub city: Option<String>,
    #[validate(length(equal = 2))]
    #[serde(default)]
    pub state: Option<String>,
    #[validate(range(min = 1, max = 200))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Raw release of a drag gesture or a key press on the focal card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GestureRequest {
    #[serde(alias = "offset_x", rename = "offsetX", default)]
    pub offset_x: Option<f64>,
    #[serde(alias = "velocity_x", rename = "velocityX", default)]
    pub velocity_x: Option<f64>,
    #[serde(default)]
    pub key: Option<String>,
}

/// Request to compare liked listings side by side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareRequest {
    #[validate(length(min = 2, max = 3))]
    #[serde(alias = "listing_ids", rename = "listingIds")]
    pub listing_ids: Vec<String>,
}
