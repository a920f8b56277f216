// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Listing, PropertyType, Preferences, SortBy, SwipeAction, SessionStatus};
pub use requests::{CreateSessionRequest, GestureRequest, CompareRequest};
pub use responses::{CreateSessionResponse, SwipeResponse, LikedResponse, CompareResponse, OptionsResponse, SortOption, HealthResponse, ErrorResponse};
