// Service exports
pub mod catalog;
pub mod realtor;
pub mod sessions;

pub use catalog::{load_listings, mock_listings, preference_options, ListingOrigin, LoadOutcome};
pub use realtor::{RealtorClient, RealtorError};
pub use sessions::{SessionHandle, SessionStore};
