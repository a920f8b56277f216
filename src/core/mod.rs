// Core algorithm exports
pub mod compare;
pub mod engine;
pub mod filters;
pub mod gesture;
pub mod session;
pub mod sorting;

pub use compare::{compare, CompareSelection, ComparisonEntry};
pub use engine::{apply, FilterResult, ListingEngine};
pub use filters::{matches_preferences, matches_bounds, matches_toggles, matches_membership, has_all_features};
pub use gesture::{classify_drag, classify_key, GestureThresholds};
pub use session::{DeckView, SessionError, SwipeOutcome, SwipeSession};
pub use sorting::sort_listings;
