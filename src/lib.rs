//! HomeMatch - swipe-based property browsing
//!
//! This library provides the preference filter/sort engine and the swipe
//! session state machine behind the HomeMatch app, plus the listing sources
//! and HTTP routes that host them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{apply, ListingEngine, SwipeSession, SessionError, DeckView, GestureThresholds};
pub use models::{Listing, Preferences, PropertyType, SortBy, SwipeAction, SessionStatus};
