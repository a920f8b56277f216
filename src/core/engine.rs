use crate::models::{Listing, Preferences};
use crate::core::{
    filters::{matches_bounds, matches_membership, matches_toggles},
    sorting::sort_listings,
};

/// Result of running the filter/sort pipeline
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub listings: Vec<Listing>,
    pub total_candidates: usize,
}

/// Filter/sort orchestrator
///
/// # Pipeline Stages
/// 1. Numeric bounds (price, rooms, footage, age, lot, days on market)
/// 2. Boolean toggles (HOA, pets)
/// 3. Set membership (types, states, cities, required features)
/// 4. Stable sort by the active key
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingEngine;

impl ListingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Produce the ordered deck for a set of preferences
    ///
    /// # Arguments
    /// * `listings` - The full candidate list, in source order
    /// * `preferences` - The active preference set
    ///
    /// # Returns
    /// FilterResult with the surviving listings in sort order
    pub fn apply(&self, listings: &[Listing], preferences: &Preferences) -> FilterResult {
        let total_candidates = listings.len();

        let after_bounds: Vec<&Listing> = listings
            .iter()
            // Stage 1: numeric bounds
            .filter(|listing| matches_bounds(listing, preferences))
            .collect();
        let bounds_count = after_bounds.len();

        let mut filtered: Vec<Listing> = after_bounds
            .into_iter()
            // Stage 2: toggles
            .filter(|listing| matches_toggles(listing, preferences))
            // Stage 3: set membership
            .filter(|listing| matches_membership(listing, preferences))
            .cloned()
            .collect();

        // Stage 4: sort
        sort_listings(&mut filtered, preferences.sort_by);

        tracing::debug!(
            "Filtered {} candidates: {} within bounds, {} kept, sorted by {}",
            total_candidates,
            bounds_count,
            filtered.len(),
            preferences.sort_by.as_str()
        );

        FilterResult {
            listings: filtered,
            total_candidates,
        }
    }
}

/// Convenience wrapper over [`ListingEngine::apply`]
pub fn apply(listings: &[Listing], preferences: &Preferences) -> Vec<Listing> {
    ListingEngine::new().apply(listings, preferences).listings
}
