use crate::models::{Listing, Preferences};

/// Check a listing against the numeric bounds of the preferences
///
/// This is Stage 1 of the filtering pipeline: price, rooms, footage,
/// age, lot size and time on market.
#[inline]
pub fn matches_bounds(listing: &Listing, preferences: &Preferences) -> bool {
    // Price range, inclusive
    if listing.price < preferences.min_price || listing.price > preferences.max_price {
        return false;
    }

    if listing.bedrooms < preferences.min_bedrooms {
        return false;
    }

    if listing.bathrooms < preferences.min_bathrooms {
        return false;
    }

    // Square footage range, inclusive
    if listing.square_feet < preferences.min_square_feet
        || listing.square_feet > preferences.max_square_feet {
        return false;
    }

    if listing.year_built < preferences.min_year_built {
        return false;
    }

    // Listings without a lot size are never excluded by this rule
    if preferences.min_lot_size > 0.0 {
        if let Some(lot_size) = listing.lot_size {
            if lot_size < preferences.min_lot_size {
                return false;
            }
        }
    }

    if listing.days_on_market > preferences.max_days_on_market {
        return false;
    }

    true
}

/// Check the boolean toggles (HOA, pets)
///
/// Stage 2 of the filtering pipeline.
#[inline]
pub fn matches_toggles(listing: &Listing, preferences: &Preferences) -> bool {
    if preferences.no_hoa && listing.hoa() {
        return false;
    }

    if preferences.pet_friendly && !listing.allows_pets() {
        return false;
    }

    true
}

/// Check set membership filters
///
/// Stage 3 of the filtering pipeline. Empty sets match everything.
#[inline]
pub fn matches_membership(listing: &Listing, preferences: &Preferences) -> bool {
    if !preferences.property_types.is_empty()
        && !preferences.property_types.contains(&listing.property_type) {
        return false;
    }

    if !preferences.states.is_empty() && !preferences.states.contains(&listing.state) {
        return false;
    }

    if !preferences.cities.is_empty() && !preferences.cities.contains(&listing.city) {
        return false;
    }

    has_all_features(listing, &preferences.must_have_features)
}

/// Every required feature must be present on the listing
#[inline]
pub fn has_all_features(listing: &Listing, required: &[String]) -> bool {
    required
        .iter()
        .all(|feature| listing.features.contains(feature))
}

/// Full predicate: a listing survives only if every stage holds
#[inline]
pub fn matches_preferences(listing: &Listing, preferences: &Preferences) -> bool {
    matches_bounds(listing, preferences)
        && matches_toggles(listing, preferences)
        && matches_membership(listing, preferences)
}
