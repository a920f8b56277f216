use serde::{Deserialize, Serialize};
use crate::models::SwipeAction;

/// Release thresholds for a card drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Horizontal travel in pixels
    pub distance: f64,
    /// Horizontal release speed in pixels per second
    pub velocity: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            distance: 100.0,
            velocity: 500.0,
        }
    }
}

/// Turn a drag release into a swipe
///
/// Right is love, left is pass. A drag that travelled far enough is decided
/// by its offset; a short flick fast enough is decided by its velocity.
/// Anything else snaps back and yields `None`.
pub fn classify_drag(
    offset_x: f64,
    velocity_x: f64,
    thresholds: &GestureThresholds,
) -> Option<SwipeAction> {
    let direction = if offset_x.abs() > thresholds.distance {
        offset_x
    } else if velocity_x.abs() > thresholds.velocity {
        velocity_x
    } else {
        return None;
    };

    if direction > 0.0 {
        Some(SwipeAction::Love)
    } else {
        Some(SwipeAction::Pass)
    }
}

/// Keyboard shortcuts: right arrow loves, left arrow passes
pub fn classify_key(key: &str) -> Option<SwipeAction> {
    match key {
        "ArrowRight" => Some(SwipeAction::Love),
        "ArrowLeft" => Some(SwipeAction::Pass),
        _ => None,
    }
}
