use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::core::compare::{self, CompareSelection, ComparisonEntry};
use crate::core::engine::ListingEngine;
use crate::models::{Listing, Preferences, SessionStatus, SwipeAction};

/// Errors raised by session transitions
///
/// A rejected transition never changes the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("No listings left to swipe")]
    Exhausted,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Restart is only available once every listing has been reviewed")]
    StillBrowsing,

    #[error("Listing is not in the liked list: {0}")]
    UnknownListing(String),

    #[error("Invalid comparison: {0}")]
    InvalidComparison(String),
}

/// Result of a successful love or pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeOutcome {
    pub action: SwipeAction,
    pub listing: Listing,
    /// Love triggers the match celebration on the client
    pub celebrate: bool,
}

/// Snapshot of a session for presentation clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckView {
    pub status: SessionStatus,
    /// 1-based position of the focal listing, `total` when exhausted
    pub position: usize,
    pub total: usize,
    pub current: Option<Listing>,
    /// Listings stacked behind the focal one
    pub upcoming: Vec<Listing>,
    pub liked_count: usize,
    pub passed_count: usize,
    pub can_undo: bool,
    pub has_set_preferences: bool,
    pub preferences: Preferences,
}

/// Swipe session state machine
///
/// Holds the full candidate list, the deck derived from it by the current
/// preferences, a cursor into the deck, the liked and passed histories and
/// the last action for single-step undo.
///
/// Invariant: `cursor <= deck.len()`.
#[derive(Debug, Clone)]
pub struct SwipeSession {
    engine: ListingEngine,
    candidates: Vec<Listing>,
    preferences: Preferences,
    has_set_preferences: bool,
    deck: Vec<Listing>,
    cursor: usize,
    liked: Vec<Listing>,
    passed: Vec<Listing>,
    last_action: Option<SwipeAction>,
}

impl SwipeSession {
    /// Start a session over the candidates with default preferences
    pub fn new(candidates: Vec<Listing>) -> Self {
        Self::with_preferences(candidates, Preferences::default())
    }

    pub fn with_preferences(candidates: Vec<Listing>, preferences: Preferences) -> Self {
        let engine = ListingEngine::new();
        let deck = engine.apply(&candidates, &preferences).listings;

        Self {
            engine,
            candidates,
            preferences,
            has_set_preferences: false,
            deck,
            cursor: 0,
            liked: Vec::new(),
            passed: Vec::new(),
            last_action: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.cursor < self.deck.len() {
            SessionStatus::Browsing
        } else if self.liked.is_empty() {
            SessionStatus::ExhaustedNoLikes
        } else {
            SessionStatus::ExhaustedWithLikes
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn current(&self) -> Option<&Listing> {
        self.deck.get(self.cursor)
    }

    pub fn liked(&self) -> &[Listing] {
        &self.liked
    }

    pub fn passed(&self) -> &[Listing] {
        &self.passed
    }

    pub fn last_action(&self) -> Option<SwipeAction> {
        self.last_action
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn has_set_preferences(&self) -> bool {
        self.has_set_preferences
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && self.last_action.is_some()
    }

    /// Like the focal listing and advance
    pub fn love(&mut self) -> Result<SwipeOutcome, SessionError> {
        self.swipe(SwipeAction::Love)
    }

    /// Pass on the focal listing and advance
    pub fn pass(&mut self) -> Result<SwipeOutcome, SessionError> {
        self.swipe(SwipeAction::Pass)
    }

    pub fn swipe(&mut self, action: SwipeAction) -> Result<SwipeOutcome, SessionError> {
        let listing = self.current().cloned().ok_or(SessionError::Exhausted)?;

        match action {
            SwipeAction::Love => self.liked.push(listing.clone()),
            SwipeAction::Pass => self.passed.push(listing.clone()),
        }
        self.cursor += 1;
        self.last_action = Some(action);

        tracing::debug!(
            "Swiped {:?} on {} ({}/{})",
            action,
            listing.id,
            self.cursor,
            self.deck.len()
        );

        Ok(SwipeOutcome {
            action,
            listing,
            celebrate: action == SwipeAction::Love,
        })
    }

    /// Revert the most recent love or pass. Only one step is remembered.
    pub fn undo(&mut self) -> Result<SwipeAction, SessionError> {
        if !self.can_undo() {
            return Err(SessionError::NothingToUndo);
        }
        let action = self.last_action.take().ok_or(SessionError::NothingToUndo)?;

        self.cursor -= 1;
        match action {
            SwipeAction::Love => self.liked.pop(),
            SwipeAction::Pass => self.passed.pop(),
        };

        tracing::debug!("Undid {:?}, back at {}/{}", action, self.cursor, self.deck.len());

        Ok(action)
    }

    /// Start over once the deck is exhausted, clearing both histories
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if !self.status().is_exhausted() {
            return Err(SessionError::StillBrowsing);
        }

        self.cursor = 0;
        self.liked.clear();
        self.passed.clear();
        self.last_action = None;

        Ok(())
    }

    /// Replace the preferences and recompute the deck
    ///
    /// The cursor goes back to the start. Liked and passed histories survive
    /// the change; the last action does not, since the deck it referred to
    /// is gone.
    pub fn change_preferences(&mut self, preferences: Preferences) {
        let result = self.engine.apply(&self.candidates, &preferences);

        tracing::debug!(
            "Preferences changed: {} of {} listings in deck",
            result.listings.len(),
            result.total_candidates
        );

        self.deck = result.listings;
        self.preferences = preferences;
        self.has_set_preferences = true;
        self.cursor = 0;
        self.last_action = None;
    }

    /// Compare 2 or 3 liked listings by id
    pub fn compare_liked(&self, ids: &[String]) -> Result<Vec<ComparisonEntry>, SessionError> {
        if !(compare::MIN_COMPARE..=compare::MAX_COMPARE).contains(&ids.len()) {
            return Err(SessionError::InvalidComparison(format!(
                "select between {} and {} listings, got {}",
                compare::MIN_COMPARE,
                compare::MAX_COMPARE,
                ids.len()
            )));
        }

        let mut selection = CompareSelection::new();
        for id in ids {
            if selection.contains(id) {
                return Err(SessionError::InvalidComparison(format!(
                    "listing {} selected more than once",
                    id
                )));
            }
            selection.toggle(id);
        }

        let selected = selection
            .ids()
            .iter()
            .map(|id| {
                self.liked
                    .iter()
                    .find(|listing| &listing.id == id)
                    .ok_or_else(|| SessionError::UnknownListing(id.clone()))
            })
            .collect::<Result<Vec<&Listing>, SessionError>>()?;

        Ok(compare::compare(selected))
    }

    /// Focal listing plus up to `lookahead - 1` listings behind it
    pub fn deck_view(&self, lookahead: usize) -> DeckView {
        let end = (self.cursor + lookahead.max(1)).min(self.deck.len());
        let current = self.current().cloned();
        let upcoming = if self.cursor < end {
            self.deck[self.cursor + 1..end].to_vec()
        } else {
            Vec::new()
        };

        DeckView {
            status: self.status(),
            position: (self.cursor + 1).min(self.deck.len()),
            total: self.deck.len(),
            current,
            upcoming,
            liked_count: self.liked.len(),
            passed_count: self.passed.len(),
            can_undo: self.can_undo(),
            has_set_preferences: self.has_set_preferences,
            preferences: self.preferences.clone(),
        }
    }
}
