//! Deck Index Controller - the cursor over an ordered candidate list.
//!
//! ## States
//! - `Active(cursor)` for `0 <= cursor < len`
//! - `Exhausted`, stored as `cursor == len`
//!
//! An empty deck starts exhausted. `advance` walks forward and parks on
//! `Exhausted` after the last card; further advances are reported as
//! `NoMoreCandidates` rather than raised as errors. Exhaustion is terminal
//! for `advance`; `reset` loads a fresh list and returns to `Active(0)`.

use profile_loader::{Candidate, CandidateId};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// `jump_to` outside `0..len`; the cursor is left where it was
    #[error("Index {index} is out of range for a deck of {len} candidates")]
    InvalidIndex { index: i64, len: usize },
}

/// Observable position of the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckState {
    Active(usize),
    Exhausted,
}

/// Result of one `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the card at this index
    Advanced(usize),
    /// The card just consumed was the last one; the deck is now exhausted
    ReachedEnd,
    /// Already exhausted; nothing changed
    NoMoreCandidates,
}

impl AdvanceOutcome {
    /// True when the deck has no current card after this call
    pub fn is_exhausted(self) -> bool {
        !matches!(self, AdvanceOutcome::Advanced(_))
    }
}

/// Direction of the last cursor move, used to pick the entry animation side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Forward,
    Backward,
}

/// Cursor over an immutable list of candidates
#[derive(Debug, Clone, Default)]
pub struct Deck {
    candidates: Vec<Candidate>,
    cursor: usize,
    last_direction: Option<NavDirection>,
}

impl Deck {
    /// Create a deck positioned on the first candidate (or exhausted if empty)
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            cursor: 0,
            last_direction: None,
        }
    }

    pub fn state(&self) -> DeckState {
        if self.cursor < self.candidates.len() {
            DeckState::Active(self.cursor)
        } else {
            DeckState::Exhausted
        }
    }

    /// Raw cursor; equals `len()` when exhausted
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.state() == DeckState::Exhausted
    }

    /// Candidate under the cursor, `None` once exhausted
    pub fn current(&self) -> Option<&Candidate> {
        self.candidates.get(self.cursor)
    }

    pub fn current_id(&self) -> Option<CandidateId> {
        self.current().map(|c| c.id)
    }

    /// Cards not yet consumed, including the current one
    pub fn remaining(&self) -> usize {
        self.candidates.len() - self.cursor
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn last_direction(&self) -> Option<NavDirection> {
        self.last_direction
    }

    /// Move to the next candidate
    pub fn advance(&mut self) -> AdvanceOutcome {
        let len = self.candidates.len();
        if self.cursor >= len {
            debug!("advance on exhausted deck ({} candidates)", len);
            return AdvanceOutcome::NoMoreCandidates;
        }

        self.cursor += 1;
        self.last_direction = Some(NavDirection::Forward);

        if self.cursor == len {
            debug!("deck exhausted after {} candidates", len);
            AdvanceOutcome::ReachedEnd
        } else {
            AdvanceOutcome::Advanced(self.cursor)
        }
    }

    /// Step back one card (explicit back navigation only).
    ///
    /// A no-op on the first card. From `Exhausted` it returns to the last
    /// card, so "back" after running out shows the final profile again.
    /// Returns the new cursor when it moved.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.last_direction = Some(NavDirection::Backward);
        Some(self.cursor)
    }

    /// Jump straight to `index`, which must be inside `0..len`
    pub fn jump_to(&mut self, index: i64) -> Result<usize, DeckError> {
        let len = self.candidates.len();
        let target = usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or(DeckError::InvalidIndex { index, len })?;

        if target != self.cursor {
            self.last_direction = Some(if target > self.cursor {
                NavDirection::Forward
            } else {
                NavDirection::Backward
            });
        }
        self.cursor = target;
        Ok(target)
    }

    /// Replace the candidate list and return to the first card
    pub fn reset(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.cursor = 0;
        self.last_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_of(len: u32) -> Deck {
        Deck::new(
            (1..=len)
                .map(|id| Candidate::new(id, format!("Dev {}", id), "summary"))
                .collect(),
        )
    }

    #[test]
    fn test_empty_deck_starts_exhausted() {
        let mut deck = deck_of(0);
        assert_eq!(deck.state(), DeckState::Exhausted);
        assert!(deck.current().is_none());
        assert_eq!(deck.advance(), AdvanceOutcome::NoMoreCandidates);
        assert_eq!(deck.retreat(), None);
    }

    #[test]
    fn test_advance_through_five() {
        let mut deck = deck_of(5);
        assert_eq!(deck.state(), DeckState::Active(0));

        for expected in 1..5 {
            assert_eq!(deck.advance(), AdvanceOutcome::Advanced(expected));
            assert_eq!(deck.state(), DeckState::Active(expected));
        }

        assert_eq!(deck.advance(), AdvanceOutcome::ReachedEnd);
        assert_eq!(deck.state(), DeckState::Exhausted);
        assert_eq!(deck.cursor(), 5);

        // sixth advance is a reported no-op
        assert_eq!(deck.advance(), AdvanceOutcome::NoMoreCandidates);
        assert_eq!(deck.cursor(), 5);
    }

    #[test]
    fn test_retreat() {
        let mut deck = deck_of(3);
        assert_eq!(deck.retreat(), None);
        assert_eq!(deck.state(), DeckState::Active(0));

        deck.advance();
        deck.advance();
        assert_eq!(deck.retreat(), Some(1));
        assert_eq!(deck.last_direction(), Some(NavDirection::Backward));
        assert_eq!(deck.current_id(), Some(2));
    }

    #[test]
    fn test_retreat_from_exhausted() {
        let mut deck = deck_of(2);
        deck.advance();
        deck.advance();
        assert!(deck.is_exhausted());
        assert_eq!(deck.retreat(), Some(1));
        assert_eq!(deck.state(), DeckState::Active(1));
    }

    #[test]
    fn test_jump_to_bounds() {
        let mut deck = deck_of(5);
        deck.advance();

        assert_eq!(
            deck.jump_to(-1),
            Err(DeckError::InvalidIndex { index: -1, len: 5 })
        );
        assert_eq!(
            deck.jump_to(5),
            Err(DeckError::InvalidIndex { index: 5, len: 5 })
        );
        assert_eq!(deck.state(), DeckState::Active(1));

        assert_eq!(deck.jump_to(4), Ok(4));
        assert_eq!(deck.last_direction(), Some(NavDirection::Forward));
        assert_eq!(deck.jump_to(0), Ok(0));
        assert_eq!(deck.last_direction(), Some(NavDirection::Backward));
    }

    #[test]
    fn test_jump_out_of_exhausted() {
        let mut deck = deck_of(1);
        assert_eq!(deck.advance(), AdvanceOutcome::ReachedEnd);
        assert_eq!(deck.jump_to(0), Ok(0));
        assert_eq!(deck.state(), DeckState::Active(0));
    }

    #[test]
    fn test_reset() {
        let mut deck = deck_of(1);
        deck.advance();
        assert!(deck.is_exhausted());

        deck.reset(deck_of(3).candidates().to_vec());
        assert_eq!(deck.state(), DeckState::Active(0));
        assert_eq!(deck.remaining(), 3);
        assert_eq!(deck.last_direction(), None);
    }
}
