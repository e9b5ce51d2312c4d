//! Swipe interaction and deck navigation for the discovery screen.
//!
//! This crate provides:
//! - Gesture classification (drag vector -> Skip / Like / Connect / Cancel)
//! - A card animator that plays exit, reset and entry transitions
//! - The deck cursor with its `Active` / `Exhausted` states
//! - The favorite set with change notifications
//!
//! ## Architecture
//! A release flows through the pieces in a fixed order:
//! 1. `GestureClassifier` turns the drag offset into a `SwipeAction`
//! 2. `CardAnimator` plays the matching transition
//! 3. Only after the exit completes does the `Deck` advance (Cancel never advances)
//!
//! Nothing here performs I/O. Favorites report changes through
//! `FavoriteObserver`, and the `session` crate wires those to storage.
//!
//! ## Example Usage
//! ```ignore
//! use swipe::{classify, CardAnimator, Deck, GestureVector, MountToken, SwipeAction};
//!
//! let mut deck = Deck::new(candidates);
//! let mut animator = CardAnimator::new(Default::default(), MountToken::new());
//!
//! let action = classify(GestureVector::new(150.0, 0.0), 100.0);
//! if action.advances_deck() && animator.animate_exit(action).await.is_completed() {
//!     deck.advance();
//! }
//! ```

pub mod animation;
pub mod deck;
pub mod favorites;
pub mod gesture;
pub mod lifecycle;
pub mod traits;

// Re-export main types
pub use animation::{AnimationConfig, AnimationOutcome, CardAnimator, CardPose, SpringConfig};
pub use deck::{AdvanceOutcome, Deck, DeckError, DeckState, NavDirection};
pub use favorites::FavoriteSet;
pub use gesture::{
    classify, drag_hint, GestureClassifier, GestureParseError, GestureVector, SwipeAction,
    SwipeConfig, DEFAULT_HINT_THRESHOLD, DEFAULT_SWIPE_THRESHOLD,
};
pub use lifecycle::MountToken;
pub use traits::{FavoriteChange, FavoriteChangeKind, FavoriteObserver};
