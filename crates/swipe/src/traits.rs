//! Seams between the swipe core and its collaborators.
//!
//! The core never does I/O itself. Persistence and user feedback hang off
//! the favorite set through the [`FavoriteObserver`] trait.

use profile_loader::CandidateId;

/// Direction of a membership change in the favorite set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChangeKind {
    Added,
    Removed,
}

/// Notification emitted after every `FavoriteSet::toggle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteChange {
    pub id: CandidateId,
    pub kind: FavoriteChangeKind,
}

impl FavoriteChange {
    pub fn is_added(&self) -> bool {
        self.kind == FavoriteChangeKind::Added
    }
}

/// Receives favorite membership changes.
///
/// ## Design Note
/// - Observers are a pure side channel: they cannot veto or alter the change
/// - `Send + Sync` so a session can be moved onto a runtime task
pub trait FavoriteObserver: Send + Sync {
    /// Returns the name of this observer (for logging/debugging)
    fn name(&self) -> &str;

    fn on_change(&self, change: &FavoriteChange);
}

/// Any `Fn(&FavoriteChange)` closure can observe the set
impl<F> FavoriteObserver for F
where
    F: Fn(&FavoriteChange) + Send + Sync,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn on_change(&self, change: &FavoriteChange) {
        self(change)
    }
}
