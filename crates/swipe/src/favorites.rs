//! Favorite Set Manager - the candidate ids the user has hearted.
//!
//! Lives independently of the deck cursor. Membership is a HashSet for O(1)
//! lookups; a parallel Vec keeps insertion order for list rendering.

use crate::traits::{FavoriteChange, FavoriteChangeKind, FavoriteObserver};
use profile_loader::CandidateId;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

#[derive(Default)]
pub struct FavoriteSet {
    members: HashSet<CandidateId>,
    order: Vec<CandidateId>,
    observers: Vec<Box<dyn FavoriteObserver>>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from stored ids, dropping duplicates (first occurrence wins).
    /// No observers are notified.
    pub fn from_ids(ids: impl IntoIterator<Item = CandidateId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if set.members.insert(id) {
                set.order.push(id);
            }
        }
        set
    }

    /// Register an observer (builder pattern)
    pub fn with_observer(mut self, observer: impl FavoriteObserver + 'static) -> Self {
        self.subscribe(observer);
        self
    }

    pub fn subscribe(&mut self, observer: impl FavoriteObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Flip membership of `id` and return the new state (true = favorite)
    pub fn toggle(&mut self, id: CandidateId) -> bool {
        let kind = if self.members.remove(&id) {
            self.order.retain(|&fav| fav != id);
            FavoriteChangeKind::Removed
        } else {
            self.members.insert(id);
            self.order.push(id);
            FavoriteChangeKind::Added
        };

        let change = FavoriteChange { id, kind };
        for observer in &self.observers {
            debug!("Notifying {} of {:?}", observer.name(), change);
            observer.on_change(&change);
        }

        change.is_added()
    }

    /// Make `id` a favorite if it is not one already.
    /// Returns true when membership changed.
    pub fn insert(&mut self, id: CandidateId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.toggle(id)
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.members.contains(&id)
    }

    /// Favorite ids in insertion order
    pub fn all(&self) -> &[CandidateId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Debug for FavoriteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoriteSet")
            .field("order", &self.order)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_toggle_is_an_involution() {
        let mut set = FavoriteSet::from_ids([3]);

        for id in [1, 3] {
            let before = set.contains(id);
            set.toggle(id);
            set.toggle(id);
            assert_eq!(set.contains(id), before);
        }
    }

    #[test]
    fn test_toggle_returns_new_membership() {
        let mut set = FavoriteSet::new();
        assert!(set.toggle(7));
        assert!(set.contains(7));
        assert!(!set.toggle(7));
        assert!(!set.contains(7));
        assert!(set.is_empty());
    }

    #[test]
    fn test_insertion_order() {
        let mut set = FavoriteSet::new();
        set.toggle(5);
        set.toggle(1);
        set.toggle(3);
        set.toggle(1);
        set.toggle(1);
        assert_eq!(set.all(), &[5, 3, 1]);
    }

    #[test]
    fn test_from_ids_dedups() {
        let set = FavoriteSet::from_ids([2, 4, 2, 9, 4]);
        assert_eq!(set.all(), &[2, 4, 9]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_observers_see_direction() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut set = FavoriteSet::new().with_observer(move |change: &FavoriteChange| {
            sink.lock().unwrap().push(*change);
        });

        set.toggle(1);
        set.toggle(1);
        assert!(set.insert(2));
        assert!(!set.insert(2));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                FavoriteChange { id: 1, kind: FavoriteChangeKind::Added },
                FavoriteChange { id: 1, kind: FavoriteChangeKind::Removed },
                FavoriteChange { id: 2, kind: FavoriteChangeKind::Added },
            ]
        );
    }
}
