//! Mount lifecycle shared between a screen and its deferred work.
//!
//! A screen owns a [`MountToken`] for as long as it is shown. Anything that
//! completes later (animation frames, completion callbacks) holds a clone and
//! checks it before touching state; after `tear_down` those checks fail and
//! the deferred work becomes inert.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
pub struct MountToken {
    torn_down: Arc<AtomicBool>,
}

impl MountToken {
    pub fn new() -> Self {
        Self {
            torn_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.torn_down.load(Ordering::Acquire)
    }

    /// Mark the owning screen as gone. Idempotent.
    pub fn tear_down(&self) {
        self.torn_down.store(true, Ordering::Release);
    }

    /// Run `f` only while still mounted
    pub fn run_if_mounted<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        if self.is_mounted() { Some(f()) } else { None }
    }
}

impl Default for MountToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = MountToken::new();
        let deferred = token.clone();
        assert!(deferred.is_mounted());

        token.tear_down();
        assert!(!deferred.is_mounted());
        token.tear_down();
        assert!(!token.is_mounted());
    }

    #[test]
    fn test_run_if_mounted() {
        let token = MountToken::new();
        let mut hits = 0;
        assert_eq!(token.run_if_mounted(|| { hits += 1; hits }), Some(1));

        token.tear_down();
        assert_eq!(token.run_if_mounted(|| { hits += 1; hits }), None);
        assert_eq!(hits, 1);
    }
}
