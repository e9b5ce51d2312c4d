//! Injected persistence for the user's profile and favorites.
//!
//! The swipe core never touches storage. A session loads the stored state
//! once when it mounts and writes favorites back through a
//! [`FavoriteObserver`] on every toggle.

use profile_loader::{CandidateId, UserProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use swipe::{FavoriteChange, FavoriteChangeKind, FavoriteObserver};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode stored state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Everything DEVMatch keeps between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredAppState {
    pub profile: Option<UserProfile>,
    pub favorites: Vec<CandidateId>,
}

impl StoredAppState {
    /// Mirror one favorite change into the stored list
    pub fn apply(&mut self, change: &FavoriteChange) {
        match change.kind {
            FavoriteChangeKind::Added => {
                if !self.favorites.contains(&change.id) {
                    self.favorites.push(change.id);
                }
            }
            FavoriteChangeKind::Removed => self.favorites.retain(|&id| id != change.id),
        }
    }
}

/// Storage backend for [`StoredAppState`]
pub trait ProfileStore: Send + Sync {
    fn load(&self) -> Result<StoredAppState, StoreError>;

    fn save(&self, state: &StoredAppState) -> Result<(), StoreError>;
}

/// In-process store, used by tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoredAppState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StoredAppState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Copy of what is currently stored
    pub fn snapshot(&self) -> StoredAppState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<StoredAppState, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &StoredAppState) -> Result<(), StoreError> {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state.clone();
        Ok(())
    }
}

/// Pretty-printed JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProfileStore for JsonFileStore {
    /// A missing file is a fresh install; an unreadable one is logged and
    /// replaced by the default state on the next save.
    fn load(&self) -> Result<StoredAppState, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No stored state at {}, starting fresh", self.path.display());
                return Ok(StoredAppState::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_json::from_str(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(
                    "Failed to parse stored state at {}: {}. Using defaults.",
                    self.path.display(),
                    e
                );
                Ok(StoredAppState::default())
            }
        }
    }

    fn save(&self, state: &StoredAppState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

/// Writes every favorite toggle through to a [`ProfileStore`].
///
/// Read-modify-write per change so a profile saved elsewhere in the
/// meantime is kept. Failures are logged and never reach the gesture path.
pub struct PersistFavorites {
    store: Arc<dyn ProfileStore>,
}

impl PersistFavorites {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }
}

impl FavoriteObserver for PersistFavorites {
    fn name(&self) -> &str {
        "PersistFavorites"
    }

    fn on_change(&self, change: &FavoriteChange) {
        let mut state = match self.store.load() {
            Ok(state) => state,
            Err(e) => {
                warn!("Could not load stored state, favorite {} not saved: {}", change.id, e);
                return;
            }
        };
        state.apply(change);
        if let Err(e) = self.store.save(&state) {
            warn!("Could not save favorite {}: {}", change.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipe::FavoriteSet;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert_eq!(store.load().unwrap(), StoredAppState::default());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load().unwrap(), StoredAppState::default());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/devmatch/state.json"));

        let state = StoredAppState {
            profile: None,
            favorites: vec![3, 1],
        };
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_apply_is_idempotent_for_adds() {
        let mut state = StoredAppState::default();
        let added = FavoriteChange { id: 4, kind: FavoriteChangeKind::Added };

        state.apply(&added);
        state.apply(&added);
        assert_eq!(state.favorites, vec![4]);

        state.apply(&FavoriteChange { id: 4, kind: FavoriteChangeKind::Removed });
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_persist_favorites_keeps_profile() {
        let profile = UserProfile {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        let store = Arc::new(MemoryStore::with_state(StoredAppState {
            profile: Some(profile.clone()),
            favorites: vec![],
        }));

        let mut favorites = FavoriteSet::new().with_observer(PersistFavorites::new(store.clone()));
        favorites.toggle(2);
        favorites.toggle(5);
        favorites.toggle(2);

        let stored = store.snapshot();
        assert_eq!(stored.favorites, vec![5]);
        assert_eq!(stored.profile, Some(profile));
    }
}
