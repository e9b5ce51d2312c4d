//! Navigation boundary.
//!
//! The session never switches screens itself; it emits intents and the host
//! decides what to do with them.

use profile_loader::CandidateId;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Open the chat thread with a candidate
    Chat(CandidateId),
    /// Open a candidate's full profile
    Profile(CandidateId),
    Favorites,
    Dashboard,
}

impl NavigationIntent {
    pub fn route(&self) -> String {
        match self {
            NavigationIntent::Chat(id) => format!("/dashboard/chats/{}", id),
            NavigationIntent::Profile(id) => format!("/profile/{}", id),
            NavigationIntent::Favorites => "/dashboard/favorites".to_string(),
            NavigationIntent::Dashboard => "/dashboard".to_string(),
        }
    }
}

impl fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, intent: NavigationIntent);
}

/// Keeps every intent in emission order
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    intents: Mutex<Vec<NavigationIntent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intents(&self) -> Vec<NavigationIntent> {
        self.intents.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.intents().iter().map(NavigationIntent::route).collect()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<NavigationIntent> {
        std::mem::take(&mut *self.intents.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, intent: NavigationIntent) {
        self.intents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(intent);
    }
}
