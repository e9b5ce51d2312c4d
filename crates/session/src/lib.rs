//! Session crate for DEVMatch.
//!
//! This crate wires the swipe core to its collaborators: the injected
//! profile store, the navigation boundary, chats and configuration.

pub mod chat;
pub mod config;
pub mod feedback;
pub mod navigation;
pub mod orchestrator;
pub mod store;

pub use chat::{ChatService, ChatSummary};
pub use config::SessionConfig;
pub use feedback::Feedback;
pub use navigation::{NavigationIntent, Navigator, RecordingNavigator};
pub use orchestrator::{
    AnimationCompletion, ExitTicket, IgnoreReason, Release, SwipeOutcome, SwipeSession,
};
pub use store::{
    JsonFileStore, MemoryStore, PersistFavorites, ProfileStore, StoreError, StoredAppState,
};
