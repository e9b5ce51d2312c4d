//! Core domain types for the DEVMatch discovery screens.
//!
//! This module defines the records that flow through the deck:
//! - Candidates (developer profiles shown on swipe cards)
//! - Chat threads and messages
//! - `ProfileIndex`, the in-memory lookup over both

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a candidate profile
pub type CandidateId = u32;

/// Identifier of a message inside one chat thread (1-based, per thread)
pub type MessageId = u32;

// =============================================================================
// Candidate-related Types
// =============================================================================

/// A developer profile shown in the discovery deck.
///
/// Candidates are immutable once loaded; the deck only moves a cursor over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    /// Avatar location; `None` renders the placeholder
    #[serde(default)]
    pub image: Option<String>,
    pub summary: String,
    /// Tag list rendered as badges
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub socials: SocialHandles,
}

impl Candidate {
    /// Build a candidate with no avatar, tags or social handles
    pub fn new(id: CandidateId, name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
            summary: summary.into(),
            interests: Vec::new(),
            socials: SocialHandles::default(),
        }
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_socials(mut self, github: impl Into<String>, linkedin: impl Into<String>) -> Self {
        self.socials = SocialHandles {
            github: Some(github.into()),
            linkedin: Some(linkedin.into()),
        };
        self
    }

    /// Avatar to render, falling back to the placeholder image
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// Placeholder avatar used when a profile has no picture
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=300";

/// External account handles (bare usernames, not URLs)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandles {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl SocialHandles {
    pub fn github_url(&self) -> Option<String> {
        self.github
            .as_ref()
            .map(|handle| format!("https://github.com/{}", handle))
    }

    pub fn linkedin_url(&self) -> Option<String> {
        self.linkedin
            .as_ref()
            .map(|handle| format!("https://linkedin.com/in/{}", handle))
    }
}

// =============================================================================
// Chat-related Types
// =============================================================================

/// Who wrote a chat message, from the local user's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    You,
    Them,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    /// Display time as shown in the thread ("10:15 AM", "Yesterday")
    pub time: String,
}

/// A conversation with one candidate, keyed by that candidate's id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Messages not yet seen by the local user
    #[serde(default)]
    pub unread: u32,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

// =============================================================================
// ProfileIndex - the in-memory store behind the screens
// =============================================================================

/// Holds every candidate and chat thread loaded for a session.
///
/// Candidates keep their load order (that order is the deck order); a side
/// map gives O(1) lookup by id. Lookups return `Option` so an unknown id is
/// an explicit "not found" rather than a silent default.
#[derive(Debug, Default)]
pub struct ProfileIndex {
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) positions: HashMap<CandidateId, usize>,

    /// Chat threads sorted by candidate id
    pub(crate) chats: BTreeMap<CandidateId, ChatThread>,
}

impl ProfileIndex {
    /// Creates a new, empty ProfileIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a candidate by ID
    pub fn get_candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.positions.get(&id).map(|&pos| &self.candidates[pos])
    }

    /// All candidates in deck order
    ///
    /// Rust concept: `&[T]` is a borrowed view, callers clone only what they keep
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Get the chat thread for a candidate
    pub fn get_chat(&self, id: CandidateId) -> Option<&ChatThread> {
        self.chats.get(&id)
    }

    /// All chat threads ordered by candidate id
    pub fn chat_threads(&self) -> impl Iterator<Item = &ChatThread> {
        self.chats.values()
    }

    /// Insert a candidate, replacing any previous record with the same id
    /// in place so deck order is preserved.
    pub fn insert_candidate(&mut self, candidate: Candidate) {
        match self.positions.get(&candidate.id) {
            Some(&pos) => self.candidates[pos] = candidate,
            None => {
                self.positions.insert(candidate.id, self.candidates.len());
                self.candidates.push(candidate);
            }
        }
    }

    pub fn insert_chat(&mut self, thread: ChatThread) {
        self.chats.insert(thread.id, thread);
    }

    /// Get counts for debugging/validation: (candidates, chats, messages)
    pub fn counts(&self) -> (usize, usize, usize) {
        let messages = self.chats.values().map(|c| c.messages.len()).sum();
        (self.candidates.len(), self.chats.len(), messages)
    }
}
