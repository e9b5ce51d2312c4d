//! Chat threads for the current session.
//!
//! Threads are copied out of the [`ProfileIndex`] when the service is built;
//! reading a thread and sending messages only change this copy.

use chrono::Local;
use profile_loader::{Candidate, CandidateId, ChatMessage, ChatThread, ProfileIndex, Sender};
use std::collections::BTreeMap;
use tracing::debug;

/// One row of the chat list
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSummary {
    pub id: CandidateId,
    pub name: String,
    pub preview: String,
    pub time: String,
    pub unread: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ChatService {
    threads: BTreeMap<CandidateId, ChatThread>,
}

impl ChatService {
    pub fn new(threads: impl IntoIterator<Item = ChatThread>) -> Self {
        Self {
            threads: threads.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn from_index(index: &ProfileIndex) -> Self {
        Self::new(index.chat_threads().cloned())
    }

    /// Look at a thread without marking it read
    pub fn get(&self, id: CandidateId) -> Option<&ChatThread> {
        self.threads.get(&id)
    }

    /// Open a thread, clearing its unread count
    pub fn open(&mut self, id: CandidateId) -> Option<&ChatThread> {
        let thread = self.threads.get_mut(&id)?;
        thread.unread = 0;
        Some(thread)
    }

    /// Thread for `candidate`, creating an empty one on first contact
    pub fn start_thread(&mut self, candidate: &Candidate) -> &ChatThread {
        self.threads.entry(candidate.id).or_insert_with(|| {
            debug!("Starting chat thread with candidate {}", candidate.id);
            ChatThread {
                id: candidate.id,
                name: candidate.name.clone(),
                image: candidate.image.clone(),
                unread: 0,
                messages: Vec::new(),
            }
        })
    }

    /// Append a message from the local user.
    ///
    /// The new id is one past the highest id in the thread. Blank text and
    /// unknown threads are ignored (`None`).
    pub fn send_message(
        &mut self,
        id: CandidateId,
        text: &str,
        time: impl Into<String>,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let thread = self.threads.get_mut(&id)?;
        let next_id = thread.messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let message = ChatMessage {
            id: next_id,
            sender: Sender::You,
            text: text.to_string(),
            time: time.into(),
        };
        thread.messages.push(message);
        thread.messages.last()
    }

    /// Send stamped with the local wall-clock time, e.g. "2:05 PM"
    pub fn send_message_now(&mut self, id: CandidateId, text: &str) -> Option<&ChatMessage> {
        let time = Local::now().format("%-I:%M %p").to_string();
        self.send_message(id, text, time)
    }

    pub fn summaries(&self) -> Vec<ChatSummary> {
        self.threads
            .values()
            .map(|thread| {
                let (preview, time) = thread
                    .last_message()
                    .map(|m| (m.text.clone(), m.time.clone()))
                    .unwrap_or_default();
                ChatSummary {
                    id: thread.id,
                    name: thread.name.clone(),
                    preview,
                    time,
                    unread: thread.unread,
                }
            })
            .collect()
    }

    pub fn total_unread(&self) -> u32 {
        self.threads.values().map(|t| t.unread).sum()
    }
}
