//! ProfileIndex building and validation.
//!
//! This module builds the ProfileIndex from parsed data:
//! - Parse candidates and chats (in parallel, they are independent files)
//! - Reject duplicate ids, which would make lookups ambiguous
//! - Keep deck order exactly as the source lists it

use crate::error::{ProfileLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

impl ProfileIndex {
    /// Load a dataset directory containing profiles.json and (optionally) chats.json
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading DEVMatch dataset from {:?}", data_dir);

        let profiles_path = data_dir.join(parser::PROFILES_FILE);
        let chats_path = data_dir.join(parser::CHATS_FILE);

        // Rayon's `join` runs both parsers in parallel
        let (candidates, chats) = rayon::join(
            || parser::parse_candidates(&profiles_path),
            || parser::parse_chats(&chats_path),
        );

        let index = Self::from_parts(candidates?, chats?)?;

        let (candidates, chats, messages) = index.counts();
        info!(
            "Loaded {} candidates, {} chats, {} messages",
            candidates, chats, messages
        );
        Ok(index)
    }

    /// Build an index from already-parsed records, validating ids
    pub fn from_parts(candidates: Vec<Candidate>, chats: Vec<ChatThread>) -> Result<Self> {
        ensure_unique("candidate", candidates.iter().map(|c| c.id))?;
        ensure_unique("chat", chats.iter().map(|c| c.id))?;

        let mut index = ProfileIndex::new();
        for candidate in candidates {
            index.insert_candidate(candidate);
        }
        for thread in chats {
            index.insert_chat(thread);
        }

        index.validate()?;
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Chats for ids that are not in the deck are allowed (a conversation can
    /// outlive a deck), but message ids inside a thread must be unique.
    pub fn validate(&self) -> Result<()> {
        for thread in self.chats.values() {
            let mut seen = HashSet::new();
            for message in &thread.messages {
                if !seen.insert(message.id) {
                    return Err(ProfileLoadError::ValidationError(format!(
                        "chat {} repeats message id {}",
                        thread.id, message.id
                    )));
                }
            }
            if self.get_candidate(thread.id).is_none() {
                debug!("Chat {} has no matching candidate in the deck", thread.id);
            }
        }
        Ok(())
    }
}

fn ensure_unique(entity: &str, ids: impl Iterator<Item = CandidateId>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ProfileLoadError::DuplicateId {
                entity: entity.to_string(),
                id,
            });
        }
    }
    Ok(())
}
