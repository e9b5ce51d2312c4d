//! Parser for DEVMatch data files.
//!
//! Two JSON files make up a dataset directory:
//! - profiles.json: array of candidate records, in deck order
//! - chats.json: array of chat threads keyed by candidate id
//!
//! Parsing is split from reading so the same code handles bundled strings
//! and files on disk.

use crate::error::{ProfileLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const PROFILES_FILE: &str = "profiles.json";
pub const CHATS_FILE: &str = "chats.json";

/// Read a whole file, turning "not found" into our own error variant
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ProfileLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => ProfileLoadError::IoError(e),
    })
}

fn parse_json<T: DeserializeOwned>(content: &str, file: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|e| ProfileLoadError::ParseError {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a candidate list from JSON text
///
/// Names and summaries are trimmed; a candidate with an empty name is rejected
/// because the card has nothing to show.
pub fn parse_candidates_str(content: &str) -> Result<Vec<Candidate>> {
    let mut candidates: Vec<Candidate> = parse_json(content, PROFILES_FILE)?;

    for candidate in &mut candidates {
        candidate.name = candidate.name.trim().to_string();
        candidate.summary = candidate.summary.trim().to_string();
        if candidate.name.is_empty() {
            return Err(ProfileLoadError::ParseError {
                file: PROFILES_FILE.to_string(),
                reason: format!("candidate {} has an empty name", candidate.id),
            });
        }
        candidate.interests.retain(|tag| !tag.trim().is_empty());
    }

    Ok(candidates)
}

/// Parse the profiles.json file
pub fn parse_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let content = read_file(path)?;
    parse_candidates_str(&content)
}

/// Parse chat threads from JSON text
pub fn parse_chats_str(content: &str) -> Result<Vec<ChatThread>> {
    parse_json(content, CHATS_FILE)
}

/// Parse the chats.json file
///
/// A dataset without chats is valid, so a missing file yields no threads.
pub fn parse_chats(path: &Path) -> Result<Vec<ChatThread>> {
    match read_file(path) {
        Ok(content) => parse_chats_str(&content),
        Err(ProfileLoadError::FileNotFound { .. }) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
