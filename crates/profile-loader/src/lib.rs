//! # Profile Loader Crate
//!
//! This crate loads and indexes the data behind the DEVMatch screens.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Candidate, ChatThread, ProfileIndex)
//! - **parser**: Parse profiles.json / chats.json into Rust structs
//! - **index**: Build and validate a ProfileIndex from a data directory
//! - **profile**: The local user's own profile and its form validation
//! - **mock**: Bundled demo deck used when no data directory is given
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use profile_loader::ProfileIndex;
//! use std::path::Path;
//!
//! let index = ProfileIndex::load_from_files(Path::new("data/devmatch"))?;
//!
//! match index.get_candidate(3) {
//!     Some(candidate) => println!("{} - {}", candidate.name, candidate.summary),
//!     None => println!("no such candidate"),
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod profile;
pub mod mock;

// Re-export commonly used types for convenience
pub use error::{ProfileLoadError, Result};
pub use profile::UserProfile;
pub use types::{
    // Type aliases
    CandidateId,
    MessageId,
    // Core types
    Candidate,
    ChatMessage,
    ChatThread,
    ProfileIndex,
    Sender,
    SocialHandles,
    PLACEHOLDER_IMAGE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_index_creation() {
        let index = ProfileIndex::new();
        assert_eq!(index.counts(), (0, 0, 0));
    }

    #[test]
    fn test_insert_candidate() {
        let mut index = ProfileIndex::new();

        let candidate = Candidate::new(1, "Alex Johnson", "Full-stack developer")
            .with_interests(["React", "TypeScript"])
            .with_socials("alexjohnson", "alex-johnson");

        index.insert_candidate(candidate.clone());

        let retrieved = index.get_candidate(1).unwrap();
        assert_eq!(retrieved, &candidate);
        assert_eq!(retrieved.image_or_placeholder(), PLACEHOLDER_IMAGE);
        assert_eq!(
            retrieved.socials.linkedin_url().as_deref(),
            Some("https://linkedin.com/in/alex-johnson")
        );
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut index = ProfileIndex::new();
        index.insert_candidate(Candidate::new(1, "A", "first"));
        index.insert_candidate(Candidate::new(2, "B", "second"));
        index.insert_candidate(Candidate::new(1, "A", "updated"));

        assert_eq!(index.candidates().len(), 2);
        assert_eq!(index.candidates()[0].summary, "updated");
    }

    #[test]
    fn test_empty_queries() {
        let index = ProfileIndex::new();

        // Unknown ids are an explicit None, never a default record
        assert!(index.get_candidate(999).is_none());
        assert!(index.get_chat(999).is_none());
        assert!(index.candidates().is_empty());
        assert_eq!(index.chat_threads().count(), 0);
    }
}
