//! Error types for the profile-loader crate.
//!
//! Everything that can go wrong while reading candidate decks, chat threads
//! or the user's own profile is collected in [`ProfileLoadError`].

use thiserror::Error;

/// Errors that can occur while loading or validating profile data
///
/// Rust concept: `#[derive(Error)]` from thiserror implements
/// `std::error::Error` and `Display` from the `#[error(...)]` attributes
#[derive(Error, Debug)]
pub enum ProfileLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A data file was not valid JSON for the expected shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Two records share the same identifier
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: String, id: u32 },

    /// A user-entered field failed validation
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl ProfileLoadError {
    pub(crate) fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        ProfileLoadError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ProfileLoadError>;
