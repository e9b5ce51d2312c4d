//! The local user's own profile, as captured by the onboarding form.

use crate::error::{ProfileLoadError, Result};
use crate::types::PLACEHOLDER_IMAGE;
use serde::{Deserialize, Serialize};

const MIN_AGE: u8 = 13;
const MAX_AGE: u8 = 120;

/// Profile fields as entered on the details screen.
///
/// Values are kept as the user typed them (age included) so a half-filled
/// form can be stored and reloaded; `validate` decides whether it is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub age: String,
    pub gender: String,
    pub summary: String,
    pub github: String,
    pub linkedin: String,
    pub interests: Vec<String>,
    pub image: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            nickname: String::new(),
            age: String::new(),
            gender: String::new(),
            summary: String::new(),
            github: String::new(),
            linkedin: String::new(),
            interests: Vec::new(),
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl UserProfile {
    /// Add an interest tag. Returns false for blank or already-present tags.
    pub fn add_interest(&mut self, interest: &str) -> bool {
        let interest = interest.trim();
        if interest.is_empty() || self.interests.iter().any(|i| i == interest) {
            return false;
        }
        self.interests.push(interest.to_string());
        true
    }

    pub fn remove_interest(&mut self, interest: &str) -> bool {
        let before = self.interests.len();
        self.interests.retain(|i| i != interest);
        self.interests.len() != before
    }

    /// Nickname when set, otherwise "first last"
    pub fn display_name(&self) -> String {
        if !self.nickname.trim().is_empty() {
            return self.nickname.trim().to_string();
        }
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Parsed age, if the field holds a valid number
    pub fn age_years(&self) -> Option<u8> {
        self.age.trim().parse().ok()
    }

    /// Check that every required field is filled in
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("age", &self.age),
            ("gender", &self.gender),
            ("summary", &self.summary),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ProfileLoadError::invalid_field(field, "required"));
            }
        }

        match self.age_years() {
            Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Ok(()),
            Some(age) => Err(ProfileLoadError::invalid_field(
                "age",
                format!("{} is outside {}..={}", age, MIN_AGE, MAX_AGE),
            )),
            None => Err(ProfileLoadError::invalid_field(
                "age",
                format!("'{}' is not a number", self.age.trim()),
            )),
        }
    }

    /// Store social handles in their bare form
    pub fn normalize_socials(&mut self) {
        self.github = normalize_github_handle(&self.github);
        self.linkedin = normalize_linkedin_handle(&self.linkedin);
    }
}

/// Strip a `github.com/` URL down to the username
pub fn normalize_github_handle(input: &str) -> String {
    strip_after(input, "github.com/")
}

/// Strip a `linkedin.com/in/` URL down to the profile handle
pub fn normalize_linkedin_handle(input: &str) -> String {
    strip_after(input, "linkedin.com/in/")
}

fn strip_after(input: &str, marker: &str) -> String {
    let input = input.trim();
    let handle = match input.split_once(marker) {
        Some((_, rest)) => rest,
        None => input,
    };
    handle.trim_end_matches('/').to_string()
}
