//! Toast notifications produced by session actions.

use std::fmt;
use swipe::SwipeAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub title: String,
    pub description: String,
}

impl Feedback {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Toast for a completed swipe on `name`; `None` for `Cancel`
    pub fn for_swipe(action: SwipeAction, name: &str) -> Option<Self> {
        let feedback = match action {
            SwipeAction::Like => Self::new("Liked Profile", format!("You liked {}'s profile", name)),
            SwipeAction::Skip => {
                Self::new("Skipped Profile", format!("You skipped {}'s profile", name))
            }
            SwipeAction::Connect => Self::new(
                "Connection Request Sent",
                format!("You've sent a connection request to {}", name),
            ),
            SwipeAction::Cancel => return None,
        };
        Some(feedback)
    }

    pub fn deck_exhausted() -> Self {
        Self::new("No more profiles", "You've seen all available profiles")
    }

    pub fn favorite_toggled(name: &str, added: bool) -> Self {
        if added {
            Self::new("Added to Favorites", format!("{} has been added to your favorites", name))
        } else {
            Self::new(
                "Removed from Favorites",
                format!("{} has been removed from your favorites", name),
            )
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
