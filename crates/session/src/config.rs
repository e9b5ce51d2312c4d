//! Session configuration.
//!
//! Everything has a default, so an empty JSON object (or no file at all)
//! yields a working session. CLI flags are applied on top with the
//! `with_*` setters.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use swipe::{AnimationConfig, SwipeConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub swipe: SwipeConfig,
    pub animation: AnimationConfig,
    /// Also favorite a candidate when a connection request is sent
    pub connect_adds_favorite: bool,
}

impl SessionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Override the classification threshold (px)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.swipe = self.swipe.with_threshold(threshold);
        self
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_connect_adds_favorite(mut self, enabled: bool) -> Self {
        self.connect_adds_favorite = enabled;
        self
    }
}
