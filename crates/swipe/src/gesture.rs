//! Gesture Classifier - turns a finished drag into a deck action.
//!
//! ## Algorithm
//! Evaluated in this order, first match wins (diagonal drags can clear
//! more than one axis, and the horizontal axis takes precedence):
//! 1. offset_x >  threshold -> Like
//! 2. offset_x < -threshold -> Skip
//! 3. offset_y < -threshold -> Connect
//! 4. anything else         -> Cancel (card springs back)
//!
//! Thresholds are exclusive: a drag of exactly `threshold` pixels cancels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Distance in pixels a card must travel before a release counts as a swipe
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 100.0;

/// Distance at which the drag indicator for an action lights up
pub const DEFAULT_HINT_THRESHOLD: f64 = 50.0;

/// Drag offset from pointer-down to pointer-up, in pixels.
///
/// Screen coordinates: positive x is rightward, negative y is upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureVector {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl GestureVector {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self { offset_x, offset_y }
    }
}

impl fmt::Display for GestureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.offset_x, self.offset_y)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum GestureParseError {
    #[error("expected 'x,y' but got '{0}'")]
    MissingComponent(String),

    #[error("'{value}' is not a finite number")]
    InvalidNumber { value: String },
}

/// Parses `"x,y"`, e.g. `"150,0"` or `"-20, -140"`
impl FromStr for GestureVector {
    type Err = GestureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| GestureParseError::MissingComponent(s.to_string()))?;

        let parse = |value: &str| {
            let value = value.trim();
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| GestureParseError::InvalidNumber {
                    value: value.to_string(),
                })
        };

        Ok(GestureVector::new(parse(x)?, parse(y)?))
    }
}

/// Discrete outcome of a drag on a profile card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeAction {
    /// Leftward drag: pass on this candidate
    Skip,
    /// Rightward drag
    Like,
    /// Upward drag: send a connection request
    Connect,
    /// Drag did not clear any threshold
    Cancel,
}

impl SwipeAction {
    /// Skip, Like and Connect each consume the card; Cancel leaves it in place
    pub fn advances_deck(self) -> bool {
        !matches!(self, SwipeAction::Cancel)
    }

    pub fn label(self) -> &'static str {
        match self {
            SwipeAction::Skip => "skip",
            SwipeAction::Like => "like",
            SwipeAction::Connect => "connect",
            SwipeAction::Cancel => "cancel",
        }
    }
}

impl fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a drag vector against `threshold`.
///
/// Pure function. Non-finite components never clear a threshold, so a NaN
/// vector classifies as `Cancel`.
pub fn classify(vector: GestureVector, threshold: f64) -> SwipeAction {
    if vector.offset_x > threshold {
        SwipeAction::Like
    } else if vector.offset_x < -threshold {
        SwipeAction::Skip
    } else if vector.offset_y < -threshold {
        SwipeAction::Connect
    } else {
        SwipeAction::Cancel
    }
}

/// Which indicator to show while the card is still being dragged
///
/// Same precedence as [`classify`], against the (smaller) hint threshold.
pub fn drag_hint(vector: GestureVector, hint_threshold: f64) -> Option<SwipeAction> {
    match classify(vector, hint_threshold) {
        SwipeAction::Cancel => None,
        action => Some(action),
    }
}

/// Thresholds used to interpret drags
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub threshold: f64,
    pub hint_threshold: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SWIPE_THRESHOLD,
            hint_threshold: DEFAULT_HINT_THRESHOLD,
        }
    }
}

impl SwipeConfig {
    /// Configure the swipe threshold (default: 100px)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Configure the drag-hint threshold (default: 50px)
    pub fn with_hint_threshold(mut self, hint_threshold: f64) -> Self {
        self.hint_threshold = hint_threshold;
        self
    }
}

/// Classifier bound to a configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier {
    config: SwipeConfig,
}

impl GestureClassifier {
    pub fn new(config: SwipeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn classify(&self, vector: GestureVector) -> SwipeAction {
        classify(vector, self.config.threshold)
    }

    pub fn hint(&self, vector: GestureVector) -> Option<SwipeAction> {
        drag_hint(vector, self.config.hint_threshold)
    }
}
