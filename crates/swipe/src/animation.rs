//! Card Animation Controller - moves the card, never the deck.
//!
//! Three transitions are driven frame by frame on the tokio timer:
//! - exit: tween off-screen in the swipe direction while fading out
//! - reset: damped spring back to the rest pose after a cancelled drag
//! - entry: tween the next card in from the side it is coming from
//!
//! Each frame checks the [`MountToken`] before writing the pose. Once the
//! owning screen is torn down the animation stops where it is and reports
//! `Interrupted`; nothing is written after that.

use crate::deck::NavDirection;
use crate::gesture::{GestureVector, SwipeAction};
use crate::lifecycle::MountToken;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Upper bound on spring frames; the card snaps to rest if still moving
const MAX_SPRING_FRAMES: u32 = 600;

/// Presentation state of the card on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardPose {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

impl CardPose {
    pub const REST: CardPose = CardPose {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
    };

    /// Pose of a card being held at a drag offset
    pub fn dragged(vector: GestureVector) -> Self {
        Self {
            x: vector.offset_x,
            y: vector.offset_y,
            opacity: 1.0,
        }
    }

    fn lerp(from: CardPose, to: CardPose, t: f64) -> CardPose {
        CardPose {
            x: from.x + (to.x - from.x) * t,
            y: from.y + (to.y - from.y) * t,
            opacity: from.opacity + (to.opacity - from.opacity) * t,
        }
    }
}

impl Default for CardPose {
    fn default() -> Self {
        Self::REST
    }
}

/// Damped spring used to return a card to rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from rest (px) below which the spring may settle
    pub rest_delta: f64,
    /// Speed (px/s) below which the spring may settle
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 20.0,
            mass: 1.0,
            rest_delta: 0.5,
            rest_speed: 10.0,
        }
    }
}

impl SpringConfig {
    /// One semi-implicit Euler step towards 0; returns (displacement, velocity)
    pub fn step(&self, displacement: f64, velocity: f64, dt: f64) -> (f64, f64) {
        let accel = (-self.stiffness * displacement - self.damping * velocity) / self.mass;
        let velocity = velocity + accel * dt;
        (displacement + velocity * dt, velocity)
    }

    pub fn is_settled(&self, displacement: f64, velocity: f64) -> bool {
        displacement.abs() < self.rest_delta && velocity.abs() < self.rest_speed
    }

    /// Frames needed for a release at `displacement` (at rest) to settle
    pub fn settle_frames(&self, displacement: f64, dt: f64) -> u32 {
        let (mut d, mut v) = (displacement, 0.0);
        let mut frames = 0;
        while !self.is_settled(d, v) && frames < MAX_SPRING_FRAMES {
            (d, v) = self.step(d, v, dt);
            frames += 1;
        }
        frames
    }
}

/// Timing and geometry of card transitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// How far off-center an exiting card travels (px)
    pub exit_distance: f64,
    pub exit_duration_ms: u64,
    /// Where an entering card starts, measured from center (px)
    pub entry_offset: f64,
    pub entry_duration_ms: u64,
    pub frame_interval_ms: u64,
    pub spring: SpringConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            exit_distance: 500.0,
            exit_duration_ms: 300,
            entry_offset: 1000.0,
            entry_duration_ms: 400,
            frame_interval_ms: 16,
            spring: SpringConfig::default(),
        }
    }
}

impl AnimationConfig {
    /// Configure the exit tween duration (default: 300ms)
    pub fn with_exit_duration(mut self, duration: Duration) -> Self {
        self.exit_duration_ms = duration.as_millis() as u64;
        self
    }

    /// Configure the entry tween duration (default: 400ms)
    pub fn with_entry_duration(mut self, duration: Duration) -> Self {
        self.entry_duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_duration_ms)
    }

    pub fn entry_duration(&self) -> Duration {
        Duration::from_millis(self.entry_duration_ms)
    }

    /// Off-screen pose for an exiting card; `None` for `Cancel`.
    ///
    /// Only the swipe axis moves; the other axis keeps its drag offset.
    pub fn exit_target(&self, action: SwipeAction, from: CardPose) -> Option<CardPose> {
        let target = match action {
            SwipeAction::Like => CardPose { x: self.exit_distance, ..from },
            SwipeAction::Skip => CardPose { x: -self.exit_distance, ..from },
            SwipeAction::Connect => CardPose { y: -self.exit_distance, ..from },
            SwipeAction::Cancel => return None,
        };
        Some(CardPose { opacity: 0.0, ..target })
    }

    /// Starting pose for the card that replaces the current one
    pub fn entry_origin(&self, direction: NavDirection) -> CardPose {
        let x = match direction {
            NavDirection::Forward => self.entry_offset,
            NavDirection::Backward => -self.entry_offset,
        };
        CardPose { x, y: 0.0, opacity: 0.0 }
    }
}

/// How an animation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    /// The screen was torn down mid-flight; the pose was left untouched
    Interrupted,
}

impl AnimationOutcome {
    pub fn is_completed(self) -> bool {
        self == AnimationOutcome::Completed
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Drives the pose of the single visible card
#[derive(Debug, Clone)]
pub struct CardAnimator {
    config: AnimationConfig,
    pose: CardPose,
    mount: MountToken,
}

impl CardAnimator {
    pub fn new(config: AnimationConfig, mount: MountToken) -> Self {
        Self {
            config,
            pose: CardPose::REST,
            mount,
        }
    }

    pub fn pose(&self) -> CardPose {
        self.pose
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Follow the pointer while the card is held
    pub fn drag_to(&mut self, vector: GestureVector) {
        if self.mount.is_mounted() {
            self.pose = CardPose::dragged(vector);
        }
    }

    /// Play the exit transition for `action`.
    ///
    /// `Cancel` has no exit; it springs back to rest instead.
    pub async fn animate_exit(&mut self, action: SwipeAction) -> AnimationOutcome {
        match self.config.exit_target(action, self.pose) {
            Some(target) => {
                debug!("exit animation for {} towards {:?}", action, target);
                self.tween(target, self.config.exit_duration()).await
            }
            None => self.reset_position().await,
        }
    }

    /// Spring the card back to `(0, 0)` at full opacity
    pub async fn reset_position(&mut self) -> AnimationOutcome {
        let spring = self.config.spring;
        let frame = self.config.frame_interval();
        let dt = frame.as_secs_f64();
        let (mut vx, mut vy) = (0.0, 0.0);

        for _ in 0..MAX_SPRING_FRAMES {
            if spring.is_settled(self.pose.x, vx) && spring.is_settled(self.pose.y, vy) {
                break;
            }
            tokio::time::sleep(frame).await;
            if !self.mount.is_mounted() {
                return AnimationOutcome::Interrupted;
            }
            let (x, nvx) = spring.step(self.pose.x, vx, dt);
            let (y, nvy) = spring.step(self.pose.y, vy, dt);
            (vx, vy) = (nvx, nvy);
            self.pose = CardPose { x, y, opacity: 1.0 };
        }

        if !self.mount.is_mounted() {
            return AnimationOutcome::Interrupted;
        }
        self.pose = CardPose::REST;
        AnimationOutcome::Completed
    }

    /// Bring the next card in from the side matching `direction`
    pub async fn animate_entry(&mut self, direction: NavDirection) -> AnimationOutcome {
        if !self.mount.is_mounted() {
            return AnimationOutcome::Interrupted;
        }
        self.pose = self.config.entry_origin(direction);
        self.tween(CardPose::REST, self.config.entry_duration()).await
    }

    /// Place the card at rest without animating
    pub fn snap_to_rest(&mut self) {
        if self.mount.is_mounted() {
            self.pose = CardPose::REST;
        }
    }

    async fn tween(&mut self, target: CardPose, duration: Duration) -> AnimationOutcome {
        let frame = self.config.frame_interval();
        let frames = duration.as_millis().div_ceil(frame.as_millis()).max(1) as u32;
        let from = self.pose;

        for i in 1..=frames {
            tokio::time::sleep(frame).await;
            if !self.mount.is_mounted() {
                debug!("animation interrupted at frame {}/{}", i, frames);
                return AnimationOutcome::Interrupted;
            }
            let t = ease_out_cubic(f64::from(i) / f64::from(frames));
            self.pose = CardPose::lerp(from, target, t);
        }

        self.pose = target;
        AnimationOutcome::Completed
    }
}
