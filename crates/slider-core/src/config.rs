#![forbid(unsafe_code)]

//! Puzzle and gesture configuration.
//!
//! Configuration is built completely (defaults, builder setters, or JSON via
//! serde) and validated before a [`Puzzle`](crate::puzzle::Puzzle) is
//! constructed from it. Nothing here changes while a puzzle is live; changing
//! the size or image means building a new puzzle.
//!
//! Gesture thresholds are plain pixels-per-second and durations. Scaling them
//! for display density is the host's job.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::MIN_SIZE;
use crate::error::{PuzzleError, Result};
use crate::geometry::ImageMode;
use crate::shuffle::ShuffleReach;

/// Default board edge in tiles.
pub const DEFAULT_SIZE: usize = 3;

/// Default number of scramble moves.
pub const DEFAULT_RANDOM_MOVES: u32 = 15;

// ---------------------------------------------------------------------------
// Gesture thresholds
// ---------------------------------------------------------------------------

/// Thresholds that turn a finished drag into a commit or a snap-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideGestureConfig {
    /// Release speed (px/s) below which a short touch counts as a tap (default: 100).
    pub tap_velocity_max: f32,
    /// Longest touch still treated as a tap (default: 200ms).
    #[serde(with = "duration_ms")]
    pub tap_max_duration: Duration,
    /// Release speed (px/s) above which the slide always completes (default: 200).
    pub fling_velocity: f32,
    /// Window of pointer samples used to estimate release velocity (default: 100ms).
    #[serde(with = "duration_ms")]
    pub velocity_window: Duration,
}

impl Default for SlideGestureConfig {
    fn default() -> Self {
        Self {
            tap_velocity_max: 100.0,
            tap_max_duration: Duration::from_millis(200),
            fling_velocity: 200.0,
            velocity_window: Duration::from_millis(100),
        }
    }
}

impl SlideGestureConfig {
    fn validate(&self) -> Result<()> {
        if !self.tap_velocity_max.is_finite() || self.tap_velocity_max < 0.0 {
            return Err(PuzzleError::invalid(format!(
                "tap_velocity_max must be a non-negative number, got {}",
                self.tap_velocity_max
            )));
        }
        if !self.fling_velocity.is_finite() || self.fling_velocity < 0.0 {
            return Err(PuzzleError::invalid(format!(
                "fling_velocity must be a non-negative number, got {}",
                self.fling_velocity
            )));
        }
        if self.velocity_window.is_zero() {
            return Err(PuzzleError::invalid("velocity_window must be non-zero"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Named scramble depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Scramble moves for this level: `5 + 4^level`.
    #[must_use]
    pub const fn random_moves(self) -> u32 {
        let level = self as u32;
        5 + 4u32.pow(level)
    }
}

// ---------------------------------------------------------------------------
// Puzzle configuration
// ---------------------------------------------------------------------------

/// Everything needed to build a puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Board edge in tiles (default: 3).
    pub size: usize,
    /// Scramble moves applied when the board is built (default: 15).
    pub random_moves: u32,
    /// How far each scramble move may shove (default: adjacent).
    pub shuffle_reach: ShuffleReach,
    /// Opaque key the image provider resolves to a source image.
    pub image_selector: u32,
    /// How the source image maps onto tiles (default: crop).
    pub image_mode: ImageMode,
    /// Length of the settle animation before a slide commits (default: 100ms).
    #[serde(with = "duration_ms")]
    pub animation_duration: Duration,
    /// Tap/fling thresholds.
    pub gesture: SlideGestureConfig,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            random_moves: DEFAULT_RANDOM_MOVES,
            shuffle_reach: ShuffleReach::default(),
            image_selector: 0,
            image_mode: ImageMode::default(),
            animation_duration: Duration::from_millis(100),
            gesture: SlideGestureConfig::default(),
        }
    }
}

impl PuzzleConfig {
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn random_moves(mut self, moves: u32) -> Self {
        self.random_moves = moves;
        self
    }

    #[must_use]
    pub fn difficulty(self, difficulty: Difficulty) -> Self {
        self.random_moves(difficulty.random_moves())
    }

    #[must_use]
    pub fn shuffle_reach(mut self, reach: ShuffleReach) -> Self {
        self.shuffle_reach = reach;
        self
    }

    #[must_use]
    pub fn image(mut self, selector: u32, mode: ImageMode) -> Self {
        self.image_selector = selector;
        self.image_mode = mode;
        self
    }

    #[must_use]
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    #[must_use]
    pub fn gesture(mut self, gesture: SlideGestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Reject configurations that cannot produce a playable board.
    pub fn validate(&self) -> Result<()> {
        if self.size < MIN_SIZE {
            return Err(PuzzleError::invalid(format!(
                "board size must be at least {MIN_SIZE}, got {}",
                self.size
            )));
        }
        if self.size > u16::MAX as usize {
            return Err(PuzzleError::invalid(format!(
                "board size {} is too large",
                self.size
            )));
        }
        self.gesture.validate()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Durations as whole milliseconds on the wire.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
