#![forbid(unsafe_code)]

//! Core: board model, gesture recognition, and the animation-commit protocol
//! for sliding-tile puzzles.
//!
//! # Role in Slider
//! `slider-core` owns everything about a puzzle that is not pixels: which
//! tile sits where, how a board is scrambled, how pointer samples become a
//! slide, and when a slide becomes a move. Hosts (a GUI view, the `slider`
//! CLI, a test harness) feed it pointer samples and timer callbacks and draw
//! what it reports.
//!
//! # Primary responsibilities
//! - **Board**: tile permutation, the single `shift` mutation, solved check.
//! - **Shuffle**: seeded random scrambles that are always solvable.
//! - **SlideGesture**: drag/tap/fling recognition with live offsets.
//! - **Puzzle**: one owner tying board, gesture and pending animation
//!   together, committing moves only after the settle animation.
//! - **PersistedState**: save/restore snapshots with full validation.
//!
//! # How it fits in the system
//! Everything runs on the caller's thread. The host delivers
//! [`PointerEvent`]s to [`Puzzle::handle`], arms a timer from the returned
//! [`PuzzleEvent::SlideScheduled`], and calls [`Puzzle::fire_commit`] when it
//! expires (or calls [`Puzzle::poll`] every frame).

pub mod animation;
pub mod board;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod persisted;
pub mod puzzle;
pub mod shuffle;
pub mod velocity;

pub use animation::{PendingAnimation, TileSlide, ease_out};
pub use board::{Board, MIN_SIZE, ShiftOutcome, SlideLine, TileId};
pub use config::{
    DEFAULT_RANDOM_MOVES, DEFAULT_SIZE, Difficulty, PuzzleConfig, SlideGestureConfig,
};
pub use error::{PuzzleError, Result};
pub use event::{PointerEvent, PointerKind, PuzzleEvent, TileOffset};
pub use geometry::{
    Axis, Grid, ImageMode, Offset, SourceRect, TileRect, measure_square, source_rect,
};
pub use gesture::{GestureRelease, GestureSession, SlideGesture};
pub use persisted::{FORMAT_VERSION, PersistedState};
pub use puzzle::{Phase, Puzzle, PuzzleListener, TileLayout};
pub use shuffle::{ShuffleReach, scramble, scrambled};
pub use velocity::VelocityTracker;
pub use web_time::Instant;
