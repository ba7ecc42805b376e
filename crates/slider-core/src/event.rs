#![forbid(unsafe_code)]

//! Pointer input and the events a puzzle reports back to its host.
//!
//! The platform layer translates its touch/mouse stream into
//! [`PointerEvent`]s with board-relative coordinates and a monotonic
//! timestamp. The puzzle answers with [`PuzzleEvent`]s describing what the
//! paint surface and timer service should do next.

use std::time::Duration;

use web_time::Instant;

use crate::board::TileId;
use crate::geometry::Offset;

/// Phase of a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (treated like `Up`).
    Cancel,
}

/// One pointer sample in board coordinates (pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub time: Instant,
    /// Platform velocity estimate in px/s, when the platform computes one.
    pub velocity: Option<(f32, f32)>,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerKind, x: f32, y: f32, time: Instant) -> Self {
        Self {
            kind,
            x,
            y,
            time,
            velocity: None,
        }
    }

    #[must_use]
    pub const fn down(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerKind::Down, x, y, time)
    }

    #[must_use]
    pub const fn moved(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerKind::Move, x, y, time)
    }

    #[must_use]
    pub const fn up(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerKind::Up, x, y, time)
    }

    #[must_use]
    pub const fn cancel(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerKind::Cancel, x, y, time)
    }

    /// Attach a platform velocity estimate (px/s).
    #[must_use]
    pub const fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Some((vx, vy));
        self
    }

    /// Whether this sample ends the gesture.
    #[inline]
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.kind, PointerKind::Up | PointerKind::Cancel)
    }

    /// Integer pixel position (truncated toward zero).
    #[inline]
    #[must_use]
    pub fn pixel(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// Displacement for one tile during a drag or a settle animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileOffset {
    pub tile: TileId,
    pub cell: usize,
    pub offset: Offset,
}

/// What the puzzle reports after handling input or a timer.
#[derive(Debug, Clone, PartialEq)]
pub enum PuzzleEvent {
    /// A gesture session opened on `cell`.
    DragStarted { cell: usize },
    /// Live offsets for the tiles being dragged.
    TilesOffset { offsets: Vec<TileOffset> },
    /// A short, slow touch that will commit as a tap-to-slide.
    Tapped { cell: usize },
    /// The settle animation started; the commit must fire after `after`.
    SlideScheduled {
        cell: usize,
        completing: bool,
        after: Duration,
        deadline: Instant,
    },
    /// The pending slide was reconciled with the board.
    Committed { cell: usize, moved: bool },
    /// The board reached the solved arrangement.
    Solved,
}
