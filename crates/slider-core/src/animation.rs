#![forbid(unsafe_code)]

//! Settle animation between a released gesture and its logical commit.
//!
//! A [`PendingAnimation`] records, for every tile in the released line, the
//! displacement the tile starts at (wherever the drag left it) and the one it
//! ends at (its next cell when completing, its own cell when snapping back).
//! A paint surface samples [`PendingAnimation::offsets_at`] each frame; the
//! board itself does not change until the puzzle commits.
//!
//! # Invariants
//!
//! 1. `progress(now)` is 0.0 at `started`, 1.0 at and after the deadline, and
//!    monotonic in between.
//! 2. A zero duration is immediately due and reports progress 1.0.
//! 3. The animation never mutates the board.

use std::time::Duration;

use web_time::Instant;

use crate::board::{Board, TileId};
use crate::event::TileOffset;
use crate::geometry::{Grid, Offset};
use crate::gesture::GestureRelease;

/// Ease-out quadratic: fast start, gentle landing.
#[inline]
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Motion of one tile during the settle animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSlide {
    pub tile: TileId,
    pub cell: usize,
    pub from: Offset,
    pub to: Offset,
}

impl TileSlide {
    /// Displacement at eased progress `t` in `[0, 1]`.
    #[must_use]
    pub fn offset_at_progress(&self, t: f32) -> Offset {
        let lerp = |a: i32, b: i32| a + ((b - a) as f32 * t).round() as i32;
        Offset::new(lerp(self.from.dx, self.to.dx), lerp(self.from.dy, self.to.dy))
    }
}

/// A released slide waiting for its commit.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAnimation {
    cell: usize,
    completing: bool,
    slides: Vec<TileSlide>,
    started: Instant,
    duration: Duration,
}

impl PendingAnimation {
    /// Build the settle animation for a released gesture.
    #[must_use]
    pub fn from_release(
        release: &GestureRelease,
        board: &Board,
        grid: &Grid,
        started: Instant,
        duration: Duration,
    ) -> Self {
        let slides = match &release.line {
            Some(line) => {
                let to = if release.should_complete {
                    line.axis.displacement(grid.tile_size() * line.direction)
                } else {
                    Offset::ZERO
                };
                line.cells
                    .iter()
                    .filter_map(|&cell| {
                        board.tile_at(cell).map(|tile| TileSlide {
                            tile,
                            cell,
                            from: release.offset,
                            to,
                        })
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Self {
            cell: release.selected,
            completing: release.should_complete,
            slides,
            started,
            duration,
        }
    }

    /// Cell handed to `shift` at commit.
    #[inline]
    #[must_use]
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// Whether the commit will move tiles.
    #[inline]
    #[must_use]
    pub fn completing(&self) -> bool {
        self.completing
    }

    #[inline]
    #[must_use]
    pub fn slides(&self) -> &[TileSlide] {
        &self.slides
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Instant at which the commit is due.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.started + self.duration
    }

    #[inline]
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Displacement of `tile` at `now`, or `None` if it is not animating.
    #[must_use]
    pub fn offset_at(&self, tile: TileId, now: Instant) -> Option<Offset> {
        let t = ease_out(self.progress(now));
        self.slides
            .iter()
            .find(|s| s.tile == tile)
            .map(|s| s.offset_at_progress(t))
    }

    /// Displacements of every animating tile at `now`.
    #[must_use]
    pub fn offsets_at(&self, now: Instant) -> Vec<TileOffset> {
        let t = ease_out(self.progress(now));
        self.slides
            .iter()
            .map(|s| TileOffset {
                tile: s.tile,
                cell: s.cell,
                offset: s.offset_at_progress(t),
            })
            .collect()
    }
}
