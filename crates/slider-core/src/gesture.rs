#![forbid(unsafe_code)]

//! Slide gesture recognition: pointer samples → drag offsets → completion.
//!
//! [`SlideGesture`] turns one pointer-down → move* → up/cancel cycle on a
//! tile into live pixel offsets for the line of tiles between that tile and
//! the empty slot, and finally into a [`GestureRelease`] that says whether
//! the slide should complete or snap back.
//!
//! # State Machine
//!
//! ```text
//! Idle ──down──▶ Tracking ──move──▶ Tracking
//!                   │
//!                   └──up/cancel──▶ (release decided) ──▶ Idle
//! ```
//!
//! The puzzle adds a `Settling` phase around this while the settle animation
//! runs; see [`Puzzle`](crate::puzzle::Puzzle).
//!
//! # Completion rules
//!
//! - **Drag distance**: each move sample sets `should_complete` to whether
//!   the line has travelled more than half a tile toward the empty slot.
//! - **Tap**: a release slower than `tap_velocity_max` within
//!   `tap_max_duration` of the down always completes.
//! - **Fling**: otherwise a release faster than `fling_velocity` completes;
//!   a slower one keeps the drag-distance decision.
//!
//! # Invariants
//!
//! 1. The live offset is along the session's axis only.
//! 2. Its magnitude never exceeds one tile; motion away from the empty slot
//!    pins the line at its home position.
//! 3. Cancel is decided exactly like release.
//! 4. A tile sharing neither row nor column with the empty slot opens a
//!    session that never produces offsets.

use web_time::Instant;

use crate::board::{Board, SlideLine};
use crate::config::SlideGestureConfig;
use crate::event::{PointerEvent, TileOffset};
use crate::geometry::{Grid, Offset};
use crate::velocity::VelocityTracker;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Where the pointer first landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Board coordinates of the pointer-down.
    pub x: f32,
    pub y: f32,
    /// Pointer position relative to the touched tile's top-left corner.
    pub within_tile: (i32, i32),
}

/// State of one pointer-down-to-up cycle.
#[derive(Debug, Clone)]
pub struct GestureSession {
    selected: usize,
    line: Option<SlideLine>,
    anchor: Anchor,
    started: Instant,
    current_offset: Offset,
    should_complete: bool,
    tracker: VelocityTracker,
}

impl GestureSession {
    /// Cell of the tile under the initial touch.
    #[inline]
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Tiles this gesture moves, if the touched tile is in line with the
    /// empty slot.
    #[inline]
    #[must_use]
    pub fn line(&self) -> Option<&SlideLine> {
        self.line.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Live displacement applied to every tile in the line.
    #[inline]
    #[must_use]
    pub fn current_offset(&self) -> Offset {
        self.current_offset
    }

    /// Drag-distance decision as of the last move sample.
    #[inline]
    #[must_use]
    pub fn should_complete(&self) -> bool {
        self.should_complete
    }

    /// Offsets for every tile in the line at the current displacement.
    #[must_use]
    pub fn tile_offsets(&self, board: &Board) -> Vec<TileOffset> {
        let Some(line) = &self.line else {
            return Vec::new();
        };
        line.cells
            .iter()
            .filter_map(|&cell| {
                board.tile_at(cell).map(|tile| TileOffset {
                    tile,
                    cell,
                    offset: self.current_offset,
                })
            })
            .collect()
    }
}

/// Outcome of a finished gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureRelease {
    /// Cell of the tile the gesture started on.
    pub selected: usize,
    /// Line of tiles that was dragged, if any.
    pub line: Option<SlideLine>,
    /// Displacement at release; the settle animation starts here.
    pub offset: Offset,
    /// Commit the slide (`true`) or snap back (`false`).
    pub should_complete: bool,
    /// The release qualified as a tap.
    pub tapped: bool,
    /// Release speed in px/s.
    pub speed: f32,
}

// ---------------------------------------------------------------------------
// Recognizer
// ---------------------------------------------------------------------------

/// Gesture state machine for one board.
///
/// The caller is responsible for the entry guard (board ready, nothing
/// settling, pointer over an occupied in-bounds cell); `begin` assumes it
/// holds.
#[derive(Debug, Clone)]
pub struct SlideGesture {
    config: SlideGestureConfig,
    session: Option<GestureSession>,
}

impl SlideGesture {
    #[must_use]
    pub fn new(config: SlideGestureConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SlideGestureConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Open a session on `cell` (Idle → Tracking).
    pub fn begin(&mut self, board: &Board, grid: &Grid, cell: usize, event: &PointerEvent) {
        let (x, y) = event.pixel();
        let within_tile = (x - grid.tile_left(cell), y - grid.tile_top(cell));

        let mut tracker = VelocityTracker::new(self.config.velocity_window);
        tracker.add(event.x, event.y, event.time);

        let line = board.slide_line(cell);
        tracing::debug!(
            cell,
            empty = board.empty(),
            axis = ?line.as_ref().map(|l| l.axis),
            "gesture begin"
        );

        self.session = Some(GestureSession {
            selected: cell,
            line,
            anchor: Anchor {
                x: event.x,
                y: event.y,
                within_tile,
            },
            started: event.time,
            current_offset: Offset::ZERO,
            should_complete: false,
            tracker,
        });
    }

    /// Apply a move sample (Tracking → Tracking).
    ///
    /// Returns the new live offset, or `None` when there is no session.
    pub fn track(&mut self, grid: &Grid, event: &PointerEvent) -> Option<Offset> {
        let session = self.session.as_mut()?;
        session.tracker.add(event.x, event.y, event.time);

        let Some(line) = &session.line else {
            return Some(Offset::ZERO);
        };

        let tile = grid.tile_size();
        let delta = line.axis.component((
            event.x - session.anchor.x,
            event.y - session.anchor.y,
        ));
        let toward_empty = delta * line.direction as f32;

        // Clamp before leaving float space: off-board and non-finite samples
        // stay within one tile, and NaN fails the comparison.
        let travel = if toward_empty > 0.0 {
            toward_empty.min(tile as f32) as i32
        } else {
            0
        };
        session.should_complete = travel > tile / 2;
        session.current_offset = line.axis.displacement(travel * line.direction);

        tracing::trace!(
            cell = session.selected,
            travel,
            should_complete = session.should_complete,
            "gesture move"
        );
        Some(session.current_offset)
    }

    /// End the session (Tracking → Idle) and decide completion.
    pub fn release(&mut self, event: &PointerEvent) -> Option<GestureRelease> {
        let session = self.session.take()?;

        let speed = match event.velocity {
            Some((vx, vy)) => vx.hypot(vy),
            None => session.tracker.speed(),
        };
        let elapsed = event.time.saturating_duration_since(session.started);

        let mut should_complete = session.should_complete;
        let tapped =
            speed < self.config.tap_velocity_max && elapsed < self.config.tap_max_duration;
        if tapped {
            should_complete = true;
        } else {
            should_complete |= speed > self.config.fling_velocity;
        }

        tracing::debug!(
            cell = session.selected,
            speed,
            elapsed_ms = elapsed.as_millis() as u64,
            tapped,
            should_complete,
            cancelled = matches!(event.kind, crate::event::PointerKind::Cancel),
            "gesture release"
        );

        Some(GestureRelease {
            selected: session.selected,
            line: session.line,
            offset: session.current_offset,
            should_complete,
            tapped,
            speed,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
