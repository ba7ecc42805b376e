#![forbid(unsafe_code)]

//! Puzzle: the single owner of board, gesture and pending animation.
//!
//! [`Puzzle`] is driven from one event loop. Pointer samples go to
//! [`Puzzle::handle`]; the settle timer goes to [`Puzzle::fire_commit`]
//! (one-shot timer hosts) or [`Puzzle::poll`] (tick-driven hosts). Both
//! return [`PuzzleEvent`]s for the host to act on.
//!
//! # Phases
//!
//! ```text
//! Idle ──down──▶ Tracking ──up/cancel──▶ Settling ──commit──▶ Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one [`PendingAnimation`] exists; pointer-downs are ignored
//!    while it does.
//! 2. The board changes only at commit (and at build/restore). Everything a
//!    paint surface sees before that is advisory.
//! 3. After a commit reaches the solved arrangement the puzzle stops
//!    accepting gestures until it is rebuilt.
//! 4. A commit fires at most once per release; extra timer callbacks are
//!    no-ops.
//!
//! # Failure Modes
//!
//! - Invalid configuration and corrupt snapshots are rejected before any
//!   live state changes.
//! - Pointer samples outside the board, on the empty cell, before the first
//!   layout, or while settling are dropped silently.

use std::fmt;

use rand::Rng;
use web_time::Instant;

use crate::animation::PendingAnimation;
use crate::board::{Board, TileId};
use crate::config::PuzzleConfig;
use crate::error::Result;
use crate::event::{PointerEvent, PointerKind, PuzzleEvent};
use crate::geometry::{Grid, Offset, TileRect};
use crate::gesture::{GestureSession, SlideGesture};
use crate::persisted::PersistedState;
use crate::shuffle;

/// Receives notifications a host cares about outside the event stream.
pub trait PuzzleListener {
    /// The board was solved by the last committed move.
    fn on_puzzle_solved(&mut self);

    /// A release qualified as a tap-to-slide.
    fn on_tap(&mut self, _cell: usize) {}
}

impl<F: FnMut()> PuzzleListener for F {
    fn on_puzzle_solved(&mut self) {
        self()
    }
}

/// Interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a pointer-down.
    Idle,
    /// A gesture session is open.
    Tracking,
    /// A released slide is animating toward its commit.
    Settling,
}

/// Where one tile should be drawn right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    pub tile: TileId,
    pub cell: usize,
    pub rect: TileRect,
    pub offset: Offset,
}

pub struct Puzzle {
    config: PuzzleConfig,
    board: Board,
    grid: Grid,
    random_moves_used: u32,
    ready: bool,
    gesture: SlideGesture,
    pending: Option<PendingAnimation>,
    deferred_layout: Option<(i32, i32)>,
    /// Last size the host offered; replayed when the board is replaced.
    requested_layout: Option<(i32, i32)>,
    listener: Option<Box<dyn PuzzleListener>>,
}

impl fmt::Debug for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Puzzle")
            .field("board", &self.board)
            .field("tile_size", &self.grid.tile_size())
            .field("ready", &self.ready)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Puzzle {
    /// Validate `config`, then build and scramble a board.
    pub fn new<R: Rng + ?Sized>(config: PuzzleConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let (board, applied) = shuffle::scrambled(
            config.size,
            config.random_moves,
            config.shuffle_reach,
            rng,
        )?;
        tracing::info!(
            size = config.size,
            random_moves = config.random_moves,
            applied,
            empty = board.empty(),
            "puzzle built"
        );
        Ok(Self::assemble(config, board, applied))
    }

    /// Rebuild a puzzle from a snapshot. `base` supplies everything the
    /// snapshot does not record (thresholds, animation length, reach).
    pub fn restore(state: &PersistedState, base: PuzzleConfig) -> Result<Self> {
        let board = state.to_board()?;
        let config = Self::config_for(state, base);
        config.validate()?;
        tracing::info!(size = state.size, empty = board.empty(), "puzzle restored");
        Ok(Self::assemble(config, board, state.random_moves))
    }

    fn config_for(state: &PersistedState, base: PuzzleConfig) -> PuzzleConfig {
        base.size(state.size)
            .random_moves(state.random_moves)
            .image(state.image_selector, state.image_mode)
    }

    fn assemble(config: PuzzleConfig, board: Board, random_moves_used: u32) -> Self {
        let ready = !board.is_solved() || config.random_moves == 0;
        Self {
            gesture: SlideGesture::new(config.gesture.clone()),
            grid: Grid::new(config.size, 0),
            random_moves_used,
            ready,
            board,
            config,
            pending: None,
            deferred_layout: None,
            requested_layout: None,
            listener: None,
        }
    }

    /// Replace the whole puzzle with a freshly scrambled one. The current
    /// board is kept if `config` is invalid. Any session or pending
    /// animation is discarded; the last `layout` size is applied again.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, config: PuzzleConfig, rng: &mut R) -> Result<()> {
        let fresh = Self::new(config, rng)?;
        self.replace_with(fresh);
        Ok(())
    }

    /// Replace the live board with a snapshot. The snapshot is fully
    /// validated first; on error nothing changes.
    pub fn restore_in_place(&mut self, state: &PersistedState) -> Result<()> {
        let fresh = Self::restore(state, self.config.clone())?;
        self.replace_with(fresh);
        Ok(())
    }

    fn replace_with(&mut self, mut fresh: Self) {
        let requested = self.requested_layout;
        fresh.listener = self.listener.take();
        *self = fresh;
        if let Some((width, height)) = requested {
            self.layout(width, height);
        }
    }

    pub fn set_listener(&mut self, listener: impl PuzzleListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Snapshot for the persisted-state boundary.
    #[must_use]
    pub fn snapshot(&self) -> PersistedState {
        PersistedState::capture(
            &self.board,
            self.config.image_selector,
            self.config.image_mode,
            self.random_moves_used,
        )
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl Puzzle {
    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Accepting gestures: built, not yet solved by play.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&PendingAnimation> {
        self.pending.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.gesture.session()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::Settling
        } else if self.gesture.is_tracking() {
            Phase::Tracking
        } else {
            Phase::Idle
        }
    }

    /// Rectangle and current displacement of every tile.
    ///
    /// The empty cell has no entry. Displacements come from the open
    /// session or the pending animation sampled at `now`.
    #[must_use]
    pub fn tile_layout(&self, now: Instant) -> Vec<TileLayout> {
        let live = match (&self.pending, self.gesture.session()) {
            (Some(pending), _) => pending.offsets_at(now),
            (None, Some(session)) => session.tile_offsets(&self.board),
            (None, None) => Vec::new(),
        };
        self.board
            .tiles()
            .map(|(cell, tile)| TileLayout {
                tile,
                cell,
                rect: self.grid.tile_rect(cell),
                offset: live
                    .iter()
                    .find(|o| o.tile == tile)
                    .map_or(Offset::ZERO, |o| o.offset),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

impl Puzzle {
    /// Size the tiles to the largest square fitting `width × height`.
    ///
    /// While a gesture or settle animation is in flight the new size is held
    /// back and applied once the board is idle again.
    pub fn layout(&mut self, width: i32, height: i32) {
        self.requested_layout = Some((width, height));
        if self.phase() != Phase::Idle {
            self.deferred_layout = Some((width, height));
            return;
        }
        self.grid = Grid::fit(self.config.size, width, height);
        tracing::debug!(tile_size = self.grid.tile_size(), width, height, "layout");
    }

    fn apply_deferred_layout(&mut self) {
        if let Some((width, height)) = self.deferred_layout.take() {
            self.layout(width, height);
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

impl Puzzle {
    /// Feed one pointer sample.
    pub fn handle(&mut self, event: &PointerEvent) -> Vec<PuzzleEvent> {
        match event.kind {
            _ if event.is_release() => self.on_release(event),
            PointerKind::Down => self.on_down(event),
            _ => self.on_move(event),
        }
    }

    fn on_down(&mut self, event: &PointerEvent) -> Vec<PuzzleEvent> {
        if !self.ready || self.phase() != Phase::Idle {
            return Vec::new();
        }
        let (x, y) = event.pixel();
        if event.x < 0.0 || event.y < 0.0 || !self.grid.contains(x, y) {
            return Vec::new();
        }
        let cell = self.grid.index_from_pixel(x, y);
        if cell == self.board.empty() {
            return Vec::new();
        }

        self.gesture.begin(&self.board, &self.grid, cell, event);
        vec![PuzzleEvent::DragStarted { cell }]
    }

    fn on_move(&mut self, event: &PointerEvent) -> Vec<PuzzleEvent> {
        if self.gesture.track(&self.grid, event).is_none() {
            return Vec::new();
        }
        let offsets = self
            .gesture
            .session()
            .map(|s| s.tile_offsets(&self.board))
            .unwrap_or_default();
        if offsets.is_empty() {
            return Vec::new();
        }
        vec![PuzzleEvent::TilesOffset { offsets }]
    }

    fn on_release(&mut self, event: &PointerEvent) -> Vec<PuzzleEvent> {
        let Some(release) = self.gesture.release(event) else {
            return Vec::new();
        };

        let mut events = Vec::with_capacity(2);
        if release.tapped {
            events.push(PuzzleEvent::Tapped {
                cell: release.selected,
            });
            if let Some(listener) = self.listener.as_mut() {
                listener.on_tap(release.selected);
            }
        }

        let pending = PendingAnimation::from_release(
            &release,
            &self.board,
            &self.grid,
            event.time,
            self.config.animation_duration,
        );
        events.push(PuzzleEvent::SlideScheduled {
            cell: pending.cell(),
            completing: pending.completing(),
            after: pending.duration(),
            deadline: pending.deadline(),
        });
        self.pending = Some(pending);
        events
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

impl Puzzle {
    /// Commit the pending slide now. Without one this is a no-op.
    pub fn fire_commit(&mut self) -> Vec<PuzzleEvent> {
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };
        let cell = pending.cell();
        let _span =
            tracing::debug_span!("commit", cell, completing = pending.completing()).entered();

        let moved = pending.completing() && self.board.shift(cell).is_moved();
        let mut events = vec![PuzzleEvent::Committed { cell, moved }];

        if moved && self.board.is_solved() {
            self.ready = false;
            tracing::info!("puzzle solved");
            events.push(PuzzleEvent::Solved);
            if let Some(listener) = self.listener.as_mut() {
                listener.on_puzzle_solved();
            }
        }

        self.apply_deferred_layout();
        events
    }

    /// Commit the pending slide if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Vec<PuzzleEvent> {
        match &self.pending {
            Some(pending) if pending.is_due(now) => self.fire_commit(),
            _ => Vec::new(),
        }
    }

    /// Move without a gesture (keyboard, scripted play). Ignored unless idle
    /// and ready. Returns the same events a completed gesture commit would.
    pub fn shift(&mut self, cell: usize) -> Vec<PuzzleEvent> {
        if !self.ready || self.phase() != Phase::Idle {
            return Vec::new();
        }
        let moved = self.board.shift(cell).is_moved();
        let mut events = vec![PuzzleEvent::Committed { cell, moved }];
        if moved && self.board.is_solved() {
            self.ready = false;
            events.push(PuzzleEvent::Solved);
            if let Some(listener) = self.listener.as_mut() {
                listener.on_puzzle_solved();
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::error::PuzzleError;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_100: Duration = Duration::from_millis(100);

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    /// 3x3 puzzle one move from solved (tile 7 at cell 8, empty at 7),
    /// laid out with 100px tiles.
    fn near_solved() -> Puzzle {
        let mut board = Board::solved(3).unwrap();
        let _ = board.shift(7);
        let state = PersistedState::capture(&board, 0, Default::default(), 1);
        let mut puzzle = Puzzle::restore(&state, PuzzleConfig::default()).unwrap();
        puzzle.layout(300, 300);
        puzzle
    }

    fn solved_counter(puzzle: &mut Puzzle) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        puzzle.set_listener(move || c.set(c.get() + 1));
        count
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = Puzzle::new(PuzzleConfig::default().size(1), &mut rng()).unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidConfiguration { .. }));
    }

    #[test]
    fn new_builds_ready_scrambled_board() {
        let puzzle = Puzzle::new(PuzzleConfig::default(), &mut rng()).unwrap();
        assert!(puzzle.is_ready());
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.phase(), Phase::Idle);
    }

    #[test]
    fn down_before_layout_is_ignored() {
        let mut puzzle = Puzzle::new(PuzzleConfig::default(), &mut rng()).unwrap();
        let events = puzzle.handle(&PointerEvent::down(10.0, 10.0, Instant::now()));
        assert!(events.is_empty());
        assert_eq!(puzzle.phase(), Phase::Idle);
    }

    #[test]
    fn down_on_empty_or_outside_is_ignored() {
        let mut puzzle = near_solved();
        let t = Instant::now();
        assert!(puzzle.handle(&PointerEvent::down(150.0, 250.0, t)).is_empty());
        assert!(puzzle.handle(&PointerEvent::down(350.0, 50.0, t)).is_empty());
        assert!(puzzle.handle(&PointerEvent::down(-3.0, 50.0, t)).is_empty());
        assert_eq!(puzzle.phase(), Phase::Idle);
    }

    #[test]
    fn tap_commits_after_animation_and_reports_solved() {
        let mut puzzle = near_solved();
        let solved = solved_counter(&mut puzzle);
        let t = Instant::now();

        let events = puzzle.handle(&PointerEvent::down(250.0, 250.0, t));
        assert_eq!(events, vec![PuzzleEvent::DragStarted { cell: 8 }]);
        assert_eq!(puzzle.phase(), Phase::Tracking);

        let events = puzzle.handle(&PointerEvent::up(250.0, 250.0, t + MS_50));
        assert!(events.contains(&PuzzleEvent::Tapped { cell: 8 }));
        assert!(matches!(
            events.last(),
            Some(PuzzleEvent::SlideScheduled {
                cell: 8,
                completing: true,
                ..
            })
        ));
        assert_eq!(puzzle.phase(), Phase::Settling);
        // Not authoritative yet.
        assert_eq!(puzzle.board().empty(), 7);

        assert!(puzzle.poll(t + MS_50 + Duration::from_millis(10)).is_empty());
        let events = puzzle.poll(t + MS_50 + MS_100);
        assert_eq!(
            events,
            vec![
                PuzzleEvent::Committed {
                    cell: 8,
                    moved: true
                },
                PuzzleEvent::Solved
            ]
        );
        assert_eq!(puzzle.board().empty(), 8);
        assert!(!puzzle.is_ready());
        assert_eq!(solved.get(), 1);
        assert_eq!(puzzle.phase(), Phase::Idle);
    }

    #[test]
    fn gestures_blocked_while_settling_and_after_solve() {
        let mut puzzle = near_solved();
        let t = Instant::now();
        puzzle.handle(&PointerEvent::down(250.0, 250.0, t));
        puzzle.handle(&PointerEvent::up(250.0, 250.0, t + MS_50));

        assert!(puzzle.handle(&PointerEvent::down(50.0, 250.0, t + MS_50)).is_empty());
        assert_eq!(puzzle.phase(), Phase::Settling);

        puzzle.fire_commit();
        assert!(puzzle.handle(&PointerEvent::down(50.0, 250.0, t + MS_100)).is_empty());
    }

    #[test]
    fn snap_back_commit_leaves_board() {
        let mut puzzle = near_solved();
        let t = Instant::now();
        puzzle.handle(&PointerEvent::down(50.0, 250.0, t)); // cell 6, line 6
        puzzle.handle(&PointerEvent::moved(70.0, 250.0, t + MS_50));
        let events = puzzle.handle(
            &PointerEvent::up(70.0, 250.0, t + Duration::from_millis(600)).with_velocity(0.0, 0.0),
        );
        assert!(matches!(
            events.as_slice(),
            [PuzzleEvent::SlideScheduled {
                completing: false,
                ..
            }]
        ));
        let before = puzzle.board().clone();
        let events = puzzle.fire_commit();
        assert_eq!(
            events,
            vec![PuzzleEvent::Committed {
                cell: 6,
                moved: false
            }]
        );
        assert_eq!(puzzle.board(), &before);
        assert!(puzzle.is_ready());
    }

    #[test]
    fn extra_commit_is_noop() {
        let mut puzzle = near_solved();
        let t = Instant::now();
        puzzle.handle(&PointerEvent::down(50.0, 250.0, t));
        puzzle.handle(&PointerEvent::up(50.0, 250.0, t + MS_50));
        assert!(!puzzle.fire_commit().is_empty());
        assert!(puzzle.fire_commit().is_empty());
        assert!(puzzle.poll(t + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn multi_tile_drag_commits_line_shift() {
        let mut puzzle = near_solved();
        let t = Instant::now();
        // Cell 6 with empty at 7: one tile. Move empty to 6 first via shift.
        puzzle.shift(6);
        assert_eq!(puzzle.board().empty(), 6);
        // Now drag cell 8 leftward: line 8,7.
        puzzle.handle(&PointerEvent::down(250.0, 250.0, t));
        let events = puzzle.handle(&PointerEvent::moved(180.0, 250.0, t + MS_50));
        match &events[..] {
            [PuzzleEvent::TilesOffset { offsets }] => {
                assert_eq!(offsets.len(), 2);
                assert!(offsets.iter().all(|o| o.offset == Offset::new(-70, 0)));
            }
            other => panic!("unexpected events {other:?}"),
        }
        puzzle.handle(&PointerEvent::up(180.0, 250.0, t + MS_100));
        puzzle.fire_commit();
        assert_eq!(puzzle.board().empty(), 8);
        assert!(puzzle.board().is_consistent());
    }

    #[test]
    fn tile_layout_reports_live_offsets() {
        let mut puzzle = near_solved();
        let t = Instant::now();
        puzzle.handle(&PointerEvent::down(250.0, 250.0, t));
        puzzle.handle(&PointerEvent::moved(220.0, 250.0, t + MS_50));
        let layout = puzzle.tile_layout(t + MS_50);
        assert_eq!(layout.len(), 8);
        let moving = layout.iter().find(|l| l.cell == 8).unwrap();
        assert_eq!(moving.tile, TileId::new(7));
        assert_eq!(moving.rect, TileRect::new(200, 200, 100));
        assert_eq!(moving.offset, Offset::new(-30, 0));
        assert!(
            layout
                .iter()
                .filter(|l| l.cell != 8)
                .all(|l| l.offset == Offset::ZERO)
        );
    }

    #[test]
    fn layout_deferred_while_tracking() {
        let mut puzzle = near_solved();
        let t = Instant::now();
        puzzle.handle(&PointerEvent::down(250.0, 250.0, t));
        puzzle.layout(600, 600);
        assert_eq!(puzzle.grid().tile_size(), 100);
        puzzle.handle(&PointerEvent::up(250.0, 250.0, t + MS_50));
        puzzle.fire_commit();
        assert_eq!(puzzle.grid().tile_size(), 200);
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let puzzle = Puzzle::new(PuzzleConfig::default().size(4), &mut rng()).unwrap();
        let state = puzzle.snapshot();
        assert_eq!(state.tile_positions.len(), 16);
        let restored = Puzzle::restore(&state, PuzzleConfig::default()).unwrap();
        assert_eq!(restored.board(), puzzle.board());
        assert_eq!(restored.config().size, 4);
        assert!(restored.is_ready());
    }

    #[test]
    fn restore_in_place_rejects_corrupt_without_mutation() {
        let mut puzzle = near_solved();
        let before = puzzle.board().clone();
        let mut state = puzzle.snapshot();
        state.tile_positions.truncate(4);
        let err = puzzle.restore_in_place(&state).unwrap_err();
        assert!(matches!(err, PuzzleError::CorruptState { .. }));
        assert_eq!(puzzle.board(), &before);
        assert_eq!(puzzle.grid().tile_size(), 100);
    }

    #[test]
    fn restoring_solved_board_is_not_ready() {
        let board = Board::solved(3).unwrap();
        let state = PersistedState::capture(&board, 0, Default::default(), 15);
        let puzzle = Puzzle::restore(&state, PuzzleConfig::default()).unwrap();
        assert!(!puzzle.is_ready());
    }

    #[test]
    fn rebuild_keeps_listener_and_layout() {
        let mut puzzle = near_solved();
        let solved = solved_counter(&mut puzzle);
        puzzle
            .rebuild(PuzzleConfig::default().random_moves(0), &mut rng())
            .unwrap();
        assert_eq!(puzzle.grid().tile_size(), 100);
        assert!(puzzle.is_solved());
        // A zero-move board is playable: slide away and back.
        puzzle.shift(7);
        let events = puzzle.shift(8);
        assert!(events.contains(&PuzzleEvent::Solved));
        assert_eq!(solved.get(), 1);
    }

    #[test]
    fn rebuild_to_new_size_refits_requested_layout() {
        let mut puzzle = Puzzle::new(PuzzleConfig::default(), &mut rng()).unwrap();
        puzzle.layout(320, 320);
        assert_eq!(puzzle.grid().tile_size(), 106);

        puzzle
            .rebuild(PuzzleConfig::default().size(2), &mut rng())
            .unwrap();
        let mut fresh = Puzzle::new(PuzzleConfig::default().size(2), &mut rng()).unwrap();
        fresh.layout(320, 320);
        assert_eq!(puzzle.grid().tile_size(), 160);
        assert_eq!(puzzle.grid(), fresh.grid());
    }

    #[test]
    fn restore_in_place_to_new_size_refits_requested_layout() {
        let mut puzzle = near_solved();
        puzzle.layout(320, 320);
        let other = Puzzle::new(PuzzleConfig::default().size(4), &mut rng()).unwrap();
        puzzle.restore_in_place(&other.snapshot()).unwrap();
        assert_eq!(puzzle.config().size, 4);
        assert_eq!(puzzle.grid().tile_size(), 80);
    }

    #[test]
    fn layout_offered_while_tracking_survives_rebuild() {
        let mut puzzle = near_solved();
        let t = Instant::now();
        puzzle.handle(&PointerEvent::down(250.0, 250.0, t));
        puzzle.layout(600, 600);
        puzzle
            .rebuild(PuzzleConfig::default().size(2), &mut rng())
            .unwrap();
        assert_eq!(puzzle.phase(), Phase::Idle);
        assert_eq!(puzzle.grid().tile_size(), 300);
    }

    #[test]
    fn snapshot_reports_moves_actually_applied() {
        // The 2x2 walk returns home after 12 moves, forcing one extra.
        let puzzle = Puzzle::new(PuzzleConfig::default().size(2).random_moves(12), &mut rng())
            .unwrap();
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.config().random_moves, 12);
        assert_eq!(puzzle.snapshot().random_moves, 13);

        let puzzle = Puzzle::new(PuzzleConfig::default().random_moves(9), &mut rng()).unwrap();
        assert_eq!(puzzle.snapshot().random_moves, 9);
    }

    #[test]
    fn rebuild_with_invalid_config_keeps_board() {
        let mut puzzle = near_solved();
        let before = puzzle.board().clone();
        assert!(
            puzzle
                .rebuild(PuzzleConfig::default().size(0), &mut rng())
                .is_err()
        );
        assert_eq!(puzzle.board(), &before);
    }
}
