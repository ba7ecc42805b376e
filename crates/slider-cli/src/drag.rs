//! Scripted drag: one pointer-down, one move, one release, then the commit.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, ValueEnum};
use slider_core::{Axis, Instant, PointerEvent, Puzzle, PuzzleEvent};

use crate::cli::{check_cell, load_config, restore};
use crate::error::{CliError, Result};
use crate::summary::Summary;

/// Tile edge used for the simulated layout.
const TILE_SIZE: i32 = 100;
const MOVE_AT: Duration = Duration::from_millis(40);

/// How the pointer leaves the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Release {
    /// Quick and still: always completes.
    #[default]
    Tap,
    /// Long and still: completes only past half a tile.
    Slow,
    /// Long but fast toward the empty cell: always completes.
    Fling,
}

impl Release {
    fn elapsed(self) -> Duration {
        match self {
            Self::Tap => Duration::from_millis(80),
            Self::Slow | Self::Fling => Duration::from_millis(600),
        }
    }

    fn speed(self) -> f32 {
        match self {
            Self::Tap | Self::Slow => 0.0,
            Self::Fling => 2000.0,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct DragArgs {
    /// Saved session to start from.
    #[arg(long)]
    pub restore: PathBuf,

    /// Cell the drag starts on.
    #[arg(long)]
    pub cell: usize,

    /// Drag length toward the empty cell, in tiles.
    #[arg(long)]
    pub distance: f32,

    #[arg(long, value_enum, default_value_t = Release::Tap)]
    pub release: Release,

    /// JSON configuration supplying gesture thresholds.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save the session after the commit.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn run_drag(args: DragArgs) -> Result<Summary> {
    if !args.distance.is_finite() {
        return Err(CliError::invalid(format!(
            "distance must be finite, got {}",
            args.distance
        )));
    }
    let mut puzzle = restore(&args.restore, load_config(args.config.as_deref())?)?;
    check_cell(&puzzle, args.cell)?;
    let size = puzzle.board().size() as i32;
    puzzle.layout(size * TILE_SIZE, size * TILE_SIZE);

    let notes = drive(&mut puzzle, args.cell, args.distance, args.release);
    Summary::of(&puzzle)
        .with_notes(notes)
        .save_if(&puzzle, args.save.as_deref())
}

/// Feed the gesture and commit; returns a line per reported event.
fn drive(puzzle: &mut Puzzle, cell: usize, distance: f32, release: Release) -> Vec<String> {
    let grid = *puzzle.grid();
    let half = grid.tile_size() as f32 / 2.0;
    let x = grid.tile_left(cell) as f32 + half;
    let y = grid.tile_top(cell) as f32 + half;

    // Diagonal cells have no line; drag rightward so the sample still flows.
    let (axis, direction) = puzzle
        .board()
        .slide_line(cell)
        .map_or((Axis::Horizontal, 1), |line| (line.axis, line.direction));
    let travel = distance * grid.tile_size() as f32 * direction as f32;
    let (dx, dy) = match axis {
        Axis::Horizontal => (travel, 0.0),
        Axis::Vertical => (0.0, travel),
    };
    let speed = release.speed() * direction as f32;
    let velocity = match axis {
        Axis::Horizontal => (speed, 0.0),
        Axis::Vertical => (0.0, speed),
    };

    let t = Instant::now();
    let mut events = puzzle.handle(&PointerEvent::down(x, y, t));
    events.extend(puzzle.handle(&PointerEvent::moved(x + dx, y + dy, t + MOVE_AT)));
    events.extend(
        puzzle.handle(
            &PointerEvent::up(x + dx, y + dy, t + release.elapsed())
                .with_velocity(velocity.0, velocity.1),
        ),
    );
    let deadline = puzzle.pending().map(|p| p.deadline());
    if let Some(deadline) = deadline {
        events.extend(puzzle.poll(deadline));
    }

    events.iter().filter_map(describe).collect()
}

fn describe(event: &PuzzleEvent) -> Option<String> {
    Some(match event {
        PuzzleEvent::DragStarted { cell } => format!("drag started on cell {cell}"),
        PuzzleEvent::TilesOffset { offsets } => {
            let offset = offsets.first()?.offset;
            format!(
                "{} tile(s) offset by ({}, {})",
                offsets.len(),
                offset.dx,
                offset.dy
            )
        }
        PuzzleEvent::Tapped { cell } => format!("tap on cell {cell}"),
        PuzzleEvent::SlideScheduled {
            completing, after, ..
        } => format!(
            "{} in {}ms",
            if *completing { "completing" } else { "snapping back" },
            after.as_millis()
        ),
        PuzzleEvent::Committed { moved, .. } => {
            format!("committed: {}", if *moved { "moved" } else { "unchanged" })
        }
        PuzzleEvent::Solved => "solved!".to_string(),
    })
}
