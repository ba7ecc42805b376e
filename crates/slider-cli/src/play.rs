use std::path::PathBuf;

use clap::Args;
use slider_core::{PuzzleConfig, PuzzleEvent};

use crate::cli::{check_cell, restore};
use crate::error::Result;
use crate::summary::Summary;

#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    /// Saved session to start from.
    #[arg(long)]
    pub restore: PathBuf,

    /// Save the session after the moves.
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Cells to shift, in order.
    #[arg(required = true)]
    pub cells: Vec<usize>,
}

pub fn run_play(args: PlayArgs) -> Result<Summary> {
    let mut puzzle = restore(&args.restore, PuzzleConfig::default())?;
    for &cell in &args.cells {
        check_cell(&puzzle, cell)?;
    }

    let mut notes = Vec::with_capacity(args.cells.len());
    for &cell in &args.cells {
        if !puzzle.is_ready() {
            notes.push(format!("shift {cell}: ignored, puzzle already solved"));
            continue;
        }
        for event in puzzle.shift(cell) {
            match event {
                PuzzleEvent::Committed { moved: true, .. } => {
                    notes.push(format!("shift {cell}: moved"));
                }
                PuzzleEvent::Committed { moved: false, .. } => {
                    notes.push(format!("shift {cell}: not in line with the empty cell"));
                }
                PuzzleEvent::Solved => notes.push("solved!".to_string()),
                _ => {}
            }
        }
    }

    Summary::of(&puzzle)
        .with_notes(notes)
        .save_if(&puzzle, args.save.as_deref())
}

#[cfg(test)]
mod tests {
    use slider_core::{Board, PersistedState};

    use super::*;
    use crate::error::CliError;

    /// Session one move from solved: tile 7 at cell 8, empty at 7.
    fn near_solved(dir: &tempfile::TempDir) -> PathBuf {
        let mut board = Board::solved(3).unwrap();
        let _ = board.shift(7);
        let path = dir.path().join("session.json");
        PersistedState::capture(&board, 0, Default::default(), 1)
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn winning_move_reports_solved() {
        let dir = tempfile::tempdir().unwrap();
        let path = near_solved(&dir);
        let summary = run_play(PlayArgs {
            restore: path,
            save: None,
            cells: vec![8],
        })
        .unwrap();
        assert!(summary.solved);
        assert!(!summary.ready);
        assert_eq!(summary.notes, vec!["shift 8: moved", "solved!"]);
    }

    #[test]
    fn moves_after_solve_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = near_solved(&dir);
        let summary = run_play(PlayArgs {
            restore: path,
            save: None,
            cells: vec![8, 5],
        })
        .unwrap();
        assert!(summary.solved);
        assert_eq!(summary.notes.len(), 3);
        assert_eq!(summary.empty, 8);
    }

    #[test]
    fn diagonal_cell_does_not_move() {
        let dir = tempfile::tempdir().unwrap();
        let path = near_solved(&dir);
        let summary = run_play(PlayArgs {
            restore: path,
            save: None,
            cells: vec![0],
        })
        .unwrap();
        assert_eq!(summary.empty, 7);
        assert_eq!(
            summary.notes,
            vec!["shift 0: not in line with the empty cell"]
        );
    }

    #[test]
    fn out_of_range_cell_rejected_before_any_move() {
        let dir = tempfile::tempdir().unwrap();
        let path = near_solved(&dir);
        let error = run_play(PlayArgs {
            restore: path.clone(),
            save: Some(path.clone()),
            cells: vec![8, 9],
        })
        .unwrap_err();
        assert!(matches!(error, CliError::InvalidArgument { .. }));
        let state = PersistedState::load(&path).unwrap().unwrap();
        assert_eq!(state.empty_index, 7);
    }

    #[test]
    fn corrupt_session_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"version":1,"size":3,"image_selector":0,"random_moves":1,
                "empty_index":8,"tile_positions":[0,1,2]}"#,
        )
        .unwrap();
        let error = run_play(PlayArgs {
            restore: path,
            save: None,
            cells: vec![7],
        })
        .unwrap_err();
        assert_eq!(error.exit_code(), 2);
    }
}
