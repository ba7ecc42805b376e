//! What every subcommand prints: the board after the step, plus notes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use slider_core::Puzzle;

use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub size: usize,
    pub empty: usize,
    pub solved: bool,
    pub ready: bool,
    /// Tile home index per cell; `null` for the blank.
    pub cells: Vec<Option<usize>>,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
    #[serde(skip)]
    board: String,
}

impl Summary {
    #[must_use]
    pub fn of(puzzle: &Puzzle) -> Self {
        let board = puzzle.board();
        Self {
            size: board.size(),
            empty: board.empty(),
            solved: board.is_solved(),
            ready: puzzle.is_ready(),
            cells: (0..board.cell_count())
                .map(|c| board.tile_at(c).map(|t| t.home()))
                .collect(),
            notes: Vec::new(),
            saved_to: None,
            board: board.to_string(),
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl IntoIterator<Item = String>) -> Self {
        self.notes.extend(notes);
        self
    }

    /// Save the puzzle's snapshot to `path` when one is given.
    pub fn save_if(mut self, puzzle: &Puzzle, path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            puzzle.snapshot().save(path)?;
            self.saved_to = Some(path.to_path_buf());
        }
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board)?;
        for note in &self.notes {
            writeln!(f, "{note}")?;
        }
        write!(
            f,
            "{0}x{0} empty={1} solved={2}",
            self.size, self.empty, self.solved
        )?;
        if let Some(path) = &self.saved_to {
            write!(f, "\nsaved to {}", path.display())?;
        }
        Ok(())
    }
}
