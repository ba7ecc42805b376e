#![forbid(unsafe_code)]

//! Saved-session boundary.
//!
//! A [`PersistedState`] is everything needed to put a board back exactly as
//! it was: its size, the image it shows, how many scramble moves built it,
//! and where every tile sits.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "size": 3,
//!   "image_selector": 0,
//!   "image_mode": "crop",
//!   "random_moves": 15,
//!   "empty_index": 5,
//!   "tile_positions": [0, 1, 2, 3, 4, 8, 6, 7, 5]
//! }
//! ```
//!
//! `tile_positions[tile] = cell`; the last entry is the blank and equals
//! `empty_index`.
//!
//! # Atomic Writes
//!
//! [`PersistedState::save`] writes to a temp file and renames it into place.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{PuzzleError, Result};
use crate::geometry::ImageMode;

/// Current file format version.
pub const FORMAT_VERSION: u32 = 1;

/// Serializable snapshot of a puzzle session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    pub size: usize,
    pub image_selector: u32,
    #[serde(default)]
    pub image_mode: ImageMode,
    pub random_moves: u32,
    pub empty_index: usize,
    pub tile_positions: Vec<usize>,
}

impl PersistedState {
    /// Snapshot `board` along with the settings that produced it.
    #[must_use]
    pub fn capture(
        board: &Board,
        image_selector: u32,
        image_mode: ImageMode,
        random_moves: u32,
    ) -> Self {
        Self {
            version: FORMAT_VERSION,
            size: board.size(),
            image_selector,
            image_mode,
            random_moves,
            empty_index: board.empty(),
            tile_positions: board.tile_positions(),
        }
    }

    /// Validate and rebuild the board. Nothing live is touched.
    pub fn to_board(&self) -> Result<Board> {
        if self.version != FORMAT_VERSION {
            return Err(PuzzleError::corrupt(format!(
                "unsupported version {} (expected {FORMAT_VERSION})",
                self.version
            )));
        }
        let expected = self.size.checked_mul(self.size).ok_or_else(|| {
            PuzzleError::corrupt(format!("size {} overflows", self.size))
        })?;
        if self.tile_positions.len() != expected {
            return Err(PuzzleError::corrupt(format!(
                "tile_positions has {} entries, expected {expected} for size {}",
                self.tile_positions.len(),
                self.size
            )));
        }
        Board::from_positions(self.size, self.empty_index, &self.tile_positions)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot. Structural problems surface as `Json`; the board
    /// itself is checked by [`to_board`](Self::to_board).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write atomically (temp file, then rename). The parent directory must
    /// exist.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, path)?;
        tracing::debug!(path = %path.display(), size = self.size, "session saved");
        Ok(())
    }

    /// Read a snapshot. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        let state = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), size = state.size, "session loaded");
        Ok(Some(state))
    }
}
