#![forbid(unsafe_code)]

//! Board model: tile permutation, empty slot, solved check, line shift.
//!
//! A [`Board`] owns an `N × N` arrangement with exactly one empty cell. Tiles
//! are plain [`TileId`] values (the tile's home cell), so the board carries no
//! reference to anything that draws them.
//!
//! # Invariants
//!
//! 1. Exactly one cell is empty and it is the cell recorded by [`Board::empty`].
//! 2. Every tile identity `0..N²-1` appears in exactly one occupied cell.
//! 3. [`Board::shift`] is the only mutator after construction.
//! 4. The parity of the arrangement (treating the blank as tile `N²-1`) equals
//!    the parity of the blank's taxicab distance from its home cell. Every
//!    `shift` preserves this, so every board reachable by play satisfies it.
//!
//! # Failure Modes
//!
//! - `size < 2` is rejected at construction (`InvalidConfiguration`).
//! - Position tables that are not a permutation of the cells are rejected by
//!   [`Board::from_positions`] (`CorruptState`) before a board exists.
//! - `shift` to a cell sharing neither row nor column with the empty slot, to
//!   the empty slot itself, or past the last cell is a no-op.

use std::fmt;

use crate::error::{PuzzleError, Result};
use crate::geometry::{Axis, Grid};

/// Identity of a tile: the cell index it occupies on a solved board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(usize);

impl TileId {
    #[inline]
    #[must_use]
    pub const fn new(home: usize) -> Self {
        Self(home)
    }

    /// Cell this tile occupies when the puzzle is solved.
    #[inline]
    #[must_use]
    pub const fn home(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// Result of [`Board::shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ShiftOutcome {
    /// `distance` tiles moved one cell each; the empty slot is now the target.
    Moved { distance: usize },
    /// Nothing changed.
    NotMoved,
}

impl ShiftOutcome {
    #[inline]
    #[must_use]
    pub const fn is_moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// The tiles a gesture on one cell would push toward the empty slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLine {
    /// Axis the tiles travel along.
    pub axis: Axis,
    /// `+1` when the tiles travel right/down, `-1` when left/up.
    pub direction: i32,
    /// Cells from the touched cell up to (not including) the empty slot.
    pub cells: Vec<usize>,
}

impl SlideLine {
    /// The cell the gesture started on, if the line has any cells.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Option<usize> {
        self.cells.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Sliding-tile board.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    cells: Vec<Option<TileId>>,
    empty: usize,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size())
            .field("empty", &self.empty)
            .field("solved", &self.is_solved())
            .finish()
    }
}

/// Smallest board that has a move.
pub const MIN_SIZE: usize = 2;

fn check_size(size: usize) -> Result<()> {
    if size < MIN_SIZE {
        return Err(PuzzleError::invalid(format!(
            "board size must be at least {MIN_SIZE}, got {size}"
        )));
    }
    if size.checked_mul(size).is_none() {
        return Err(PuzzleError::invalid(format!("board size {size} overflows")));
    }
    Ok(())
}

impl Board {
    /// Solved board of the given size: tile `i` at cell `i`, empty at the
    /// last cell.
    pub fn solved(size: usize) -> Result<Self> {
        check_size(size)?;
        let count = size * size;
        let mut cells: Vec<Option<TileId>> = (0..count).map(|i| Some(TileId(i))).collect();
        cells[count - 1] = None;
        Ok(Self {
            grid: Grid::new(size, 0),
            cells,
            empty: count - 1,
        })
    }

    /// Rebuild a board from `positions[tile] = cell`.
    ///
    /// `positions` has `size²` entries; the last one is the cell of the blank
    /// and must equal `empty`. Everything is validated before the board is
    /// built.
    pub fn from_positions(size: usize, empty: usize, positions: &[usize]) -> Result<Self> {
        check_size(size).map_err(|e| PuzzleError::corrupt(e.to_string()))?;
        let count = size * size;
        if positions.len() != count {
            return Err(PuzzleError::corrupt(format!(
                "tile_positions has {} entries, expected {count}",
                positions.len()
            )));
        }
        if empty >= count {
            return Err(PuzzleError::corrupt(format!(
                "empty index {empty} out of range for {count} cells"
            )));
        }
        if positions[count - 1] != empty {
            return Err(PuzzleError::corrupt(format!(
                "blank recorded at cell {} but empty index is {empty}",
                positions[count - 1]
            )));
        }

        let mut cells: Vec<Option<TileId>> = vec![None; count];
        let mut seen = vec![false; count];
        for (tile, &cell) in positions.iter().enumerate() {
            if cell >= count {
                return Err(PuzzleError::corrupt(format!(
                    "tile {tile} placed at cell {cell}, outside the board"
                )));
            }
            if std::mem::replace(&mut seen[cell], true) {
                return Err(PuzzleError::corrupt(format!(
                    "cell {cell} holds more than one tile"
                )));
            }
            if tile != count - 1 {
                cells[cell] = Some(TileId(tile));
            }
        }

        Ok(Self {
            grid: Grid::new(size, 0),
            cells,
            empty,
        })
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Number of cells, `size²`.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.grid.cell_count()
    }

    /// Cell currently holding no tile.
    #[inline]
    #[must_use]
    pub fn empty(&self) -> usize {
        self.empty
    }

    /// Tile at `cell`, `None` for the empty slot or an out-of-range cell.
    #[inline]
    #[must_use]
    pub fn tile_at(&self, cell: usize) -> Option<TileId> {
        self.cells.get(cell).copied().flatten()
    }

    /// Current cell of `tile`.
    #[must_use]
    pub fn cell_of(&self, tile: TileId) -> Option<usize> {
        self.cells.iter().position(|c| *c == Some(tile))
    }

    /// Occupied cells with their tiles, in cell order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, TileId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(cell, tile)| tile.map(|t| (cell, t)))
    }

    /// Inverse arrangement: `positions[tile] = cell`, with the blank as the
    /// last entry.
    #[must_use]
    pub fn tile_positions(&self) -> Vec<usize> {
        let mut positions = vec![0; self.cells.len()];
        for (cell, tile) in self.tiles() {
            positions[tile.home()] = cell;
        }
        positions[self.cells.len() - 1] = self.empty;
        positions
    }

    /// True when every tile sits on its home cell.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.tiles().all(|(cell, tile)| tile.home() == cell)
    }

    /// The line of tiles between `index` and the empty slot, or `None` when
    /// `index` is the empty slot or shares neither row nor column with it.
    #[must_use]
    pub fn slide_line(&self, index: usize) -> Option<SlideLine> {
        let (axis, step) = self.line_step(index)?;
        let direction = if self.empty > index { 1 } else { -1 };
        let mut cells = Vec::new();
        let mut cell = index;
        while cell != self.empty {
            cells.push(cell);
            cell = if direction > 0 { cell + step } else { cell - step };
        }
        Some(SlideLine {
            axis,
            direction,
            cells,
        })
    }

    /// Slide every tile between the empty slot and `target` one cell toward
    /// the empty slot; `target` becomes the empty slot.
    ///
    /// Handles both a single-tile move (target adjacent to the blank) and a
    /// multi-tile shove. Targets sharing neither row nor column with the
    /// blank are ignored.
    pub fn shift(&mut self, target: usize) -> ShiftOutcome {
        let Some((axis, step)) = self.line_step(target) else {
            return ShiftOutcome::NotMoved;
        };

        let mut distance = 0;
        let mut cell = self.empty;
        while cell != target {
            let next = if target > cell { cell + step } else { cell - step };
            self.cells.swap(cell, next);
            cell = next;
            distance += 1;
        }
        self.empty = target;

        tracing::trace!(cell = target, distance, ?axis, "shift");
        ShiftOutcome::Moved { distance }
    }

    fn line_step(&self, index: usize) -> Option<(Axis, usize)> {
        if index >= self.cells.len() || index == self.empty {
            return None;
        }
        if self.grid.same_column(index, self.empty) {
            Some((Axis::Vertical, self.size()))
        } else if self.grid.same_row(index, self.empty) {
            Some((Axis::Horizontal, 1))
        } else {
            None
        }
    }

    /// Structural check: one blank at `empty`, each tile exactly once.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let count = self.cells.len();
        let mut seen = vec![false; count - 1];
        for (cell, slot) in self.cells.iter().enumerate() {
            match slot {
                None if cell == self.empty => {}
                None => return false,
                Some(_) if cell == self.empty => return false,
                Some(tile) => {
                    let home = tile.home();
                    if home >= count - 1 || std::mem::replace(&mut seen[home], true) {
                        return false;
                    }
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Whether this arrangement is reachable from the solved board by play.
    ///
    /// Compares the permutation parity (blank counted as tile `N²-1`) with
    /// the parity of the blank's taxicab distance from home.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        let count = self.cells.len();
        let homes: Vec<usize> = self
            .cells
            .iter()
            .map(|slot| slot.map_or(count - 1, TileId::home))
            .collect();

        let mut visited = vec![false; count];
        let mut transpositions = 0usize;
        for start in 0..count {
            if visited[start] {
                continue;
            }
            let mut len = 0usize;
            let mut i = start;
            while !visited[i] {
                visited[i] = true;
                i = homes[i];
                len += 1;
            }
            transpositions += len - 1;
        }

        let home = count - 1;
        let distance = self.grid.row(self.empty).abs_diff(self.grid.row(home))
            + self.grid.column(self.empty).abs_diff(self.grid.column(home));
        transpositions % 2 == distance % 2
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cells.len().to_string().len();
        for row in 0..self.size() {
            for col in 0..self.size() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match self.tile_at(self.grid.index_from_col_row(col, row)) {
                    Some(tile) => write!(f, "{tile:>width$}")?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrangement(board: &Board) -> Vec<Option<usize>> {
        (0..board.cell_count())
            .map(|c| board.tile_at(c).map(TileId::home))
            .collect()
    }

    #[test]
    fn solved_board_layout() {
        let board = Board::solved(3).unwrap();
        assert_eq!(board.empty(), 8);
        assert!(board.is_solved());
        assert!(board.is_consistent());
        assert!(board.is_reachable());
        assert_eq!(board.tile_at(8), None);
        assert_eq!(board.tile_at(4), Some(TileId::new(4)));
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(matches!(
            Board::solved(1),
            Err(PuzzleError::InvalidConfiguration { .. })
        ));
        assert!(Board::solved(0).is_err());
        assert!(Board::solved(2).is_ok());
    }

    #[test]
    fn shift_single_tile_in_column() {
        let mut board = Board::solved(3).unwrap();
        assert_eq!(board.shift(5), ShiftOutcome::Moved { distance: 1 });
        assert_eq!(board.empty(), 5);
        assert_eq!(board.tile_at(8), Some(TileId::new(5)));
        assert_eq!(board.tile_at(5), None);
        assert!(!board.is_solved());
    }

    #[test]
    fn shift_multi_tile_row_shove() {
        let mut board = Board::solved(4).unwrap();
        assert_eq!(board.shift(12), ShiftOutcome::Moved { distance: 3 });
        assert_eq!(
            arrangement(&board)[12..],
            [None, Some(12), Some(13), Some(14)]
        );
        assert_eq!(board.empty(), 12);
        assert!(board.is_consistent());
    }

    #[test]
    fn shift_toward_higher_index() {
        let mut board = Board::solved(3).unwrap();
        let _ = board.shift(2);
        // Column now: cell2 empty, 5 holds 2, 8 holds 5.
        assert_eq!(board.shift(8), ShiftOutcome::Moved { distance: 2 });
        assert!(board.is_solved());
    }

    #[test]
    fn shift_to_empty_is_noop() {
        let mut board = Board::solved(3).unwrap();
        let before = board.clone();
        assert_eq!(board.shift(8), ShiftOutcome::NotMoved);
        assert_eq!(board, before);
    }

    #[test]
    fn shift_diagonal_is_noop() {
        let mut board = Board::solved(3).unwrap();
        let before = board.clone();
        assert_eq!(board.shift(4), ShiftOutcome::NotMoved);
        assert_eq!(board.shift(0), ShiftOutcome::NotMoved);
        assert_eq!(board, before);
    }

    #[test]
    fn shift_out_of_range_is_noop() {
        let mut board = Board::solved(3).unwrap();
        assert_eq!(board.shift(9), ShiftOutcome::NotMoved);
        assert_eq!(board.shift(usize::MAX), ShiftOutcome::NotMoved);
    }

    #[test]
    fn slide_line_lists_cells_toward_empty() {
        let board = Board::solved(3).unwrap();
        let line = board.slide_line(6).unwrap();
        assert_eq!(line.axis, Axis::Horizontal);
        assert_eq!(line.direction, 1);
        assert_eq!(line.cells, vec![6, 7]);
        assert_eq!(line.origin(), Some(6));

        let line = board.slide_line(2).unwrap();
        assert_eq!(line.axis, Axis::Vertical);
        assert_eq!(line.cells, vec![2, 5]);

        assert!(board.slide_line(4).is_none());
        assert!(board.slide_line(8).is_none());
    }

    #[test]
    fn hand_built_empty_line_has_no_origin() {
        let line = SlideLine {
            axis: Axis::Vertical,
            direction: -1,
            cells: Vec::new(),
        };
        assert!(line.is_empty());
        assert_eq!(line.origin(), None);
    }

    #[test]
    fn slide_line_upward_direction() {
        let mut board = Board::solved(3).unwrap();
        let _ = board.shift(2);
        let line = board.slide_line(8).unwrap();
        assert_eq!(line.axis, Axis::Vertical);
        assert_eq!(line.direction, -1);
        assert_eq!(line.cells, vec![8, 5]);
    }

    #[test]
    fn tile_positions_inverts_arrangement() {
        let mut board = Board::solved(3).unwrap();
        let _ = board.shift(6);
        let positions = board.tile_positions();
        assert_eq!(positions.len(), 9);
        assert_eq!(positions[8], 6);
        assert_eq!(positions[6], 7);
        assert_eq!(positions[7], 8);
        let restored = Board::from_positions(3, board.empty(), &positions).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn from_positions_rejects_bad_tables() {
        let ok: Vec<usize> = (0..9).collect();
        assert!(Board::from_positions(3, 8, &ok).is_ok());

        let short: Vec<usize> = (0..8).collect();
        assert!(matches!(
            Board::from_positions(3, 8, &short),
            Err(PuzzleError::CorruptState { .. })
        ));

        let mut dup = ok.clone();
        dup[1] = 0;
        assert!(Board::from_positions(3, 8, &dup).is_err());

        let mut outside = ok.clone();
        outside[2] = 42;
        assert!(Board::from_positions(3, 8, &outside).is_err());

        assert!(Board::from_positions(3, 4, &ok).is_err());
        assert!(Board::from_positions(1, 0, &[0]).is_err());
    }

    #[test]
    fn swapped_pair_is_unreachable() {
        let mut positions: Vec<usize> = (0..9).collect();
        positions.swap(0, 1);
        let board = Board::from_positions(3, 8, &positions).unwrap();
        assert!(board.is_consistent());
        assert!(!board.is_reachable());
    }

    #[test]
    fn display_marks_empty_cell() {
        let board = Board::solved(2).unwrap();
        assert_eq!(board.to_string(), "1 2\n3 .\n");
    }
}
