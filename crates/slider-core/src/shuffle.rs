#![forbid(unsafe_code)]

//! Shuffle generator: randomized scramble reachable from the solved board.
//!
//! The scramble is a sequence of [`Board::shift`] calls, so every result is
//! reachable by play. Moves alternate between a horizontal move (pick a
//! column in the blank's row) and a vertical move (pick a row in the blank's
//! column), which means no move can undo the one before it.
//!
//! For each move a coin flip chooses the side of the blank to pull from. The
//! low side is forced when the blank sits on the last column/row; the high
//! side is used when the blank sits on the first.
//!
//! # Invariants
//!
//! 1. Same seed + same parameters ⇒ same arrangement.
//! 2. With `moves >= 2` the result is never the solved arrangement; if the
//!    alternating walk happens to close a cycle, one extra move is made.
//! 3. `moves == 0` leaves the board untouched.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, ShiftOutcome};
use crate::error::Result;
use crate::geometry::Grid;

/// How far a single scramble move may reach from the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleReach {
    /// Only the neighbouring cell on the chosen side; one tile per move.
    #[default]
    Adjacent,
    /// Any cell on the chosen side, shoving the whole line in one move.
    Line,
}

/// Scramble `board` in place with `moves` alternating moves.
///
/// Returns the number of moves actually applied (one more than requested
/// when the walk landed back on the solved arrangement).
pub fn scramble<R: Rng + ?Sized>(
    board: &mut Board,
    moves: u32,
    reach: ShuffleReach,
    rng: &mut R,
) -> u32 {
    let _span = tracing::debug_span!("scramble", size = board.size(), moves, ?reach).entered();

    let mut applied = 0u32;
    while applied < moves {
        step(board, applied, reach, rng);
        applied += 1;
    }
    while moves >= 2 && board.is_solved() {
        step(board, applied, reach, rng);
        applied += 1;
    }

    tracing::debug!(applied, empty = board.empty(), "scramble finished");
    applied
}

/// Fresh board of `size` scrambled with `moves` moves, plus the number of
/// moves actually applied (see [`scramble`]).
pub fn scrambled<R: Rng + ?Sized>(
    size: usize,
    moves: u32,
    reach: ShuffleReach,
    rng: &mut R,
) -> Result<(Board, u32)> {
    let mut board = Board::solved(size)?;
    let applied = scramble(&mut board, moves, reach, rng);
    Ok((board, applied))
}

fn step<R: Rng + ?Sized>(board: &mut Board, orientation: u32, reach: ShuffleReach, rng: &mut R) {
    let grid = Grid::new(board.size(), 0);
    let last = board.size() - 1;
    let empty = board.empty();
    let col = grid.column(empty);
    let row = grid.row(empty);

    let target = if orientation % 2 == 0 {
        let pick = pick_on_side(col, last, reach, rng);
        grid.index_from_col_row(pick, row)
    } else {
        let pick = pick_on_side(row, last, reach, rng);
        grid.index_from_col_row(col, pick)
    };

    let outcome = board.shift(target);
    debug_assert!(
        matches!(outcome, ShiftOutcome::Moved { .. }),
        "scramble target {target} must share a line with the blank at {empty}"
    );
}

/// Pick a coordinate strictly below or above `at` on `0..=last`.
fn pick_on_side<R: Rng + ?Sized>(at: usize, last: usize, reach: ShuffleReach, rng: &mut R) -> usize {
    let low_side = (rng.random_bool(0.5) && at > 0) || at == last;
    match (low_side, reach) {
        (true, ShuffleReach::Adjacent) => at - 1,
        (true, ShuffleReach::Line) => rng.random_range(0..at),
        (false, ShuffleReach::Adjacent) => at + 1,
        (false, ShuffleReach::Line) => rng.random_range(at + 1..=last),
    }
}
