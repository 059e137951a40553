//! Win detection logic for tic-tac-toe.

use super::Grid;
use crate::coordinate::Coordinate;
use crate::types::{Mark, Side};

const fn at(x: i8, y: i8) -> Coordinate {
    Coordinate::ALL[((1 - y) * 3 + (x + 1)) as usize]
}

/// The eight winning lines: three rows (top first), three columns (left
/// first), then the two diagonals.
///
/// The order is part of the contract: threat lookups report the first match.
pub const LINE_GROUPS: [[Coordinate; 3]; 8] = [
    // Rows
    [at(-1, 1), at(0, 1), at(1, 1)],
    [at(-1, 0), at(0, 0), at(1, 0)],
    [at(-1, -1), at(0, -1), at(1, -1)],
    // Columns
    [at(-1, -1), at(-1, 0), at(-1, 1)],
    [at(0, -1), at(0, 0), at(0, 1)],
    [at(1, -1), at(1, 0), at(1, 1)],
    // Diagonals
    [at(-1, -1), at(0, 0), at(1, 1)],
    [at(-1, 1), at(0, 0), at(1, -1)],
];

/// Checks if one side has three in a row.
///
/// Returns `Some(side)` for the owner of the first complete line found.
pub fn check_winner<G: Grid + ?Sized>(grid: &G) -> Option<Side> {
    LINE_GROUPS.iter().find_map(|[a, b, c]| {
        let mark = grid.mark_at(*a);
        match mark {
            Mark::Taken(side) if mark == grid.mark_at(*b) && mark == grid.mark_at(*c) => Some(side),
            _ => None,
        }
    })
}
