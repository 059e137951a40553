//! Draw detection logic for tic-tac-toe.

use super::Grid;
use super::win::LINE_GROUPS;
use crate::coordinate::Coordinate;
use crate::types::Side;

/// Checks if the board is full (all cells occupied).
pub fn is_full<G: Grid + ?Sized>(grid: &G) -> bool {
    Coordinate::ALL.iter().all(|c| !grid.is_open(*c))
}

/// Checks if no line can be completed by either side.
///
/// True once every line group holds at least one mark of each side, which can
/// happen before the last cell is filled.
pub fn is_fast_draw<G: Grid + ?Sized>(grid: &G) -> bool {
    LINE_GROUPS.iter().all(|line| {
        let holds = |side| line.iter().any(|c| grid.mark_at(*c).side() == Some(side));
        holds(Side::Computer) && holds(Side::Human)
    })
}
