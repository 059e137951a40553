//! History invariant: replaying the moves reproduces the board.

use super::Invariant;
use crate::board::Board;
use crate::coordinate::Coordinate;
use crate::types::Mark;

/// Invariant: marks are never overwritten and every mark has a recorded move.
///
/// Verified by replaying the history onto an empty grid and comparing.
pub struct HistoryMatchesBoard;

impl Invariant<Board> for HistoryMatchesBoard {
    fn holds(board: &Board) -> bool {
        let mut reconstructed = [Mark::Empty; 9];

        for mov in board.history() {
            let slot = &mut reconstructed[mov.coordinate.index()];
            if !slot.is_empty() {
                return false;
            }
            *slot = Mark::Taken(mov.side);
        }

        Coordinate::ALL
            .into_iter()
            .all(|c| board.cell_at(c).mark() == reconstructed[c.index()])
    }

    fn description() -> &'static str {
        "Board cells match the replayed move history"
    }
}
