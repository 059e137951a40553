//! Turn counter invariant: counters agree with the recorded moves.

use super::Invariant;
use crate::board::Board;

/// Invariant: `turn == 1 + moves made` and `open + moves made == 9`.
pub struct TurnCounterMatchesHistory;

impl Invariant<Board> for TurnCounterMatchesHistory {
    fn holds(board: &Board) -> bool {
        let made = board.history().len();
        usize::from(board.turn()) == made + 1 && board.open_coordinates().len() + made == 9
    }

    fn description() -> &'static str {
        "Turn counter and open count agree with move history"
    }
}
