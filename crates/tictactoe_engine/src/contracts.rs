//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} apply {Q}. The board runs the preconditions before touching any cell
//! and the postconditions after every successful move.

use crate::action::Move;
use crate::board::Board;
use crate::error::IllegalMove;
use crate::invariants::{BoardInvariants, InvariantSet, InvariantViolation};
use crate::rules::Grid;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), IllegalMove>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not reached a terminal outcome.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with `GameOver` once the board is won or drawn.
    #[instrument(skip(board))]
    pub fn check(board: &Board) -> Result<(), IllegalMove> {
        let outcome = board.outcome();
        if outcome.is_terminal() {
            Err(IllegalMove::GameOver(outcome))
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the moving side's turn.
pub struct SidesTurn;

impl SidesTurn {
    /// Fails with `WrongTurn` when the other side is due.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), IllegalMove> {
        if mov.side != board.to_move() {
            Err(IllegalMove::WrongTurn(mov.side))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell must be open.
pub struct CellIsOpen;

impl CellIsOpen {
    /// Fails with `Occupied` when the cell already holds a mark.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), IllegalMove> {
        if !board.is_open(mov.coordinate) {
            Err(IllegalMove::Occupied(mov.coordinate))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition, checked in order: game live, right side, open cell.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), IllegalMove> {
        GameNotOver::check(board)?;
        SidesTurn::check(mov, board)?;
        CellIsOpen::check(mov, board)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move application.
///
/// Postconditions:
/// - exactly one move was appended and earlier history is untouched
/// - every board invariant holds
pub struct MoveContract;

impl Contract<Board, Move> for MoveContract {
    fn pre(board: &Board, action: &Move) -> Result<(), IllegalMove> {
        LegalMove::check(action, board)
    }

    fn post(before: &Board, after: &Board) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        let grew_by_one = after.history().len() == before.history().len() + 1
            && after.history().starts_with(before.history());
        if !grew_by_one {
            violations.push(InvariantViolation::new(
                "Exactly one move is appended per transition",
            ));
        }

        if let Err(found) = BoardInvariants::check_all(after) {
            violations.extend(found);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::types::{Mark, Side};

    #[test]
    fn test_precondition_empty_square() {
        let board = Board::new(true);
        let action = Move::new(Side::Computer, Coordinate::CENTER);
        assert!(MoveContract::pre(&board, &action).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let mut board = Board::new(true);
        board.apply_move(Coordinate::CENTER, Side::Computer).unwrap();

        let action = Move::new(Side::Human, Coordinate::CENTER);
        assert_eq!(
            MoveContract::pre(&board, &action),
            Err(IllegalMove::Occupied(Coordinate::CENTER))
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let board = Board::new(true);
        let action = Move::new(Side::Human, Coordinate::CENTER);
        assert_eq!(
            MoveContract::pre(&board, &action),
            Err(IllegalMove::WrongTurn(Side::Human))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = Board::new(false);
        let mut after = before.clone();
        after.apply_move(Coordinate::CENTER, Side::Human).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = Board::new(false);
        let mut after = before.clone();
        after.apply_move(Coordinate::CENTER, Side::Human).unwrap();

        // Mark a cell behind the board's back.
        after.cells[0].mark = Mark::Taken(Side::Computer);
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_postcondition_detects_missing_move() {
        let board = Board::new(false);
        let violations = MoveContract::post(&board, &board).unwrap_err();
        assert_eq!(violations.len(), 1);
    }
}
