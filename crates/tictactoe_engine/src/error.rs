//! Error types for the engine.

use crate::coordinate::Coordinate;
use crate::types::{Outcome, Side};

/// Reason a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// The cell at the coordinate is already marked.
    #[display("{} is already taken", _0)]
    Occupied(Coordinate),

    /// It is the other side's turn.
    #[display("it is not the {}'s turn", _0)]
    WrongTurn(Side),

    /// The game has reached a terminal outcome.
    #[display("the game is already over ({})", _0)]
    GameOver(Outcome),

    /// The session was abandoned by the input provider.
    #[display("the game was abandoned")]
    Aborted,
}

impl std::error::Error for IllegalMove {}

/// Every failure the engine reports.
///
/// All of them are synchronous and leave the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// An `(x, y)` pair outside `{-1, 0, 1}²`.
    #[display("coordinate ({x}, {y}) is off the board")]
    InvalidCoordinate {
        /// Requested column.
        x: i8,
        /// Requested row.
        y: i8,
    },

    /// A cell number outside `0..=8`.
    #[display("cell index {} is out of range (expected 0-8)", _0)]
    InvalidIndex(usize),

    /// The board refused the move.
    #[display("illegal move: {}", _0)]
    IllegalMove(IllegalMove),

    /// A move was requested with no open cells left.
    ///
    /// Callers that check the outcome first never see this.
    #[display("no open cells remain")]
    EmptyOpenSet,
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::IllegalMove(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<IllegalMove> for EngineError {
    fn from(reason: IllegalMove) -> Self {
        EngineError::IllegalMove(reason)
    }
}
