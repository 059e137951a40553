//! Game rules for tic-tac-toe.
//!
//! Pure functions over anything that can report the mark at a coordinate.
//! The board and the search snapshots share them, so the outcome a search
//! scores is always the outcome the board will report.

pub mod draw;
pub mod win;

pub use draw::{is_fast_draw, is_full};
pub use win::{LINE_GROUPS, check_winner};

use crate::coordinate::Coordinate;
use crate::types::{Mark, Outcome};

/// Read access to the nine marks of a position.
pub trait Grid {
    /// Returns the mark at `coordinate`.
    fn mark_at(&self, coordinate: Coordinate) -> Mark;

    /// Returns true if nobody has played at `coordinate`.
    fn is_open(&self, coordinate: Coordinate) -> bool {
        self.mark_at(coordinate).is_empty()
    }
}

/// Derives the outcome of a position.
///
/// A completed line wins. Otherwise the game is drawn once the board is full
/// or every line holds marks of both sides; anything else is in progress.
pub fn outcome<G: Grid + ?Sized>(grid: &G) -> Outcome {
    if let Some(side) = check_winner(grid) {
        return Outcome::won_by(side);
    }
    if is_fast_draw(grid) || is_full(grid) {
        return Outcome::Draw;
    }
    Outcome::InProgress
}
