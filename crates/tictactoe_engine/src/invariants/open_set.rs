//! Open-set invariant: the open list mirrors the empty cells.

use super::Invariant;
use crate::board::Board;
use crate::coordinate::Coordinate;
use crate::rules::Grid;

/// Invariant: a coordinate is listed as open exactly when its cell is empty.
pub struct OpenSetMatchesMarks;

impl Invariant<Board> for OpenSetMatchesMarks {
    fn holds(board: &Board) -> bool {
        let expected: Vec<Coordinate> = Coordinate::ALL
            .into_iter()
            .filter(|c| board.is_open(*c))
            .collect();
        board.open_coordinates() == expected.as_slice()
    }

    fn description() -> &'static str {
        "Open coordinates are exactly the empty cells"
    }
}
