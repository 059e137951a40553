//! First-class move type.
//!
//! A move is a domain event: one side claiming one coordinate. Boards record
//! them in order so a game can be replayed or analyzed afterwards.

use crate::coordinate::Coordinate;
use crate::types::Side;
use serde::{Deserialize, Serialize};

/// A side placing its mark at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The side making the move.
    pub side: Side,
    /// Where the mark goes.
    pub coordinate: Coordinate,
}

impl Move {
    /// Creates a new move.
    pub fn new(side: Side, coordinate: Coordinate) -> Self {
        Self { side, coordinate }
    }

    /// Returns the side making this move.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns the coordinate of this move.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.coordinate.label())
    }
}
