//! Canonical board coordinates and their symmetry classes.
//!
//! A coordinate is an `(x, y)` pair in `{-1, 0, 1}`, with `x` growing to the
//! right and `y` growing upward, so `(-1, 1)` is the top-left corner. All nine
//! values live in a fixed lookup table; every constructor hands out a copy of
//! a table entry, never an ad hoc value.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Symmetry class of a board position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum PositionClass {
    /// The middle cell.
    Center,
    /// One of the four cells with both components nonzero.
    Corner,
    /// One of the four edge midpoints.
    Side,
}

/// One of the nine board positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i8, i8)", into = "(i8, i8)")]
pub struct Coordinate {
    x: i8,
    y: i8,
}

const fn at(x: i8, y: i8) -> Coordinate {
    Coordinate { x, y }
}

/// Lookup table indexed by `[x + 1][y + 1]`.
const GRID: [[Coordinate; 3]; 3] = [
    [at(-1, -1), at(-1, 0), at(-1, 1)],
    [at(0, -1), at(0, 0), at(0, 1)],
    [at(1, -1), at(1, 0), at(1, 1)],
];

impl Coordinate {
    /// The middle cell.
    pub const CENTER: Coordinate = at(0, 0);

    /// The four corners.
    pub const CORNERS: [Coordinate; 4] = [at(1, 1), at(-1, 1), at(1, -1), at(-1, -1)];

    /// The four edge midpoints.
    pub const SIDES: [Coordinate; 4] = [at(0, 1), at(0, -1), at(1, 0), at(-1, 0)];

    /// All nine coordinates in cell-number order (top row first, left to right).
    pub const ALL: [Coordinate; 9] = [
        at(-1, 1),
        at(0, 1),
        at(1, 1),
        at(-1, 0),
        at(0, 0),
        at(1, 0),
        at(-1, -1),
        at(0, -1),
        at(1, -1),
    ];

    /// Returns the canonical coordinate for `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCoordinate` unless both components are in `{-1, 0, 1}`.
    #[instrument]
    pub fn new(x: i8, y: i8) -> Result<Self, EngineError> {
        if !(-1..=1).contains(&x) || !(-1..=1).contains(&y) {
            return Err(EngineError::InvalidCoordinate { x, y });
        }
        Ok(lookup(x, y))
    }

    /// Creates a coordinate from its cell number.
    ///
    /// Cells are numbered `0 1 2 / 3 4 5 / 6 7 8`, top row first.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidIndex` for numbers above 8.
    #[instrument]
    pub fn from_index(index: usize) -> Result<Self, EngineError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(EngineError::InvalidIndex(index))
    }

    /// Cell number of this coordinate (0-8).
    pub fn index(self) -> usize {
        ((1 - self.y) * 3 + (self.x + 1)) as usize
    }

    /// Column component.
    pub fn x(self) -> i8 {
        self.x
    }

    /// Row component.
    pub fn y(self) -> i8 {
        self.y
    }

    /// Symmetry class of this position.
    pub fn class(self) -> PositionClass {
        match (self.x, self.y) {
            (0, 0) => PositionClass::Center,
            (0, _) | (_, 0) => PositionClass::Side,
            _ => PositionClass::Corner,
        }
    }

    /// Point reflection through the center.
    pub fn opposite(self) -> Self {
        lookup(-self.x, -self.y)
    }

    /// Reflection across the vertical axis (negates `x`).
    pub fn mirrored_horizontally(self) -> Self {
        lookup(-self.x, self.y)
    }

    /// Reflection across the horizontal axis (negates `y`).
    pub fn mirrored_vertically(self) -> Self {
        lookup(self.x, -self.y)
    }

    /// Human-readable name of the position.
    pub fn label(self) -> &'static str {
        match self.index() {
            0 => "top-left",
            1 => "top-center",
            2 => "top-right",
            3 => "middle-left",
            4 => "center",
            5 => "middle-right",
            6 => "bottom-left",
            7 => "bottom-center",
            _ => "bottom-right",
        }
    }
}

fn lookup(x: i8, y: i8) -> Coordinate {
    GRID[(x + 1) as usize][(y + 1) as usize]
}

impl TryFrom<(i8, i8)> for Coordinate {
    type Error = EngineError;

    fn try_from((x, y): (i8, i8)) -> Result<Self, Self::Error> {
        Coordinate::new(x, y)
    }
}

impl From<Coordinate> for (i8, i8) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.x, coordinate.y)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.x, self.y)
    }
}
