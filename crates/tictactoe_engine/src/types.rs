//! Core domain types for the tic-tac-toe engine.

use serde::{Deserialize, Serialize};

/// One of the two participants.
///
/// The computer always plays `X` and the human always plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// The engine-controlled player (`X`).
    Computer,
    /// The player fed by the input provider (`O`).
    Human,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Computer => Side::Human,
            Side::Human => Side::Computer,
        }
    }

    /// Character drawn for this side's marks.
    pub fn symbol(self) -> char {
        match self {
            Side::Computer => 'X',
            Side::Human => 'O',
        }
    }
}

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Nobody has played here yet.
    Empty,
    /// Claimed by a side.
    Taken(Side),
}

impl Mark {
    /// Returns true if the cell is still open.
    pub fn is_empty(self) -> bool {
        matches!(self, Mark::Empty)
    }

    /// Returns the owning side, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Mark::Empty => None,
            Mark::Taken(side) => Some(side),
        }
    }

    /// Character drawn for this mark (`X`, `O` or a blank).
    pub fn symbol(self) -> char {
        self.side().map_or(' ', Side::symbol)
    }
}

/// Strategy tier used for computer moves, fixed for a whole session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random open cell.
    Easy,
    /// Wins or blocks when a line is one mark away, otherwise random.
    Medium,
    /// Medium plus the corner trap against a human-held center.
    Hard,
    /// Exhaustive minimax search; never loses.
    Wizard,
}

/// State of the game as derived from the board.
///
/// Never stored: always recomputed from the marks on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves can still be made.
    InProgress,
    /// The computer completed a line.
    ComputerWin,
    /// The human completed a line.
    HumanWin,
    /// Board full, or every line blocked for both sides.
    Draw,
}

impl Outcome {
    /// The outcome in which `side` has completed a line.
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Computer => Outcome::ComputerWin,
            Side::Human => Outcome::HumanWin,
        }
    }

    /// Returns the winning side, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::ComputerWin => Some(Side::Computer),
            Outcome::HumanWin => Some(Side::Human),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// Returns true once no further moves are accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::ComputerWin => write!(f, "computer wins"),
            Outcome::HumanWin => write!(f, "human wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
