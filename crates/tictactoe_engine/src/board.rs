//! The 3×3 board and move application.

use crate::action::Move;
use crate::contracts::{Contract, MoveContract};
use crate::coordinate::{Coordinate, PositionClass};
use crate::error::{EngineError, IllegalMove};
use crate::rules::{self, Grid};
use crate::types::{Mark, Outcome, Side};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

/// One board slot.
///
/// The coordinate and class are fixed when the board is built; only the mark
/// ever changes, and only through move application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    coordinate: Coordinate,
    class: PositionClass,
    pub(crate) mark: Mark,
}

impl Cell {
    fn empty(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            class: coordinate.class(),
            mark: Mark::Empty,
        }
    }

    /// Position of this cell.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Symmetry class of this cell.
    pub fn class(&self) -> PositionClass {
        self.class
    }

    /// Current mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// Mutable game board.
///
/// Invariants, checked after every move:
/// - the open set is exactly the coordinates whose cell is empty
/// - `turn == 1 + history.len()` and `open.len() + history.len() == 9`
/// - replaying the history onto an empty grid reproduces the cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    /// Cells in cell-number order.
    pub(crate) cells: [Cell; 9],
    /// Open coordinates, kept in cell-number order.
    pub(crate) open: Vec<Coordinate>,
    /// Every move made, in order.
    pub(crate) history: Vec<Move>,
    pub(crate) turn: u8,
    pub(crate) to_move: Side,
    computer_started: bool,
}

impl Board {
    /// Creates an empty board.
    #[instrument]
    pub fn new(computer_starts: bool) -> Self {
        let to_move = if computer_starts {
            Side::Computer
        } else {
            Side::Human
        };
        Self {
            cells: Coordinate::ALL.map(Cell::empty),
            open: Coordinate::ALL.to_vec(),
            history: Vec::new(),
            turn: 1,
            to_move,
            computer_started: computer_starts,
        }
    }

    /// Rebuilds a board by applying `moves` in order with full validation.
    ///
    /// # Errors
    ///
    /// Fails on the first move the board refuses.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(computer_starts: bool, moves: &[Move]) -> Result<Self, EngineError> {
        let mut board = Self::new(computer_starts);
        for action in moves {
            board.apply_move(action.coordinate, action.side)?;
        }
        Ok(board)
    }

    /// Builds an arbitrary position for analysis, skipping turn alternation.
    ///
    /// Moves are recorded alternately starting with whichever side would have
    /// begun, then any surplus of one side. `to_move` is taken as given.
    ///
    /// # Errors
    ///
    /// Returns `IllegalMove::Occupied` if a coordinate appears twice.
    #[instrument]
    pub fn arranged(
        to_move: Side,
        computer: &[Coordinate],
        human: &[Coordinate],
    ) -> Result<Self, EngineError> {
        let total = computer.len() + human.len();
        let starter = if total % 2 == 0 {
            to_move
        } else {
            to_move.opponent()
        };
        let mut board = Self::new(starter == Side::Computer);

        let (first, second) = match starter {
            Side::Computer => (computer, human),
            Side::Human => (human, computer),
        };
        let mut first = first.iter().map(|c| Move::new(starter, *c));
        let mut second = second.iter().map(|c| Move::new(starter.opponent(), *c));
        loop {
            let next = [first.next(), second.next()];
            if next.iter().all(Option::is_none) {
                break;
            }
            for action in next.into_iter().flatten() {
                if !board.is_open(action.coordinate) {
                    return Err(IllegalMove::Occupied(action.coordinate).into());
                }
                board.place(action);
            }
        }
        board.to_move = to_move;
        Ok(board)
    }

    /// Returns the cell at `coordinate`.
    pub fn cell_at(&self, coordinate: Coordinate) -> &Cell {
        &self.cells[coordinate.index()]
    }

    /// All nine cells in cell-number order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Coordinates nobody has played yet, in cell-number order.
    pub fn open_coordinates(&self) -> &[Coordinate] {
        &self.open
    }

    /// Every move made so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The moves made by one side, in order.
    pub fn moves_of(&self, side: Side) -> Vec<Coordinate> {
        self.history
            .iter()
            .filter(|m| m.side == side)
            .map(|m| m.coordinate)
            .collect()
    }

    /// Turn counter, starting at 1.
    pub fn turn(&self) -> u8 {
        self.turn
    }

    /// The side expected to move next.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Whether the computer made (or will make) the first move.
    pub fn computer_started(&self) -> bool {
        self.computer_started
    }

    /// Derives the outcome from the current marks.
    pub fn outcome(&self) -> Outcome {
        rules::outcome(self)
    }

    /// Places `side`'s mark at `coordinate`.
    ///
    /// Either the whole move is applied or nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::IllegalMove` if the game is over, it is not
    /// `side`'s turn, or the cell is taken.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn apply_move(&mut self, coordinate: Coordinate, side: Side) -> Result<(), EngineError> {
        let action = Move::new(side, coordinate);
        if let Err(reason) = MoveContract::pre(self, &action) {
            warn!(%reason, "Move rejected");
            return Err(reason.into());
        }

        let before = self.clone();
        self.place(action);
        debug!(%action, outcome = %self.outcome(), "Move applied");

        if let Err(violations) = MoveContract::post(&before, self) {
            error!(?violations, "Board invariants violated");
            debug_assert!(false, "Board invariants violated: {:?}", violations);
        }
        Ok(())
    }

    /// Unchecked mutation shared by move application and arrangement.
    fn place(&mut self, action: Move) {
        self.cells[action.coordinate.index()].mark = Mark::Taken(action.side);
        self.open.retain(|c| *c != action.coordinate);
        self.history.push(action);
        self.to_move = action.side.opponent();
        self.turn += 1;
    }
}

impl Grid for Board {
    fn mark_at(&self, coordinate: Coordinate) -> Mark {
        self.cells[coordinate.index()].mark
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, line) in Coordinate::ALL.chunks(3).enumerate() {
            if row > 0 {
                f.write_str("-----------\n")?;
            }
            let [a, b, c] = [line[0], line[1], line[2]].map(|coord| self.mark_at(coord).symbol());
            writeln!(f, " {} | {} | {}", a, b, c)?;
        }
        Ok(())
    }
}
