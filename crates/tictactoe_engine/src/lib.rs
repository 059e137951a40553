//! Tic-tac-toe engine - a single human against the computer
//!
//! The computer plays `X` and the human plays `O`. The computer has four
//! levels, each adding a skill to the one before it.
//!
//! # Architecture
//!
//! - **Board**: nine cells, the open set, move history and turn tracking
//! - **Rules**: winning lines, full boards and fast draws
//! - **Threat**: lines one mark away from completion
//! - **Strategy**: EASY, MEDIUM, HARD and WIZARD move selection
//! - **Session**: turn sequencing against pluggable input and output
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Board, ComputerPlayer, Difficulty, Side};
//!
//! # fn example() -> Result<(), tictactoe_engine::EngineError> {
//! let mut board = Board::new(true);
//! let mut computer = ComputerPlayer::seeded(Difficulty::Wizard, 7);
//!
//! let chosen = computer.choose_move(&board)?;
//! board.apply_move(chosen, Side::Computer)?;
//! assert_eq!(board.open_coordinates().len(), 8);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod contracts;
mod coordinate;
mod error;
pub mod invariants;
pub mod rules;
mod session;
pub mod strategy;
mod threat;
mod types;

// Crate-level exports - Board state
pub use action::Move;
pub use board::{Board, Cell};
pub use coordinate::{Coordinate, PositionClass};
pub use types::{Difficulty, Mark, Outcome, Side};

// Crate-level exports - Errors
pub use error::{EngineError, IllegalMove};

// Crate-level exports - Rules and analysis
pub use rules::{Grid, LINE_GROUPS};
pub use threat::{find_threat, safe_move};

// Crate-level exports - Move selection
pub use strategy::{ComputerPlayer, choose_move, minimax};

// Crate-level exports - Session
pub use session::{GameSession, HumanInput, InputProvider, Presenter, SessionEnd, SessionPhase};
