//! Console front end for the tic-tac-toe engine.
//!
//! - **Cli**: command-line flags
//! - **Config**: defaults, TOML file, environment and flags, merged in that order
//! - **Console**: prompts, board rendering and the game loop on text streams

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;

pub use cli::Cli;
pub use config::{ConfigError, FirstPlayer, GameConfig};
pub use console::{ConsoleInput, ConsolePresenter, INSTRUCTIONS, run_game, taunt};
