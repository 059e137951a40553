//! tictactoe - play against the computer in a terminal.

use anyhow::Result;
use clap::Parser;
use std::io;
use tictactoe_console::{Cli, ConsoleInput, ConsolePresenter, GameConfig, run_game};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::load(&cli)?;

    let input = ConsoleInput::new(io::stdin().lock(), io::stdout());
    let presenter = ConsolePresenter::new(io::stdout());
    match run_game(&config, input, presenter)? {
        Some(end) => info!(?end, "Game over"),
        None => info!("Quit during setup"),
    }
    Ok(())
}
