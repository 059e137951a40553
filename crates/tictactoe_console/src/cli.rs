//! Command-line interface for the tictactoe binary.

use crate::config::FirstPlayer;
use clap::Parser;
use std::path::PathBuf;
use tictactoe_engine::Difficulty;

/// Tic-tac-toe against the computer, from EASY up to an unbeatable WIZARD
#[derive(Parser, Debug, Default)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tictactoe.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Computer level: easy, medium, hard or wizard
    #[arg(short, long)]
    pub level: Option<Difficulty>,

    /// Who moves first
    #[arg(short, long, value_enum)]
    pub first: Option<FirstPlayer>,

    /// Seed for reproducible computer moves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the welcome banner
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "tictactoe",
            "--level",
            "Wizard",
            "--first",
            "computer",
            "--seed",
            "42",
            "--config",
            "game.toml",
            "--quiet",
        ])
        .unwrap();

        assert_eq!(cli.level, Some(Difficulty::Wizard));
        assert_eq!(cli.first, Some(FirstPlayer::Computer));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.config, Some(PathBuf::from("game.toml")));
        assert!(cli.quiet);
    }

    #[test]
    fn test_flags_are_optional() {
        let cli = Cli::try_parse_from(["tictactoe"]).unwrap();
        assert!(cli.level.is_none());
        assert!(cli.first.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["tictactoe", "--level", "grandmaster"]).is_err());
    }
}
