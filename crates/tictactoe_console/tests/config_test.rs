//! Tests for loading game configuration from disk.

use std::io::Write;
use tempfile::NamedTempFile;
use tictactoe_console::{Cli, FirstPlayer, GameConfig};
use tictactoe_engine::Difficulty;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = config_file(
        r#"
level = "wizard"
first = "random"
seed = 2024
instructions = false
"#,
    );

    let config = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.level(), Some(Difficulty::Wizard));
    assert_eq!(*config.first(), Some(FirstPlayer::Random));
    assert_eq!(*config.seed(), Some(2024));
    assert!(!*config.instructions());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = GameConfig::discover(Some(missing.as_path())).unwrap_err();
    assert!(err.message.contains("Failed to read"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = config_file("level = \"grandmaster\"\n");
    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse"));
}

#[test]
fn test_flags_override_file() {
    let file = config_file("level = \"easy\"\nfirst = \"human\"\n");
    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        first: Some(FirstPlayer::Computer),
        ..Cli::default()
    };

    let config = GameConfig::discover(cli.config.as_deref())
        .unwrap()
        .with_cli(&cli);
    assert_eq!(*config.level(), Some(Difficulty::Easy));
    assert_eq!(*config.first(), Some(FirstPlayer::Computer));
}
