//! Game configuration.
//!
//! Layers, lowest priority first: built-in defaults, a TOML file, the
//! environment (including `.env`), then command-line flags. Anything still
//! unset is asked for interactively.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tictactoe_engine::Difficulty;
use tracing::{debug, info, instrument};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Environment variable holding the computer level.
pub const ENV_LEVEL: &str = "TICTACTOE_LEVEL";
/// Environment variable holding who moves first.
pub const ENV_FIRST: &str = "TICTACTOE_FIRST";
/// Environment variable holding the RNG seed.
pub const ENV_SEED: &str = "TICTACTOE_SEED";

/// Who makes the opening move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FirstPlayer {
    /// The human opens.
    Human,
    /// The computer opens.
    Computer,
    /// A coin flip decides.
    Random,
}

impl FirstPlayer {
    /// Resolves the choice, flipping a coin for `Random`.
    pub fn computer_starts<R: Rng>(self, rng: &mut R) -> bool {
        match self {
            FirstPlayer::Human => false,
            FirstPlayer::Computer => true,
            FirstPlayer::Random => rng.random_bool(0.5),
        }
    }
}

/// Settings for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Computer level; prompted for when unset.
    level: Option<Difficulty>,

    /// Who moves first; prompted for when unset.
    first: Option<FirstPlayer>,

    /// Seed for the computer's randomness; drawn from the OS when unset.
    seed: Option<u64>,

    /// Print the welcome banner before play.
    instructions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: None,
            first: None,
            seed: None,
            instructions: true,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Reads `explicit` if given, else `tictactoe.toml` if it exists, else defaults.
    #[instrument]
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Overrides fields from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Overrides fields from any variable source.
    #[instrument(skip(self, lookup))]
    pub fn with_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LEVEL) {
            self.level = Some(parse_var(ENV_LEVEL, &level)?);
        }
        if let Some(first) = lookup(ENV_FIRST) {
            self.first = Some(parse_var(ENV_FIRST, &first)?);
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(parse_var(ENV_SEED, &seed)?);
        }
        Ok(self)
    }

    /// Overrides fields with any flags given on the command line.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if cli.level.is_some() {
            self.level = cli.level;
        }
        if cli.first.is_some() {
            self.first = cli.first;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if cli.quiet {
            self.instructions = false;
        }
        self
    }

    /// Resolves every layer for this invocation.
    #[instrument(skip(cli))]
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let config = Self::discover(cli.config.as_deref())?
            .with_env()?
            .with_cli(cli);
        debug!(?config, "Configuration resolved");
        Ok(config)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::new(format!("Invalid {} value {:?}: {}", key, value, e)))
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_prompt_for_everything() {
        let config = GameConfig::default();
        assert!(config.level().is_none());
        assert!(config.first().is_none());
        assert!(config.seed().is_none());
        assert!(*config.instructions());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GameConfig = toml::from_str("level = \"hard\"").unwrap();
        assert_eq!(*config.level(), Some(Difficulty::Hard));
        assert!(config.first().is_none());
        assert!(*config.instructions());
    }

    #[test]
    fn test_unknown_toml_key_rejected() {
        assert!(toml::from_str::<GameConfig>("colour = \"red\"").is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let file: GameConfig = toml::from_str("level = \"easy\"\nseed = 1").unwrap();
        let config = file
            .with_vars(vars(&[(ENV_LEVEL, "WIZARD"), (ENV_FIRST, "computer")]))
            .unwrap();
        assert_eq!(*config.level(), Some(Difficulty::Wizard));
        assert_eq!(*config.first(), Some(FirstPlayer::Computer));
        assert_eq!(*config.seed(), Some(1));
    }

    #[test]
    fn test_bad_env_value_reported() {
        let err = GameConfig::default()
            .with_vars(vars(&[(ENV_SEED, "lots")]))
            .unwrap_err();
        assert!(err.message.contains(ENV_SEED));
    }

    #[test]
    fn test_cli_overrides_env() {
        let cli = Cli {
            level: Some(Difficulty::Medium),
            quiet: true,
            ..Cli::default()
        };
        let config = GameConfig::default()
            .with_vars(vars(&[(ENV_LEVEL, "hard"), (ENV_SEED, "7")]))
            .unwrap()
            .with_cli(&cli);
        assert_eq!(*config.level(), Some(Difficulty::Medium));
        assert_eq!(*config.seed(), Some(7));
        assert!(!*config.instructions());
    }

    #[test]
    fn test_first_player_resolution() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!FirstPlayer::Human.computer_starts(&mut rng));
        assert!(FirstPlayer::Computer.computer_starts(&mut rng));

        let flips: Vec<bool> = (0..64)
            .map(|_| FirstPlayer::Random.computer_starts(&mut rng))
            .collect();
        assert!(flips.contains(&true) && flips.contains(&false));
    }
}
