use std::path::{Path, PathBuf};

use crate::ai::{Difficulty, DEFAULT_MINIMAX_PROBABILITY};
use crate::error::ConfigError;

/// Longest allowed bot "thinking" pause.
pub const MAX_THINK_DELAY_MS: u64 = 10_000;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub log: LogConfig,
}

/// Settings for the automated opponent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Difficulty at startup; the UI can change it per turn.
    pub difficulty: Difficulty,
    /// Pause between the human move and the bot reply, in milliseconds.
    pub think_delay_ms: u64,
    /// Chance that Medium plays the minimax move instead of a random one.
    pub medium_minimax_probability: f64,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            difficulty: Difficulty::default(),
            think_delay_ms: 500,
            medium_minimax_probability: DEFAULT_MINIMAX_PROBABILITY,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` takes precedence.
    pub filter: String,
    /// Log destination. The terminal belongs to the UI, so logs go to a file.
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info".to_string(),
            file: PathBuf::from("tic_tac_toe.log"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.bot.medium_minimax_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Validation(
                "bot.medium_minimax_probability must be in [0, 1]".into(),
            ));
        }
        if self.bot.think_delay_ms > MAX_THINK_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "bot.think_delay_ms must be <= {MAX_THINK_DELAY_MS}"
            )));
        }
        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::Validation("log.filter must not be empty".into()));
        }
        if self.log.file.as_os_str().is_empty() {
            return Err(ConfigError::Validation("log.file must not be empty".into()));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}
