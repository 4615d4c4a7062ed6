use std::path::PathBuf;

use crate::game::MoveError;

/// Errors that can occur when the bot is asked for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveSelectorError {
    #[error("no empty cell left to play")]
    NoLegalMove,
}

/// Errors surfaced at the session boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("bot could not move: {0}")]
    Selector(#[from] MoveSelectorError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
