//! Centralized error types for the game.
//!
//! Each layer has its own error enum; [`GameError`] aggregates them for callers that
//! just want to bubble failures up.

use std::io;

use crate::game::state::GameStage;

/// Main error type for the game.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Level error: {0}")]
    Level(#[from] LevelLoadError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Error type for level loading.
///
/// Rows and columns are 1-based, as a level author would count them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelLoadError {
    #[error("Malformed level header: {0}")]
    MalformedHeader(String),
    #[error("Level declares {expected} rows but has {found}")]
    RowCountMismatch { expected: usize, found: usize },
    #[error("Row {row} has {found} columns, expected {expected}")]
    ColumnCountMismatch { row: usize, expected: usize, found: usize },
    #[error("Unknown symbol {symbol:?} in row {row}, col {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

/// Errors raised while starting or driving a round.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Level has room for {available} players, {requested} requested")]
    InsufficientSpawnPoints { requested: usize, available: usize },
    #[error("Level allows at most {max} players, {requested} requested")]
    TooManyPlayers { requested: usize, max: usize },
    #[error("Cannot {action} while {stage:?}")]
    InvalidStage { action: &'static str, stage: GameStage },
}

/// Errors decoding network messages.
///
/// An unrecognized `action` is not an error; it decodes to `Message::Unknown`.
#[derive(thiserror::Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Figment(Box::new(error))
    }
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
