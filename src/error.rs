use std::path::PathBuf;

use crate::game::Player;

/// Reasons a column cannot receive a disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range (expected 0-6)")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Errors raised by the learned-model strategy.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to load model weights from {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("failed to save model weights to {path}: {message}")]
    Save { path: PathBuf, message: String },

    #[error("model inference failed: {0}")]
    Inference(String),
}

/// Errors that can occur while persisting training samples.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed sample in {path} at line {line}: {source}")]
    MalformedSample {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot record move: {0}")]
    InvalidColumn(#[from] MoveError),
}

/// Errors a strategy can report instead of a move.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("no playable column remains")]
    NoMoveAvailable,

    #[error("waiting for human input")]
    AwaitingInput,

    #[error("human input channel closed")]
    InputClosed,

    #[error("illegal move: {0}")]
    Illegal(#[from] MoveError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors that abort a game or a simulation.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("{player} requested an illegal move {attempts} times in a row: {source}")]
    IllegalMove {
        player: Player,
        attempts: usize,
        source: MoveError,
    },

    #[error("{player} failed to choose a move: {source}")]
    Strategy {
        player: Player,
        source: StrategyError,
    },

    #[error("headless games cannot seat a human player")]
    HumanSeat,

    #[error("both seats are assigned to {0}")]
    DuplicateSeat(Player),

    #[error("sample recording failed: {0}")]
    Record(#[from] RecordError),
}
