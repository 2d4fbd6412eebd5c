use std::path::PathBuf;

/// Errors raised by [`Board::put`](crate::game::Board::put) for an illegal target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("({x}, {y}) is outside the {scale}x{scale} board")]
    OutOfBounds { x: i64, y: i64, scale: usize },

    #[error("({x}, {y}) is already occupied")]
    Occupied { x: usize, y: usize },
}

/// Raised when a player is asked to move on a board with no empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no legal move left on the board")]
pub struct NoLegalMove;

/// Errors a player can report from `decide_move`.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    NoLegalMove(#[from] NoLegalMove),

    #[error("move input closed before a legal move was entered")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a match. Both variants point at a defective player.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("{player} produced an illegal move: {source}")]
    IllegalMove { player: String, source: MoveError },

    #[error("{player} failed to decide a move: {source}")]
    Player { player: String, source: PlayerError },
}

/// Errors raised by the step environment.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("action {action} is not a legal cell index")]
    IllegalAction { action: usize },

    #[error("step called on a finished episode")]
    EpisodeFinished,

    #[error("learner has {expected} actions but the state has {found} cells")]
    ActionSpace { expected: usize, found: usize },

    #[error("opponent failed: {0}")]
    Opponent(#[from] PlayerError),

    #[error("opponent produced an illegal move: {0}")]
    OpponentMove(#[from] MoveError),
}

/// Errors surfaced by a training run.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("learning episode failed: {0}")]
    Env(#[from] EnvError),

    #[error("evaluation match failed: {0}")]
    Game(#[from] GameError),

    #[error("failed to load opponent weights: {0}")]
    OpponentWeights(#[from] PersistenceError),

    #[error("learner has {found} actions but a {scale}x{scale} board needs {expected}")]
    ActionSpace {
        scale: usize,
        expected: usize,
        found: usize,
    },
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

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur when loading or saving estimator weights.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to read weights from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write weights to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse weights from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("weights do not match a {scale}x{scale} board: {reason}")]
    Shape { scale: usize, reason: String },
}
