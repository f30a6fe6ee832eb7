use std::path::PathBuf;

/// Errors surfaced by the engine.
///
/// `NoLegalMove` is the only condition a caller sees on a well-formed board:
/// the board is full, which the caller must treat as end-of-game. The
/// `InvalidBoard` variants can only come out of [`Board::from_grid`]: the
/// surrounding service is expected to reject malformed payloads before the
/// engine is ever invoked.
///
/// [`Board::from_grid`]: crate::board::Board::from_grid
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no legal move: the board is full")]
    NoLegalMove,

    #[error("invalid board: expected {expected}x{expected} grid, got {rows}x{cols}")]
    BadDimensions {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid cell value {value} at ({row}, {col}): expected 0, 1, or 2")]
    BadCell { row: usize, col: usize, value: u8 },
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
