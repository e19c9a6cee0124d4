//! Error type shared by the simulation core

use std::path::PathBuf;
use thiserror::Error;

/// All kinds of errors raised by the simulation core.
#[derive(Debug, Error)]
pub enum LifeError {
    /// A rule string contained something other than the digits 0-8.
    #[error("invalid rule {rule:?}: {reason}")]
    InvalidRule { rule: String, reason: String },

    /// A neighbor count outside 0..=8.
    #[error("neighbor count {0} is outside 0..=8")]
    OutOfRange(u8),

    /// Board size must be positive.
    #[error("board size must be positive, got {0}")]
    InvalidSize(usize),

    #[error("cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },

    /// A grid handed to the board does not have the board's dimensions.
    #[error("grid is {width}x{height}, board is {size}x{size}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        size: usize,
    },

    /// Malformed persisted state.
    #[error("malformed saved state: {0}")]
    Serialization(String),

    /// Persisted state could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for LifeError {
    fn from(err: serde_json::Error) -> Self {
        LifeError::Serialization(err.to_string())
    }
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;
