//! Error types for the shared channel state

use super::Channel;
use std::io;
use thiserror::Error;

/// Errors raised when updating or loading channel state
#[derive(Debug, Error)]
pub enum StateError {
    /// An equation longer than the per-channel limit
    #[error("equation for channel {channel} is {len} bytes, the limit is {max}")]
    EquationTooLong {
        /// Channel being written
        channel: Channel,
        /// Length of the rejected equation in bytes
        len: usize,
        /// Maximum accepted length
        max: usize,
    },

    /// A channel name other than X, Y, Z or W
    #[error("unknown channel {0:?}, expected one of X, Y, Z, W")]
    UnknownChannel(String),

    /// A state file line that is not `CHANNEL = EQUATION`
    #[error("malformed state line {line}: {content:?}")]
    Malformed {
        /// One-based line number
        line: usize,
        /// The offending line, trimmed
        content: String,
    },

    /// IO error while reading a state file
    #[error("failed to read channel state: {0}")]
    Io(#[from] io::Error),
}

impl From<StateError> for io::Error {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}
