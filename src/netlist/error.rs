//! Error types for netlist generation

use std::fmt;
use std::io;
use thiserror::Error;

/// Which netlist budget was exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Bytes of the serialized JSON element array
    Bytes,
    /// Number of nodes and edges
    Elements,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Bytes => write!(f, "serialized bytes"),
            Capacity::Elements => write!(f, "elements"),
        }
    }
}

/// Errors that can occur while generating a netlist
///
/// A failed generation never yields a partial netlist.
#[derive(Debug, Error)]
pub enum NetlistError {
    /// The netlist would not fit in the configured budget
    #[error("netlist exceeds the limit of {limit} {capacity}")]
    CapacityExceeded {
        /// The budget that ran out
        capacity: Capacity,
        /// The configured maximum
        limit: usize,
    },

    /// An element could not be serialized
    #[error("failed to serialize netlist element: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<NetlistError> for io::Error {
    fn from(err: NetlistError) -> Self {
        match err {
            NetlistError::CapacityExceeded { .. } => io::Error::new(io::ErrorKind::OutOfMemory, err),
            NetlistError::Serialize(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_display() {
        let err = NetlistError::CapacityExceeded {
            capacity: Capacity::Bytes,
            limit: 8192,
        };
        assert_eq!(
            err.to_string(),
            "netlist exceeds the limit of 8192 serialized bytes"
        );
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::OutOfMemory);
    }
}
