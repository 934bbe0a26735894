//! Error types for truth table construction

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when building a truth table from raw terms
///
/// These errors occur when a minterm list supplied directly (for example a
/// CSV typed into a K-map view) contains something other than row indices
/// of a 6-variable truth table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TruthTableError {
    /// A CSV entry that is not an unsigned integer
    #[error("invalid minterm {token:?} at entry {index}")]
    InvalidTerm {
        /// The text of the offending entry, trimmed
        token: Arc<str>,
        /// Zero-based index of the entry in the list
        index: usize,
    },
    /// A term outside `0..=63`
    #[error("minterm {value} is outside the truth table range 0..=63")]
    OutOfRange {
        /// The value that was supplied
        value: u64,
    },
}

impl From<TruthTableError> for io::Error {
    fn from(err: TruthTableError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
