//! Error types for the logic compiler
//!
//! Each stage has its own error type ([`ParseError`], [`VariableRangeError`],
//! [`TruthTableError`], [`NetlistError`], [`StateError`]); [`PipelineError`]
//! wraps them so a whole compilation can be driven with `?`. Every type
//! converts into [`std::io::Error`] for callers that only deal in I/O errors.

use std::io;
use thiserror::Error;

pub use crate::cover::TruthTableError;
pub use crate::expression::{ParseError, SyntaxErrorKind, VariableRangeError};
pub use crate::netlist::{Capacity, NetlistError};
pub use crate::pipeline::StateError;

/// The main error type for pipeline operations
///
/// Errors are always local to one channel: a failure while compiling one
/// equation never affects results already produced for the others.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The equation is not a valid expression
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The equation uses a variable outside A-F
    #[error(transparent)]
    VariableRange(#[from] VariableRangeError),

    /// A minterm list could not be read
    #[error(transparent)]
    TruthTable(#[from] TruthTableError),

    /// The netlist did not fit in its budget
    #[error(transparent)]
    Netlist(#[from] NetlistError),

    /// The shared channel state rejected an update
    #[error(transparent)]
    State(#[from] StateError),

    /// IO error wrapper
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl PipelineError {
    /// Byte offset in the equation that caused the failure, when known
    pub fn position(&self) -> Option<usize> {
        match self {
            PipelineError::Parse(err) => err.position,
            _ => None,
        }
    }
}

impl From<PipelineError> for io::Error {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Parse(e) => e.into(),
            PipelineError::VariableRange(e) => e.into(),
            PipelineError::TruthTable(e) => e.into(),
            PipelineError::Netlist(e) => e.into(),
            PipelineError::State(e) => e.into(),
            PipelineError::Io(e) => e,
        }
    }
}
