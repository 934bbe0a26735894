//! Error types for boolean expression parsing and validation

use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// What went wrong while parsing an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// The input contained no operands at all
    #[error("expression is empty")]
    Empty,
    /// A character outside the expression alphabet
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// A `(` that is never closed
    #[error("unclosed '('")]
    UnclosedParen,
    /// A `)` with no matching `(`
    #[error("unmatched ')'")]
    UnmatchedParen,
    /// An operator found fewer operands than it needs
    #[error("operator '{0}' is missing an operand")]
    MissingOperand(char),
    /// A postfix `'` with nothing before it to negate
    #[error("postfix NOT does not follow an operand")]
    DanglingPostfix,
    /// A prefix `!` written after an operand instead of before one
    #[error("prefix NOT follows an operand")]
    MisplacedPrefix,
    /// Operands left over with no operator joining them
    #[error("{0} operands are not joined by an operator")]
    UnjoinedOperands(usize),
    /// The tree would exceed the configured nesting limit
    #[error("nesting exceeds the limit of {0}")]
    TooDeep(usize),
}

/// Errors that can occur when parsing a boolean expression
///
/// This error type is returned by [`parse`](super::parse) and
/// [`Expr::parse`](super::Expr::parse). No partially built tree survives a
/// failed parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The specific syntax problem
    pub kind: SyntaxErrorKind,
    /// The original input string that failed to parse
    pub input: Arc<str>,
    /// Byte offset of the offending token, when known
    pub position: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(kind: SyntaxErrorKind, input: &str, position: Option<usize>) -> Self {
        ParseError {
            kind,
            input: Arc::from(input),
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.position {
            write!(
                f,
                "Failed to parse boolean expression at position {}: {}. Input: {:?}",
                pos, self.kind, self.input
            )
        } else {
            write!(
                f,
                "Failed to parse boolean expression: {}. Input: {:?}",
                self.kind, self.input
            )
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<ParseError> for io::Error {
    fn from(err: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// A variable letter that falls outside the 6-variable truth table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("variable '{name}' is outside the supported range A-F")]
pub struct VariableRangeError {
    /// The offending variable name
    pub name: char,
}

impl From<VariableRangeError> for io::Error {
    fn from(err: VariableRangeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
