//! Boolean expression trees with parsing, evaluation and pretty printing
//!
//! This module provides the abstract syntax tree used by every stage of the
//! compilation pipeline. An [`Expr`] is an owned recursive tree: each operator
//! node exclusively owns its children, so dropping the root releases the whole
//! tree and no subtree can be shared or form a cycle.
//!
//! # Main Types
//!
//! - [`Expr`] - The tree itself, over single-letter variables `A`..`Z`
//! - [`Operator`] - The gate kinds an operator node can carry
//! - [`ExprNode`] - Borrowed view of a node used by [`Expr::fold`]
//!
//! # Quick Start
//!
//! ## Parsing from Strings
//!
//! ```
//! use logic_compiler::Expr;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Implicit AND and postfix NOT are both supported
//! let expr = Expr::parse("AB' + C(D ^ E)")?;
//! println!("{}", expr);  // A * !B + C * (D ^ E)
//! # Ok(())
//! # }
//! ```
//!
//! ## Building Programmatically
//!
//! ```
//! use logic_compiler::Expr;
//!
//! let a = Expr::var('A');
//! let b = Expr::var('B');
//! let c = Expr::var('C');
//!
//! // Operator overloading: `*` AND, `+` OR, `^` XOR, `!` NOT
//! let expr = a.clone() * b + !a * c;
//!
//! // Bit 0 is A, bit 1 is B, bit 2 is C
//! assert!(expr.evaluate(0b011));
//! assert!(expr.evaluate(0b100));
//! assert!(!expr.evaluate(0b001));
//! ```

// Submodules
mod ast;
mod display;
pub mod error;
mod eval;
mod operators;
mod parser;

pub use ast::ExprNode;
pub use error::{ParseError, SyntaxErrorKind, VariableRangeError};
pub use eval::MAX_VARS;
pub use parser::{parse, parse_with_limit, DEFAULT_MAX_DEPTH};

/// Gate kind carried by an operator node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Logical AND (`*`)
    And,
    /// Logical OR (`+`)
    Or,
    /// Exclusive OR (`^`)
    Xor,
    /// Logical NOT (`!` prefix or `'` postfix)
    Not,
    /// Negated AND (`%`)
    Nand,
    /// Negated OR (`$`)
    Nor,
}

impl Operator {
    /// Binding strength used by the parser; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 4,
            Operator::And | Operator::Nand => 3,
            Operator::Or | Operator::Xor | Operator::Nor => 2,
        }
    }

    /// Whether chains of this operator may be flattened into a single N-ary gate
    pub fn is_associative(self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Xor)
    }

    /// Source symbol accepted by the parser (prefix form for NOT)
    pub fn symbol(self) -> char {
        match self {
            Operator::And => '*',
            Operator::Or => '+',
            Operator::Xor => '^',
            Operator::Not => '!',
            Operator::Nand => '%',
            Operator::Nor => '$',
        }
    }

    /// Gate name shown on netlist nodes
    pub fn gate_label(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Not => "NOT",
            Operator::Nand => "NAND",
            Operator::Nor => "NOR",
        }
    }

    pub(crate) fn from_symbol(c: char) -> Option<Self> {
        match c {
            '*' => Some(Operator::And),
            '+' => Some(Operator::Or),
            '^' => Some(Operator::Xor),
            '!' => Some(Operator::Not),
            '%' => Some(Operator::Nand),
            '$' => Some(Operator::Nor),
            _ => None,
        }
    }
}

/// A boolean expression tree
///
/// Variables are single uppercase letters. Bit `i` of an input mask drives
/// variable `'A' + i`, so only `A`..`F` take part in the 64-row truth tables
/// produced by the minimizer.
///
/// # Examples
///
/// ## Method-based API
/// ```
/// use logic_compiler::Expr;
///
/// let a = Expr::var('A');
/// let b = Expr::var('B');
/// let nand = a.nand(b);
/// assert!(!nand.evaluate(0b11));
/// assert!(nand.evaluate(0b01));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A named variable
    Var(char),
    /// Logical AND of two expressions
    And(Box<Expr>, Box<Expr>),
    /// Logical OR of two expressions
    Or(Box<Expr>, Box<Expr>),
    /// Exclusive OR of two expressions
    Xor(Box<Expr>, Box<Expr>),
    /// Logical NOT of an expression
    Not(Box<Expr>),
    /// Negated AND of two expressions
    Nand(Box<Expr>, Box<Expr>),
    /// Negated OR of two expressions
    Nor(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Create a variable expression, normalising the name to uppercase
    pub fn var(name: char) -> Self {
        Expr::Var(name.to_ascii_uppercase())
    }

    /// Parse an expression using the default nesting limit
    ///
    /// See [`parse`] for the accepted grammar.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse(input)
    }

    /// Logical AND with another expression
    pub fn and(self, other: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    /// Logical OR with another expression
    pub fn or(self, other: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Exclusive OR with another expression
    pub fn xor(self, other: Expr) -> Self {
        Expr::Xor(Box::new(self), Box::new(other))
    }

    /// Negated AND with another expression
    pub fn nand(self, other: Expr) -> Self {
        Expr::Nand(Box::new(self), Box::new(other))
    }

    /// Negated OR with another expression
    pub fn nor(self, other: Expr) -> Self {
        Expr::Nor(Box::new(self), Box::new(other))
    }

    /// Logical NOT of this expression
    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Build a binary node for `op`
    ///
    /// Returns `None` for [`Operator::Not`], which takes a single operand.
    pub fn binary(op: Operator, left: Expr, right: Expr) -> Option<Self> {
        let (l, r) = (Box::new(left), Box::new(right));
        match op {
            Operator::And => Some(Expr::And(l, r)),
            Operator::Or => Some(Expr::Or(l, r)),
            Operator::Xor => Some(Expr::Xor(l, r)),
            Operator::Nand => Some(Expr::Nand(l, r)),
            Operator::Nor => Some(Expr::Nor(l, r)),
            Operator::Not => None,
        }
    }

    /// The operator at the root of this tree, or `None` for a variable
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expr::Var(_) => None,
            Expr::And(..) => Some(Operator::And),
            Expr::Or(..) => Some(Operator::Or),
            Expr::Xor(..) => Some(Operator::Xor),
            Expr::Not(_) => Some(Operator::Not),
            Expr::Nand(..) => Some(Operator::Nand),
            Expr::Nor(..) => Some(Operator::Nor),
        }
    }

    /// Direct children of this node in left-to-right order
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) => Vec::new(),
            Expr::Not(inner) => vec![inner.as_ref()],
            Expr::And(l, r)
            | Expr::Or(l, r)
            | Expr::Xor(l, r)
            | Expr::Nand(l, r)
            | Expr::Nor(l, r) => vec![l.as_ref(), r.as_ref()],
        }
    }
}
