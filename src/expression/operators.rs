//! Operator overloading for boolean expressions
//!
//! The overloaded operators mirror the parser's notation: `*` AND, `+` OR,
//! `^` XOR and `!` NOT. Reference forms clone their operands, since every
//! node owns its children outright.

use super::Expr;
use std::ops::{Add, BitXor, Mul, Not};

/// Logical AND operator: `a * b`
///
/// # Examples
///
/// ```
/// use logic_compiler::Expr;
///
/// let a = Expr::var('A');
/// let b = Expr::var('B');
/// assert_eq!(a.clone() * b.clone(), a.and(b));
/// ```
impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        self.and(rhs)
    }
}

/// Logical AND operator for references: `&a * &b`
impl Mul for &Expr {
    type Output = Expr;

    fn mul(self, rhs: &Expr) -> Expr {
        self.clone().and(rhs.clone())
    }
}

/// Logical OR operator: `a + b`
impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        self.or(rhs)
    }
}

/// Logical OR operator for references: `&a + &b`
impl Add for &Expr {
    type Output = Expr;

    fn add(self, rhs: &Expr) -> Expr {
        self.clone().or(rhs.clone())
    }
}

/// Exclusive OR operator: `a ^ b`
impl BitXor for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Expr) -> Expr {
        self.xor(rhs)
    }
}

/// Exclusive OR operator for references: `&a ^ &b`
impl BitXor for &Expr {
    type Output = Expr;

    fn bitxor(self, rhs: &Expr) -> Expr {
        self.clone().xor(rhs.clone())
    }
}

/// Logical NOT operator: `!a`
impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        self.negate()
    }
}

/// Logical NOT operator for references: `!&a`
impl Not for &Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        self.clone().negate()
    }
}
