//! Minimizable trait for Boolean function minimization
//!
//! This module provides the public [`Minimizable`] trait, a uniform interface
//! for anything that can be reduced to its prime implicants: a truth table,
//! an expression, or an existing implicant list.

use super::format::{format_pos, format_sop};
use super::minimisation::{find_prime_implicants, reduce_to_primes};
use super::truth_table::TruthTable;
use super::ImplicantList;
use crate::expression::Expr;

/// Public trait for types that can be minimized with Quine-McCluskey
///
/// All methods take `&self` and return new values, leaving the original
/// untouched.
///
/// # Examples
///
/// ```
/// use logic_compiler::{Expr, Minimizable, TruthTable};
///
/// let expr = Expr::parse("A*B + A*B*C").unwrap();
/// assert_eq!(expr.to_sop(), "AB");
///
/// // Same function, same primes
/// let table = TruthTable::minterms(&expr);
/// assert_eq!(table.prime_implicants(), expr.prime_implicants());
/// ```
pub trait Minimizable {
    /// Every prime implicant of the ON-set
    fn prime_implicants(&self) -> ImplicantList;

    /// The ON-set primes rendered as a sum of products
    fn to_sop(&self) -> String {
        format_sop(&self.prime_implicants())
    }
}

impl Minimizable for TruthTable {
    fn prime_implicants(&self) -> ImplicantList {
        find_prime_implicants(self)
    }
}

impl Minimizable for ImplicantList {
    fn prime_implicants(&self) -> ImplicantList {
        reduce_to_primes(self.clone())
    }
}

/// Expressions minimize over their 64-row truth table
impl Minimizable for Expr {
    fn prime_implicants(&self) -> ImplicantList {
        find_prime_implicants(&TruthTable::minterms(self))
    }
}

impl Expr {
    /// The OFF-set primes of this expression rendered as a product of sums
    pub fn to_pos(&self) -> String {
        format_pos(&find_prime_implicants(&TruthTable::maxterms(self)))
    }
}
