//! Two-level minimization of boolean functions
//!
//! This module turns an expression into its truth table, reduces the table to
//! prime implicants with the Quine-McCluskey method, and renders the result as
//! sum-of-products (from the minterms) or product-of-sums (from the maxterms).
//!
//! Minimization returns the union of *all* prime implicants rather than a
//! minimum cover: no essential prime selection is performed. The rendered
//! forms are therefore always equivalent to the input function but may
//! contain redundant terms.
//!
//! # Examples
//!
//! ```
//! use logic_compiler::cover::Minimized;
//! use logic_compiler::Expr;
//!
//! let expr = Expr::parse("A*B + A*B'").unwrap();
//! let result = Minimized::from_expr(&expr);
//! assert_eq!(result.sop, "A");
//! assert_eq!(result.pos, "(A)");
//! assert_eq!(result.minterms.len(), 32);
//! ```

// Module declarations
mod cubes;
mod error;
mod format;
mod minimisation;
mod minimizable;
mod truth_table;

// Public re-exports - core types
pub use cubes::{Implicant, FULL_MASK};
pub use error::TruthTableError;
pub use format::{format_pos, format_sop, CONSTANT_FALSE, CONSTANT_TRUE};
pub use minimisation::{find_prime_implicants, reduce_to_primes};
pub use minimizable::Minimizable;
pub use truth_table::{TruthTable, TRUTH_TABLE_ROWS};

use crate::expression::Expr;

/// A deduplicated collection of implicants
///
/// Insertion order is preserved and an implicant equal (by `value` and
/// `mask`) to one already present is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImplicantList {
    implicants: Vec<Implicant>,
}

impl ImplicantList {
    /// Create an empty list
    pub fn new() -> Self {
        ImplicantList::default()
    }

    /// Add an implicant unless an equal one is already present
    ///
    /// Returns `true` if the implicant was added.
    pub fn insert(&mut self, implicant: Implicant) -> bool {
        if self.contains(&implicant) {
            return false;
        }
        self.implicants.push(implicant);
        true
    }

    /// Whether an equal implicant is present
    pub fn contains(&self, implicant: &Implicant) -> bool {
        self.implicants.contains(implicant)
    }

    /// Number of implicants
    pub fn len(&self) -> usize {
        self.implicants.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }

    /// Iterate over the implicants in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Implicant> {
        self.implicants.iter()
    }

    /// The implicants as a slice
    pub fn as_slice(&self) -> &[Implicant] {
        &self.implicants
    }

    /// Consume the list, returning the underlying vector
    pub fn into_vec(self) -> Vec<Implicant> {
        self.implicants
    }

    /// Evaluate the sum of these implicants on one truth table row
    pub fn evaluate(&self, row: u8) -> bool {
        self.implicants.iter().any(|imp| imp.covers(row))
    }

    /// The rows covered by at least one implicant
    pub fn covered_rows(&self) -> TruthTable {
        let rows = (0..TRUTH_TABLE_ROWS)
            .filter(|row| self.evaluate(*row))
            .map(u64::from);
        // Every row is below TRUTH_TABLE_ROWS
        TruthTable::from_terms(rows).unwrap_or_default()
    }
}

impl FromIterator<Implicant> for ImplicantList {
    fn from_iter<I: IntoIterator<Item = Implicant>>(iter: I) -> Self {
        let mut list = ImplicantList::new();
        for implicant in iter {
            list.insert(implicant);
        }
        list
    }
}

impl<'a> IntoIterator for &'a ImplicantList {
    type Item = &'a Implicant;
    type IntoIter = std::slice::Iter<'a, Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.implicants.iter()
    }
}

/// Minimization results for one expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimized {
    /// Rows on which the expression is true
    pub minterms: TruthTable,
    /// Sum of products built from the minterm primes
    pub sop: String,
    /// Product of sums built from the maxterm primes
    pub pos: String,
}

impl Minimized {
    /// Minimize an expression into both two-level forms
    pub fn from_expr(expr: &Expr) -> Self {
        let minterms = TruthTable::minterms(expr);
        let sop = format_sop(&find_prime_implicants(&minterms));
        let maxterms = TruthTable::maxterms(expr);
        let pos = format_pos(&find_prime_implicants(&maxterms));
        Minimized { minterms, sop, pos }
    }

    /// Minimize the function whose true rows are `minterms`
    ///
    /// Every row not listed is a maxterm.
    pub fn from_table(minterms: TruthTable) -> Self {
        let sop = format_sop(&find_prime_implicants(&minterms));
        let pos = format_pos(&find_prime_implicants(&minterms.complement()));
        Minimized { minterms, sop, pos }
    }
}
