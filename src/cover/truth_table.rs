//! Truth tables over the six input variables

use super::error::TruthTableError;
use crate::expression::Expr;
use serde::Serialize;
use std::sync::Arc;

/// Number of rows in a 6-variable truth table
pub const TRUTH_TABLE_ROWS: u8 = 64;

/// The rows of a truth table on which a function takes one particular value
///
/// Each term is a 6-bit input assignment where bit `i` is variable `'A' + i`.
/// Terms are kept sorted and distinct. Depending on how the table was built
/// the terms are minterms (rows where the function is true) or maxterms
/// (rows where it is false); maxterms of `f` are the minterms of `!f`.
///
/// # Examples
///
/// ```
/// use logic_compiler::{Expr, TruthTable};
///
/// let expr = Expr::parse("A * B * C * D * E * F").unwrap();
/// assert_eq!(TruthTable::minterms(&expr).terms(), &[63]);
/// assert_eq!(TruthTable::maxterms(&expr).len(), 63);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TruthTable {
    terms: Vec<u8>,
}

impl TruthTable {
    /// Rows on which `expr` evaluates to true
    pub fn minterms(expr: &Expr) -> Self {
        Self::collect(expr, true)
    }

    /// Rows on which `expr` evaluates to false
    pub fn maxterms(expr: &Expr) -> Self {
        Self::collect(expr, false)
    }

    fn collect(expr: &Expr, value: bool) -> Self {
        let terms = (0..TRUTH_TABLE_ROWS)
            .filter(|&row| expr.evaluate(u64::from(row)) == value)
            .collect();
        TruthTable { terms }
    }

    /// Build a table from explicit row indices
    ///
    /// Duplicates are dropped and the result is sorted. Any value outside
    /// `0..=63` is rejected.
    pub fn from_terms<I>(terms: I) -> Result<Self, TruthTableError>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut rows = Vec::new();
        for value in terms {
            if value >= u64::from(TRUTH_TABLE_ROWS) {
                return Err(TruthTableError::OutOfRange { value });
            }
            rows.push(value as u8);
        }
        rows.sort_unstable();
        rows.dedup();
        Ok(TruthTable { terms: rows })
    }

    /// Parse a comma-separated minterm list such as `"0, 15, 63"`
    ///
    /// Whitespace around entries and empty entries are ignored, so an empty
    /// string yields the constant-false table.
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_compiler::TruthTable;
    ///
    /// let table = TruthTable::from_csv("3, 1,, 3").unwrap();
    /// assert_eq!(table.terms(), &[1, 3]);
    /// assert!(TruthTable::from_csv("1, 64").is_err());
    /// ```
    pub fn from_csv(csv: &str) -> Result<Self, TruthTableError> {
        let mut values = Vec::new();
        for (index, token) in csv.split(',').map(str::trim).enumerate() {
            if token.is_empty() {
                continue;
            }
            let value = token
                .parse::<u64>()
                .map_err(|_| TruthTableError::InvalidTerm {
                    token: Arc::from(token),
                    index,
                })?;
            values.push(value);
        }
        Self::from_terms(values)
    }

    /// The terms in ascending order
    pub fn terms(&self) -> &[u8] {
        &self.terms
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the table has no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `row` is one of the terms
    pub fn contains(&self, row: u8) -> bool {
        self.terms.binary_search(&row).is_ok()
    }

    /// The rows that are not terms of this table
    pub fn complement(&self) -> Self {
        let terms = (0..TRUTH_TABLE_ROWS)
            .filter(|row| !self.contains(*row))
            .collect();
        TruthTable { terms }
    }
}

impl From<TruthTable> for Vec<u8> {
    fn from(table: TruthTable) -> Self {
        table.terms
    }
}
