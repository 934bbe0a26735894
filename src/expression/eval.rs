//! Evaluation and variable queries for boolean expressions

use super::error::VariableRangeError;
use super::Expr;
use std::collections::BTreeSet;

/// Number of variables that take part in truth tables (`A`..`F`)
pub const MAX_VARS: usize = 6;

/// Highest bit index a variable may address when evaluating
const MAX_MASK_BIT: u32 = 31;

impl Expr {
    /// Evaluate the expression against an input bitmask
    ///
    /// Bit `i` of `mask` is the value of variable `'A' + i`. A variable whose
    /// index falls outside `0..=31` evaluates to `false`; use
    /// [`check_variable_range`](Expr::check_variable_range) to reject such
    /// trees up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_compiler::Expr;
    ///
    /// let expr = Expr::parse("A ^ B").unwrap();
    /// assert!(expr.evaluate(0b01));
    /// assert!(expr.evaluate(0b10));
    /// assert!(!expr.evaluate(0b11));
    /// ```
    pub fn evaluate(&self, mask: u64) -> bool {
        match self {
            Expr::Var(name) => match variable_index(*name) {
                Some(index) => (mask >> index) & 1 == 1,
                None => false,
            },
            Expr::And(l, r) => l.evaluate(mask) && r.evaluate(mask),
            Expr::Or(l, r) => l.evaluate(mask) || r.evaluate(mask),
            Expr::Xor(l, r) => l.evaluate(mask) ^ r.evaluate(mask),
            Expr::Not(inner) => !inner.evaluate(mask),
            Expr::Nand(l, r) => !(l.evaluate(mask) && r.evaluate(mask)),
            Expr::Nor(l, r) => !(l.evaluate(mask) || r.evaluate(mask)),
        }
    }

    /// Collect the distinct variable names in alphabetical order
    pub fn variables(&self) -> BTreeSet<char> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<char>) {
        match self {
            Expr::Var(name) => {
                vars.insert(*name);
            }
            Expr::Not(inner) => inner.collect_variables(vars),
            Expr::And(l, r)
            | Expr::Or(l, r)
            | Expr::Xor(l, r)
            | Expr::Nand(l, r)
            | Expr::Nor(l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
        }
    }

    /// Reject trees that use a variable outside `A`..`F`
    ///
    /// Returns the alphabetically first offending variable.
    pub fn check_variable_range(&self) -> Result<(), VariableRangeError> {
        match self
            .variables()
            .into_iter()
            .find(|name| !matches!(variable_index(*name), Some(i) if (i as usize) < MAX_VARS))
        {
            Some(name) => Err(VariableRangeError { name }),
            None => Ok(()),
        }
    }
}

/// Bit index of a variable name, or `None` when it cannot address a mask bit
fn variable_index(name: char) -> Option<u32> {
    let index = (name as u32).checked_sub('A' as u32)?;
    (index <= MAX_MASK_BIT).then_some(index)
}
