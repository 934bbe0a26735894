//! Display formatting and tree dumps for boolean expressions

use super::{Expr, Operator};
use std::fmt;

/// Position of a child relative to its parent operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Expr {
    /// Format with operator precedence context to minimize parentheses
    fn fmt_with_context(
        &self,
        f: &mut fmt::Formatter<'_>,
        parent: Option<(Operator, Side)>,
    ) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),

            Expr::Not(inner) => {
                write!(f, "!")?;
                // Variables and stacked NOTs read unambiguously without parens
                match inner.as_ref() {
                    Expr::Var(_) | Expr::Not(_) => inner.fmt_with_context(f, None),
                    _ => {
                        write!(f, "(")?;
                        inner.fmt_with_context(f, None)?;
                        write!(f, ")")
                    }
                }
            }

            Expr::And(l, r)
            | Expr::Or(l, r)
            | Expr::Xor(l, r)
            | Expr::Nand(l, r)
            | Expr::Nor(l, r) => {
                let Some(op) = self.operator() else {
                    return Ok(());
                };
                let needs_parens = match parent {
                    None => false,
                    Some((parent_op, side)) => {
                        op.precedence() < parent_op.precedence()
                            // Equal precedence groups to the left
                            || (side == Side::Right && op.precedence() == parent_op.precedence())
                    }
                };

                if needs_parens {
                    write!(f, "(")?;
                }
                l.fmt_with_context(f, Some((op, Side::Left)))?;
                write!(f, " {} ", op.symbol())?;
                r.fmt_with_context(f, Some((op, Side::Right)))?;
                if needs_parens {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }

    /// Render the tree one node per line, indented by depth
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_compiler::Expr;
    ///
    /// let expr = Expr::parse("A * !B").unwrap();
    /// assert_eq!(expr.tree(), "AND\n|-- VAR(A)\n|-- NOT\n|   |-- VAR(B)\n");
    /// ```
    pub fn tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, level: usize) {
        if level > 0 {
            out.push_str(&"|   ".repeat(level - 1));
            out.push_str("|-- ");
        }
        match self {
            Expr::Var(name) => {
                out.push_str("VAR(");
                out.push(*name);
                out.push_str(")\n");
            }
            _ => {
                if let Some(op) = self.operator() {
                    out.push_str(op.gate_label());
                }
                out.push('\n');
                for child in self.children() {
                    child.write_tree(out, level + 1);
                }
            }
        }
    }
}

/// Display formatting for boolean expressions
///
/// Uses the parser's own notation with minimal parentheses, so the output
/// parses back to an identical tree.
///
/// # Examples
///
/// ```
/// use logic_compiler::Expr;
///
/// let expr = Expr::parse("(A + B)C'").unwrap();
/// assert_eq!(expr.to_string(), "(A + B) * !C");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_context(f, None)
    }
}
