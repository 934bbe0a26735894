//! Tree traversal operations
//!
//! This module contains the fold operation and the structural queries built
//! on top of it.

use super::Expr;

/// Node type for expression tree folding
///
/// This enum represents the structure of an expression node with the results
/// already computed for its children. It's used with [`Expr::fold`] to
/// traverse and transform expression trees bottom-up.
///
/// # Examples
///
/// ```
/// use logic_compiler::{Expr, ExprNode};
///
/// let expr = Expr::parse("!(A * B) + C").unwrap();
/// let gates = expr.fold(&|node| match node {
///     ExprNode::Variable(_) => 0,
///     ExprNode::Not(inner) => inner + 1,
///     ExprNode::And(l, r)
///     | ExprNode::Or(l, r)
///     | ExprNode::Xor(l, r)
///     | ExprNode::Nand(l, r)
///     | ExprNode::Nor(l, r) => l + r + 1,
/// });
/// assert_eq!(gates, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode<T> {
    /// A variable with the given name
    Variable(char),
    /// Logical AND with results from left and right subtrees
    And(T, T),
    /// Logical OR with results from left and right subtrees
    Or(T, T),
    /// Exclusive OR with results from left and right subtrees
    Xor(T, T),
    /// Logical NOT with result from inner subtree
    Not(T),
    /// Negated AND with results from left and right subtrees
    Nand(T, T),
    /// Negated OR with results from left and right subtrees
    Nor(T, T),
}

impl Expr {
    /// Fold the expression tree depth-first from leaves to root
    ///
    /// The function `f` is called once per node, receiving an [`ExprNode`]
    /// that carries the accumulated results of the node's children.
    pub fn fold<T, F>(&self, f: &F) -> T
    where
        F: Fn(ExprNode<T>) -> T,
    {
        match self {
            Expr::Var(name) => f(ExprNode::Variable(*name)),
            Expr::And(l, r) => {
                let (l, r) = (l.fold(f), r.fold(f));
                f(ExprNode::And(l, r))
            }
            Expr::Or(l, r) => {
                let (l, r) = (l.fold(f), r.fold(f));
                f(ExprNode::Or(l, r))
            }
            Expr::Xor(l, r) => {
                let (l, r) = (l.fold(f), r.fold(f));
                f(ExprNode::Xor(l, r))
            }
            Expr::Nand(l, r) => {
                let (l, r) = (l.fold(f), r.fold(f));
                f(ExprNode::Nand(l, r))
            }
            Expr::Nor(l, r) => {
                let (l, r) = (l.fold(f), r.fold(f));
                f(ExprNode::Nor(l, r))
            }
            Expr::Not(inner) => {
                let inner = inner.fold(f);
                f(ExprNode::Not(inner))
            }
        }
    }

    /// Height of the tree; a lone variable has depth 1
    pub fn depth(&self) -> usize {
        self.fold(&|node: ExprNode<usize>| match node {
            ExprNode::Variable(_) => 1,
            ExprNode::Not(inner) => inner + 1,
            ExprNode::And(l, r)
            | ExprNode::Or(l, r)
            | ExprNode::Xor(l, r)
            | ExprNode::Nand(l, r)
            | ExprNode::Nor(l, r) => l.max(r) + 1,
        })
    }

    /// Total number of nodes (variables and gates)
    pub fn node_count(&self) -> usize {
        self.fold(&|node: ExprNode<usize>| match node {
            ExprNode::Variable(_) => 1,
            ExprNode::Not(inner) => inner + 1,
            ExprNode::And(l, r)
            | ExprNode::Or(l, r)
            | ExprNode::Xor(l, r)
            | ExprNode::Nand(l, r)
            | ExprNode::Nor(l, r) => l + r + 1,
        })
    }
}
