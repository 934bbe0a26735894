//! Expression to netlist conversion

use super::builder::{NetlistBuilder, NetlistLimits};
use super::error::NetlistError;
use super::{Netlist, NodeId, NodeKind};
use crate::expression::{Expr, Operator};

/// Generate the netlist of one channel
///
/// The expression is walked in pre-order. The output node labelled `label`
/// is emitted after the tree, followed by the edge from the tree root.
///
/// # Errors
///
/// Returns [`NetlistError::CapacityExceeded`] if the netlist would not fit
/// in `limits`.
pub fn generate(label: &str, expr: &Expr, limits: NetlistLimits) -> Result<Netlist, NetlistError> {
    let mut builder = NetlistBuilder::new(limits);
    add_tree(&mut builder, label, expr)?;
    Ok(builder.finish())
}

/// Generate one netlist holding several channels
///
/// Channels share a single id space and budget. A channel whose expression
/// is `None` contributes nothing, not even its output node.
///
/// # Examples
///
/// ```
/// use logic_compiler::netlist::{generate_combined, NetlistLimits, NodeKind};
/// use logic_compiler::Expr;
///
/// let x = Expr::parse("A + B").unwrap();
/// let z = Expr::parse("C'").unwrap();
/// let netlist = generate_combined(
///     &[("X", Some(&x)), ("Y", None), ("Z", Some(&z))],
///     NetlistLimits::COMBINED,
/// )
/// .unwrap();
///
/// let outputs: Vec<&str> = netlist
///     .nodes()
///     .filter(|(_, _, kind)| *kind == NodeKind::Output)
///     .map(|(_, label, _)| label)
///     .collect();
/// assert_eq!(outputs, ["X", "Z"]);
/// ```
pub fn generate_combined(
    channels: &[(&str, Option<&Expr>)],
    limits: NetlistLimits,
) -> Result<Netlist, NetlistError> {
    let mut builder = NetlistBuilder::new(limits);
    for (label, expr) in channels {
        if let Some(expr) = expr {
            add_tree(&mut builder, label, expr)?;
        }
    }
    Ok(builder.finish())
}

fn add_tree(builder: &mut NetlistBuilder, label: &str, expr: &Expr) -> Result<(), NetlistError> {
    let root = visit(builder, expr)?;
    let output = builder.allocate_id();
    builder.push_node(output, label, NodeKind::Output)?;
    builder.push_edge(root, output)
}

/// Emit a node for `expr` and everything below it, returning its id
fn visit(builder: &mut NetlistBuilder, expr: &Expr) -> Result<NodeId, NetlistError> {
    let id = builder.allocate_id();
    let (op, left, right) = match expr {
        Expr::Var(name) => {
            builder.push_node(id, name.to_string(), NodeKind::Var)?;
            return Ok(id);
        }
        Expr::Not(inner) => {
            builder.push_node(id, Operator::Not.gate_label(), NodeKind::Gate)?;
            let child = visit(builder, inner)?;
            builder.push_edge(child, id)?;
            return Ok(id);
        }
        Expr::And(l, r) => (Operator::And, l, r),
        Expr::Or(l, r) => (Operator::Or, l, r),
        Expr::Xor(l, r) => (Operator::Xor, l, r),
        Expr::Nand(l, r) => (Operator::Nand, l, r),
        Expr::Nor(l, r) => (Operator::Nor, l, r),
    };

    builder.push_node(id, op.gate_label(), NodeKind::Gate)?;
    collect_inputs(builder, left, id, op)?;
    collect_inputs(builder, right, id, op)?;
    Ok(id)
}

/// Wire `expr` into the gate `parent`, flattening same-operator chains
fn collect_inputs(
    builder: &mut NetlistBuilder,
    expr: &Expr,
    parent: NodeId,
    parent_op: Operator,
) -> Result<(), NetlistError> {
    if parent_op.is_associative() && expr.operator() == Some(parent_op) {
        for child in expr.children() {
            collect_inputs(builder, child, parent, parent_op)?;
        }
        return Ok(());
    }

    let child = visit(builder, expr)?;
    builder.push_edge(child, parent)
}
