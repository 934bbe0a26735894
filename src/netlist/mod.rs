//! Gate-level netlists for graph visualization
//!
//! A netlist is a flat list of nodes (variables, gates and channel outputs)
//! and the edges wiring them together, in the element format understood by
//! Cytoscape.js:
//!
//! ```json
//! [{"data":{"id":"n0","label":"AND","type":"gate"}},
//!  {"data":{"id":"n1","label":"A","type":"var"}},
//!  {"data":{"source":"n1","target":"n0"}}]
//! ```
//!
//! Chains of the same associative operator (AND, OR, XOR) are flattened into
//! a single multi-input gate, so `A*B*C` produces one AND node with three
//! inputs rather than two nested two-input gates.
//!
//! # Examples
//!
//! ```
//! use logic_compiler::netlist::{generate, NetlistLimits};
//! use logic_compiler::Expr;
//!
//! let expr = Expr::parse("A*B*C").unwrap();
//! let netlist = generate("X", &expr, NetlistLimits::SINGLE).unwrap();
//!
//! // One AND gate, three variables and the output
//! assert_eq!(netlist.nodes().count(), 5);
//! assert_eq!(netlist.inputs_of(0).len(), 3);
//! ```

mod builder;
pub mod error;
mod generator;

pub use builder::{NetlistBuilder, NetlistLimits};
pub use error::{Capacity, NetlistError};
pub use generator::{generate, generate_combined};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Identifier of a netlist node, rendered as `n<index>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A logic gate
    Gate,
    /// An input variable
    Var,
    /// A channel output
    Output,
}

/// One entry of a netlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetlistElement {
    /// A vertex of the graph
    Node {
        id: NodeId,
        label: String,
        kind: NodeKind,
    },
    /// A wire from `source` into `target`
    Edge { source: NodeId, target: NodeId },
}

#[derive(Serialize)]
#[serde(untagged)]
enum ElementData<'a> {
    Node {
        id: NodeId,
        label: &'a str,
        #[serde(rename = "type")]
        kind: NodeKind,
    },
    Edge {
        source: NodeId,
        target: NodeId,
    },
}

impl Serialize for NetlistElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data = match self {
            NetlistElement::Node { id, label, kind } => ElementData::Node {
                id: *id,
                label,
                kind: *kind,
            },
            NetlistElement::Edge { source, target } => ElementData::Edge {
                source: *source,
                target: *target,
            },
        };
        let mut state = serializer.serialize_struct("NetlistElement", 1)?;
        state.serialize_field("data", &data)?;
        state.end()
    }
}

/// An ordered list of nodes and edges
///
/// Element order is deterministic: a node is always emitted before the
/// edges that reference it as a target, and ids follow a pre-order walk of
/// the expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Netlist {
    elements: Vec<NetlistElement>,
}

impl Netlist {
    /// All elements in emission order
    pub fn elements(&self) -> &[NetlistElement] {
        &self.elements
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the netlist has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over `(id, label, kind)` of every node
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &str, NodeKind)> + '_ {
        self.elements.iter().filter_map(|element| match element {
            NetlistElement::Node { id, label, kind } => Some((*id, label.as_str(), *kind)),
            NetlistElement::Edge { .. } => None,
        })
    }

    /// Iterate over `(source, target)` of every edge
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.elements.iter().filter_map(|element| match element {
            NetlistElement::Edge { source, target } => Some((*source, *target)),
            NetlistElement::Node { .. } => None,
        })
    }

    /// Look up the label and kind of a node
    pub fn node(&self, id: usize) -> Option<(&str, NodeKind)> {
        self.nodes()
            .find(|(node_id, _, _)| node_id.0 == id)
            .map(|(_, label, kind)| (label, kind))
    }

    /// Sources of every edge that ends at node `id`, in emission order
    pub fn inputs_of(&self, id: usize) -> Vec<NodeId> {
        self.edges()
            .filter(|(_, target)| target.0 == id)
            .map(|(source, _)| source)
            .collect()
    }

    /// Render as a compact JSON array
    pub fn to_json(&self) -> Result<String, NetlistError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Netlist> for Vec<NetlistElement> {
    fn from(netlist: Netlist) -> Self {
        netlist.elements
    }
}

#[cfg(test)]
mod tests;
