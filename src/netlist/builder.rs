//! Length-checked netlist accumulation

use super::error::{Capacity, NetlistError};
use super::{Netlist, NetlistElement, NodeId, NodeKind};

/// Budget for one generated netlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetlistLimits {
    /// Maximum length of the serialized JSON array, brackets included
    pub max_bytes: usize,
    /// Maximum number of nodes plus edges
    pub max_elements: usize,
}

impl NetlistLimits {
    /// Limits for a single-channel netlist
    pub const SINGLE: NetlistLimits = NetlistLimits {
        max_bytes: 8 * 1024,
        max_elements: 512,
    };

    /// Limits for the combined four-channel netlist
    pub const COMBINED: NetlistLimits = NetlistLimits {
        max_bytes: 64 * 1024,
        max_elements: 4096,
    };

    /// No practical limit
    pub const UNBOUNDED: NetlistLimits = NetlistLimits {
        max_bytes: usize::MAX,
        max_elements: usize::MAX,
    };
}

impl Default for NetlistLimits {
    fn default() -> Self {
        NetlistLimits::SINGLE
    }
}

/// Accumulates netlist elements while tracking the serialized size
///
/// Every push is checked against the limits before the element is stored,
/// so a builder never holds more than its budget allows. Node ids are handed
/// out sequentially and are shared by everything pushed into one builder.
#[derive(Debug)]
pub struct NetlistBuilder {
    elements: Vec<NetlistElement>,
    limits: NetlistLimits,
    next_id: usize,
    bytes: usize,
}

impl NetlistBuilder {
    /// Create an empty builder
    pub fn new(limits: NetlistLimits) -> Self {
        NetlistBuilder {
            elements: Vec::new(),
            limits,
            next_id: 0,
            // "[]"
            bytes: 2,
        }
    }

    /// Reserve the next node id
    pub fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a node
    pub fn push_node(
        &mut self,
        id: NodeId,
        label: impl Into<String>,
        kind: NodeKind,
    ) -> Result<(), NetlistError> {
        self.push(NetlistElement::Node {
            id,
            label: label.into(),
            kind,
        })
    }

    /// Append an edge from `source` into `target`
    pub fn push_edge(&mut self, source: NodeId, target: NodeId) -> Result<(), NetlistError> {
        self.push(NetlistElement::Edge { source, target })
    }

    fn push(&mut self, element: NetlistElement) -> Result<(), NetlistError> {
        if self.elements.len() >= self.limits.max_elements {
            return Err(NetlistError::CapacityExceeded {
                capacity: Capacity::Elements,
                limit: self.limits.max_elements,
            });
        }

        let separator = usize::from(!self.elements.is_empty());
        let added = serde_json::to_vec(&element)?.len() + separator;
        let total = self.bytes.saturating_add(added);
        if total > self.limits.max_bytes {
            return Err(NetlistError::CapacityExceeded {
                capacity: Capacity::Bytes,
                limit: self.limits.max_bytes,
            });
        }

        self.bytes = total;
        self.elements.push(element);
        Ok(())
    }

    /// Serialized length of the elements pushed so far
    pub fn serialized_len(&self) -> usize {
        self.bytes
    }

    /// Number of elements pushed so far
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Finish building
    pub fn finish(self) -> Netlist {
        Netlist {
            elements: self.elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut builder = NetlistBuilder::new(NetlistLimits::SINGLE);
        assert_eq!(builder.allocate_id(), NodeId(0));
        assert_eq!(builder.allocate_id(), NodeId(1));
        assert_eq!(builder.allocate_id(), NodeId(2));
    }

    #[test]
    fn test_serialized_len_tracks_json() {
        let mut builder = NetlistBuilder::new(NetlistLimits::UNBOUNDED);
        assert_eq!(builder.serialized_len(), "[]".len());

        let a = builder.allocate_id();
        let out = builder.allocate_id();
        builder.push_node(a, "A", NodeKind::Var).unwrap();
        builder.push_node(out, "X", NodeKind::Output).unwrap();
        builder.push_edge(a, out).unwrap();

        let len = builder.serialized_len();
        let json = builder.finish().to_json().unwrap();
        assert_eq!(len, json.len());
    }

    #[test]
    fn test_element_limit() {
        let limits = NetlistLimits {
            max_bytes: usize::MAX,
            max_elements: 1,
        };
        let mut builder = NetlistBuilder::new(limits);
        let id = builder.allocate_id();
        builder.push_node(id, "A", NodeKind::Var).unwrap();
        let err = builder.push_edge(id, id).unwrap_err();
        assert!(matches!(
            err,
            NetlistError::CapacityExceeded {
                capacity: Capacity::Elements,
                limit: 1
            }
        ));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_byte_limit_rejects_without_storing() {
        let limits = NetlistLimits {
            max_bytes: 60,
            max_elements: usize::MAX,
        };
        let mut builder = NetlistBuilder::new(limits);
        let id = builder.allocate_id();
        // {"data":{"id":"n0","label":"A","type":"var"}} is 45 bytes
        builder.push_node(id, "A", NodeKind::Var).unwrap();
        let before = builder.serialized_len();
        let err = builder.push_node(id, "B", NodeKind::Var).unwrap_err();
        assert!(matches!(
            err,
            NetlistError::CapacityExceeded {
                capacity: Capacity::Bytes,
                ..
            }
        ));
        assert_eq!(builder.serialized_len(), before);
        assert_eq!(builder.len(), 1);
    }
}
