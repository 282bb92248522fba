//! Core types for graph representation.

use std::fmt;

/// Identifier of a node registered in a [`Graph`](super::Graph).
///
/// Ids are dense: a new node always receives the smallest id not currently
/// in use, so ids freed by removal are handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Get the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A directed wire from an output port of `from` to an input port of `to`.
///
/// A graph holds at most one connection per `(to, input)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: NodeId,
    pub output: usize,
    pub to: NodeId,
    pub input: usize,
}

impl Connection {
    /// Check whether this connection feeds the given input port.
    pub fn targets(&self, node: NodeId, input: usize) -> bool {
        self.to == node && self.input == input
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} -> {}.{}", self.from, self.output, self.to, self.input)
    }
}
