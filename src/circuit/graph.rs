//! Graph storage: the node registry and the connection list.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use super::types::{Connection, NodeId};
use super::validate;
use crate::components::Constant;
use crate::error::{CircuitError, Result};
use crate::node::Node;
use crate::signal::Signal;

/// The owning registry of nodes plus the wires between their ports.
///
/// Nodes are kept in id order, which is also the order the propagation scan
/// visits them in. Connections are kept in the order they were made; that
/// order decides which downstream branch is followed first.
#[derive(Debug, Default)]
pub struct Graph {
    /// All nodes, keyed and ordered by id
    pub(super) nodes: BTreeMap<NodeId, Box<dyn Node>>,

    /// Wires in creation order
    pub(super) connections: Vec<Connection>,

    /// Ids below `next_id` that are currently unused
    free_ids: BTreeSet<NodeId>,

    /// One past the highest id ever handed out
    next_id: usize,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node and return its id.
    ///
    /// The id is the smallest non-negative integer not currently in use.
    pub fn add_node(&mut self, node: Box<dyn Node>) -> NodeId {
        let id = self.allocate_id();
        debug!(%id, kind = node.kind(), name = node.name(), "node added");
        self.nodes.insert(id, node);
        id
    }

    /// Box and register a concrete node.
    pub fn create_node<N: Node>(&mut self, node: N) -> NodeId {
        self.add_node(Box::new(node))
    }

    /// Unregister a node and hand it back.
    ///
    /// Connections that reference the node are left in place; they are
    /// inert during propagation until pruned or superseded.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Box<dyn Node>> {
        let node = self
            .nodes
            .remove(&id)
            .ok_or(CircuitError::UnknownNode { id })?;
        self.free_ids.insert(id);
        debug!(%id, kind = node.kind(), "node removed");
        Ok(node)
    }

    pub fn node(&self, id: NodeId) -> Result<&dyn Node> {
        self.nodes
            .get(&id)
            .map(|node| node.as_ref())
            .ok_or(CircuitError::UnknownNode { id })
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut dyn Node> {
        match self.nodes.get_mut(&id) {
            Some(node) => Ok(node.as_mut()),
            None => Err(CircuitError::UnknownNode { id }),
        }
    }

    /// Borrow a node as its concrete kind.
    ///
    /// Fails only for unknown ids; `Ok(None)` means the node is of another kind.
    pub fn node_as<T: Node>(&self, id: NodeId) -> Result<Option<&T>> {
        Ok(self.node(id)?.downcast_ref::<T>())
    }

    /// Mutably borrow a node as its concrete kind.
    pub fn node_as_mut<T: Node>(&mut self, id: NodeId) -> Result<Option<&mut T>> {
        Ok(self.node_mut(id)?.downcast_mut::<T>())
    }

    /// Set the value emitted by a [`Constant`] source.
    pub fn set_constant(&mut self, id: NodeId, signal: impl Into<Signal>) -> Result<()> {
        let node = self.node_mut(id)?;
        let actual = node.kind();
        match node.downcast_mut::<Constant>() {
            Some(constant) => {
                constant.set_output(signal);
                Ok(())
            }
            None => Err(CircuitError::WrongKind {
                id,
                expected: "Constant",
                actual,
            }),
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of all registered nodes in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// All connections in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Wire an output port to an input port.
    ///
    /// Any existing connection into `(to, input)` is replaced.
    pub fn connect(&mut self, from: NodeId, output: usize, to: NodeId, input: usize) -> Result<()> {
        let source = self.node(from)?;
        if output >= source.num_outputs() {
            return Err(CircuitError::output_out_of_range(
                source.name(),
                output,
                source.num_outputs(),
            ));
        }

        let target = self.node(to)?;
        if input >= target.num_inputs() {
            return Err(CircuitError::input_out_of_range(
                target.name(),
                input,
                target.num_inputs(),
            ));
        }

        if let Some(previous) = self.disconnect_input(to, input) {
            debug!(%previous, "connection superseded");
        }

        let connection = Connection {
            from,
            output,
            to,
            input,
        };
        debug!(%connection, "connected");
        self.connections.push(connection);
        Ok(())
    }

    /// Remove the connection feeding `(node, input)`, if any, and return it.
    pub fn disconnect_input(&mut self, node: NodeId, input: usize) -> Option<Connection> {
        let index = self
            .connections
            .iter()
            .position(|c| c.targets(node, input))?;
        Some(self.connections.remove(index))
    }

    /// Connections with at least one endpoint that is not registered.
    pub fn dangling_connections(&self) -> Vec<Connection> {
        validate::find_dangling_connections(self)
    }

    /// Drop every dangling connection and return how many were removed.
    pub fn prune_dangling_connections(&mut self) -> usize {
        let before = self.connections.len();
        let nodes = &self.nodes;
        self.connections
            .retain(|c| nodes.contains_key(&c.from) && nodes.contains_key(&c.to));
        let removed = before - self.connections.len();
        if removed > 0 {
            debug!(removed, "dangling connections pruned");
        }
        removed
    }

    /// Indices into `connections` of every wire leaving `node`, in order.
    pub(super) fn outgoing(&self, node: NodeId) -> Vec<usize> {
        self.connections
            .iter()
            .enumerate()
            .filter(|(_, c)| c.from == node)
            .map(|(i, _)| i)
            .collect()
    }

    fn allocate_id(&mut self) -> NodeId {
        if let Some(id) = self.free_ids.pop_first() {
            return id;
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// One node per line, in id order.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.values() {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{And, Memory, Not, Or};

    #[test]
    fn test_ids_are_dense_and_reused() {
        let mut graph = Graph::new();
        let a = graph.create_node(Not::new());
        let b = graph.create_node(Not::new());
        let c = graph.create_node(Not::new());
        assert_eq!((a, b, c), (NodeId(0), NodeId(1), NodeId(2)));

        graph.remove_node(b).unwrap();
        graph.remove_node(a).unwrap();
        assert_eq!(graph.create_node(Not::new()), NodeId(0));
        assert_eq!(graph.create_node(Not::new()), NodeId(1));
        assert_eq!(graph.create_node(Not::new()), NodeId(3));
        assert_eq!(graph.node_ids(), vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn test_unknown_id() {
        let mut graph = Graph::new();
        assert!(matches!(
            graph.node(NodeId(4)),
            Err(CircuitError::UnknownNode { id: NodeId(4) })
        ));
        assert!(graph.remove_node(NodeId(0)).is_err());
    }

    #[test]
    fn test_connect_checks_port_ranges() {
        let mut graph = Graph::new();
        let src = graph.create_node(Constant::new(true));
        let gate = graph.create_node(And::new(2));

        assert!(matches!(
            graph.connect(src, 1, gate, 0),
            Err(CircuitError::PortOutOfRange { index: 1, len: 1, .. })
        ));
        assert!(matches!(
            graph.connect(src, 0, gate, 2),
            Err(CircuitError::PortOutOfRange { index: 2, len: 2, .. })
        ));
        assert!(matches!(
            graph.connect(src, 0, NodeId(9), 0),
            Err(CircuitError::UnknownNode { .. })
        ));
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_connect_supersedes_existing_input() {
        let mut graph = Graph::new();
        let a = graph.create_node(Constant::new(true));
        let b = graph.create_node(Constant::new(false));
        let gate = graph.create_node(Or::new(2));

        graph.connect(a, 0, gate, 0).unwrap();
        graph.connect(b, 0, gate, 0).unwrap();

        let into_input: Vec<_> = graph
            .connections()
            .iter()
            .filter(|c| c.targets(gate, 0))
            .collect();
        assert_eq!(into_input.len(), 1);
        assert_eq!(into_input[0].from, b);
    }

    #[test]
    fn test_disconnect_input() {
        let mut graph = Graph::new();
        let a = graph.create_node(Constant::new(true));
        let gate = graph.create_node(Not::new());
        graph.connect(a, 0, gate, 0).unwrap();

        assert_eq!(graph.disconnect_input(gate, 0).map(|c| c.from), Some(a));
        assert_eq!(graph.disconnect_input(gate, 0), None);
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_remove_leaves_connections_until_pruned() {
        let mut graph = Graph::new();
        let a = graph.create_node(Constant::new(true));
        let gate = graph.create_node(Not::new());
        graph.connect(a, 0, gate, 0).unwrap();

        graph.remove_node(a).unwrap();
        assert_eq!(graph.connections().len(), 1);
        assert_eq!(graph.dangling_connections().len(), 1);

        assert_eq!(graph.prune_dangling_connections(), 1);
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_typed_access() {
        let mut graph = Graph::new();
        let memory = graph.create_node(Memory::new());
        let gate = graph.create_node(Not::new());

        assert!(graph.node_as::<Memory>(memory).unwrap().is_some());
        assert!(graph.node_as::<Memory>(gate).unwrap().is_none());
        assert!(graph.node_as::<Memory>(NodeId(5)).is_err());
    }

    #[test]
    fn test_set_constant() {
        let mut graph = Graph::new();
        let source = graph.create_node(Constant::new(true));
        let gate = graph.create_node(Not::new());

        graph.set_constant(source, 0.25).unwrap();
        assert_eq!(graph.node(source).unwrap().output(0).unwrap(), Signal::from_float(0.25));
        assert!(matches!(
            graph.set_constant(gate, true),
            Err(CircuitError::WrongKind { actual: "Not", .. })
        ));
    }

    #[test]
    fn test_display_lists_nodes_in_id_order() {
        let mut graph = Graph::new();
        graph.create_node(Constant::new(true).named("input"));
        graph.create_node(Not::new().named("not"));
        assert_eq!(graph.to_string(), "input: out 1\nnot: in *; out *\n");
    }
}
