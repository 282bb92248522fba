//! The propagation pass.
//!
//! One call to [`Graph::update`] is one simulation tick:
//!
//! 1. Every node gets `before_calculate()`, in id order.
//! 2. The scan walks the nodes in id order. Each node that is not yet
//!    calculated and whose predicate holds starts a depth-first descent.
//! 3. The descent calculates the node, then walks its outgoing connections
//!    in creation order. Each one copies the output signal into the
//!    destination input; a destination that is not yet calculated and is now
//!    ready is descended into immediately, before the remaining connections
//!    of the current node.
//!
//! This is deliberately not a topological sort. A node fires as soon as the
//! walk finds it ready. Nodes that never become ready (missing inputs,
//! closed feedback loops) keep invalid outputs for the tick; that is the
//! steady state, not an error. Every node is calculated at most once per
//! pass, so a pass is bounded by the node and connection counts.
//!
//! The descent uses an explicit stack of frames instead of call-stack
//! recursion, so deep chains cannot overflow.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::graph::Graph;
use super::types::NodeId;
use crate::error::{CircuitError, Result};
use crate::node::Node;

/// Outcome of one propagation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    order: Vec<NodeId>,
}

impl PassReport {
    /// Calculated nodes in the order they were calculated.
    pub fn calculated(&self) -> &[NodeId] {
        &self.order
    }

    pub fn was_calculated(&self, id: NodeId) -> bool {
        self.order.contains(&id)
    }

    /// Number of nodes calculated during the pass.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A node whose outgoing connections are being walked.
struct Frame {
    node: NodeId,
    outgoing: Vec<usize>,
    cursor: usize,
}

/// Bookkeeping shared by every descent in one pass.
#[derive(Default)]
struct Pass {
    calculated: HashSet<NodeId>,
    order: Vec<NodeId>,
}

impl Pass {
    fn is_calculated(&self, id: NodeId) -> bool {
        self.calculated.contains(&id)
    }
}

impl Graph {
    /// Run one propagation pass over the whole graph.
    pub fn update(&mut self) -> Result<PassReport> {
        for node in self.nodes.values_mut() {
            node.before_calculate();
        }

        let mut pass = Pass::default();
        for id in self.node_ids() {
            if pass.is_calculated(id) {
                continue;
            }
            let ready = self.nodes.get(&id).is_some_and(|n| n.can_be_calculated());
            if ready {
                self.descend(id, &mut pass)?;
            }
        }

        debug!(
            calculated = pass.order.len(),
            skipped = self.nodes.len() - pass.order.len(),
            "propagation pass complete"
        );

        Ok(PassReport { order: pass.order })
    }

    /// Same as [`update`](Graph::update); one tick of the simulation.
    pub fn iterate(&mut self) -> Result<PassReport> {
        self.update()
    }

    /// Calculate `root` and everything that becomes ready downstream of it.
    fn descend(&mut self, root: NodeId, pass: &mut Pass) -> Result<()> {
        let mut stack = vec![self.enter(root, pass)?];

        while let Some(frame) = stack.last_mut() {
            let Some(&index) = frame.outgoing.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;
            let from = frame.node;

            if let Some(next) = self.transfer(from, index, pass)? {
                let frame = self.enter(next, pass)?;
                stack.push(frame);
            }
        }

        Ok(())
    }

    /// Calculate one node, mark it, and open a frame over its outgoing wires.
    fn enter(&mut self, id: NodeId, pass: &mut Pass) -> Result<Frame> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(CircuitError::UnknownNode { id })?;
        node.calculate()?;
        trace!(%id, kind = node.kind(), name = node.name(), "calculated");

        pass.calculated.insert(id);
        pass.order.push(id);

        Ok(Frame {
            node: id,
            outgoing: self.outgoing(id),
            cursor: 0,
        })
    }

    /// Copy one output signal along a connection.
    ///
    /// Returns the destination if it should be descended into next. A
    /// connection is inert when its destination is not registered or when a
    /// port index no longer fits the node now registered under that id.
    fn transfer(&mut self, from: NodeId, index: usize, pass: &Pass) -> Result<Option<NodeId>> {
        let connection = self.connections[index];

        let source = self.node(from)?;
        if connection.output >= source.num_outputs() {
            trace!(%connection, "inert connection: output port gone");
            return Ok(None);
        }
        let signal = source.output(connection.output)?;

        let Some(target) = self.nodes.get_mut(&connection.to) else {
            trace!(%connection, "inert connection: destination removed");
            return Ok(None);
        };
        if connection.input >= target.num_inputs() {
            trace!(%connection, "inert connection: input port gone");
            return Ok(None);
        }
        target.set_input(connection.input, signal)?;

        if !pass.is_calculated(connection.to) && target.can_be_calculated() {
            Ok(Some(connection.to))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{And, Constant, Memory, Not, Or, Sum, TriangleWave, Xor};
    use crate::signal::Signal;

    fn output(graph: &Graph, id: NodeId) -> Signal {
        graph.node(id).unwrap().output(0).unwrap()
    }

    #[test]
    fn test_empty_graph() {
        let mut graph = Graph::new();
        assert!(graph.update().unwrap().is_empty());
    }

    #[test]
    fn test_chain_registered_downstream_first() {
        // Registration order is the reverse of data flow; the scan skips the
        // inverters until the source's descent reaches them.
        let mut graph = Graph::new();
        let second = graph.create_node(Not::new());
        let first = graph.create_node(Not::new());
        let source = graph.create_node(Constant::new(true));
        graph.connect(source, 0, first, 0).unwrap();
        graph.connect(first, 0, second, 0).unwrap();

        let report = graph.update().unwrap();
        assert_eq!(report.calculated(), &[source, first, second]);
        assert_eq!(output(&graph, second), Signal::ON);
    }

    #[test]
    fn test_descent_is_pre_order() {
        // source feeds `a` then `b`; `a` feeds `c`. Pre-order visits c before b.
        let mut graph = Graph::new();
        let source = graph.create_node(Constant::new(true));
        let a = graph.create_node(Not::new());
        let b = graph.create_node(Not::new());
        let c = graph.create_node(Not::new());
        graph.connect(source, 0, a, 0).unwrap();
        graph.connect(source, 0, b, 0).unwrap();
        graph.connect(a, 0, c, 0).unwrap();

        let report = graph.update().unwrap();
        assert_eq!(report.calculated(), &[source, a, c, b]);
    }

    #[test]
    fn test_node_fires_when_last_input_arrives() {
        let mut graph = Graph::new();
        let x = graph.create_node(Constant::new(true));
        let gate = graph.create_node(Xor::new(2));
        let y = graph.create_node(Constant::new(false));
        graph.connect(x, 0, gate, 0).unwrap();
        graph.connect(y, 0, gate, 1).unwrap();

        let report = graph.update().unwrap();
        assert_eq!(report.calculated(), &[x, y, gate]);
        assert_eq!(output(&graph, gate), Signal::ON);
    }

    #[test]
    fn test_stale_values_do_not_leak_across_ticks() {
        let mut graph = Graph::new();
        let source = graph.create_node(Constant::new(true));
        let gate = graph.create_node(Not::new());
        graph.connect(source, 0, gate, 0).unwrap();

        graph.update().unwrap();
        assert_eq!(output(&graph, gate), Signal::OFF);

        graph.set_constant(source, Signal::INVALID).unwrap();
        let report = graph.update().unwrap();
        assert!(!report.was_calculated(gate));
        assert!(!output(&graph, gate).is_valid());
    }

    #[test]
    fn test_cycle_is_skipped() {
        let mut graph = Graph::new();
        let a = graph.create_node(Not::new());
        let b = graph.create_node(Not::new());
        graph.connect(a, 0, b, 0).unwrap();
        graph.connect(b, 0, a, 0).unwrap();

        for _ in 0..3 {
            assert!(graph.update().unwrap().is_empty());
            assert!(!output(&graph, a).is_valid());
            assert!(!output(&graph, b).is_valid());
        }
    }

    #[test]
    fn test_cycle_fed_from_outside_resolves_once() {
        // or(in, fb) -> not -> fb: `or` still waits on the feedback input,
        // so nothing past the outside source fires.
        let mut graph = Graph::new();
        let input = graph.create_node(Constant::new(true));
        let or = graph.create_node(Or::new(2));
        let not = graph.create_node(Not::new());
        graph.connect(input, 0, or, 0).unwrap();
        graph.connect(not, 0, or, 1).unwrap();
        graph.connect(or, 0, not, 0).unwrap();

        let report = graph.update().unwrap();
        assert!(!report.was_calculated(or));
        assert!(report.was_calculated(input));
    }

    #[test]
    fn test_removed_destination_is_inert() {
        let mut graph = Graph::new();
        let source = graph.create_node(Constant::new(true));
        let gate = graph.create_node(Not::new());
        graph.connect(source, 0, gate, 0).unwrap();
        graph.remove_node(gate).unwrap();

        let report = graph.update().unwrap();
        assert_eq!(report.calculated(), &[source]);
    }

    #[test]
    fn test_reused_id_with_smaller_arity_is_inert() {
        let mut graph = Graph::new();
        let source = graph.create_node(Constant::new(true));
        let gate = graph.create_node(And::new(3));
        graph.connect(source, 0, gate, 2).unwrap();
        graph.remove_node(gate).unwrap();

        let reused = graph.create_node(Not::new());
        assert_eq!(reused, gate);

        let report = graph.update().unwrap();
        assert_eq!(report.calculated(), &[source]);
        assert!(!graph.node(reused).unwrap().input(0).unwrap().is_valid());
    }

    #[test]
    fn test_memory_before_source_records_previous_tick() {
        let mut graph = Graph::new();
        let memory = graph.create_node(Memory::new());
        let wave = graph.create_node(TriangleWave::default());
        graph.connect(wave, 0, memory, 0).unwrap();

        graph.update().unwrap();
        graph.update().unwrap();

        let history = graph.node_as::<Memory>(memory).unwrap().unwrap().history();
        assert_eq!(history.len(), 2);
        assert!(!history[0].is_valid());
        assert!(history[1].is_valid());
    }

    #[test]
    fn test_memory_after_source_records_current_tick() {
        let mut graph = Graph::new();
        let wave = graph.create_node(TriangleWave::default());
        let memory = graph.create_node(Memory::new());
        graph.connect(wave, 0, memory, 0).unwrap();

        graph.update().unwrap();

        let history = graph.node_as::<Memory>(memory).unwrap().unwrap().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], output(&graph, wave));
    }

    #[test]
    fn test_unconnected_gate_stays_invalid() {
        let mut graph = Graph::new();
        let source = graph.create_node(Constant::new(0.5));
        let sum = graph.create_node(Sum::new(2));
        graph.connect(source, 0, sum, 0).unwrap();

        let report = graph.update().unwrap();
        assert!(!report.was_calculated(sum));
        assert_eq!(graph.node(sum).unwrap().input(0).unwrap(), Signal::from_float(0.5));
        assert!(!output(&graph, sum).is_valid());
    }
}
