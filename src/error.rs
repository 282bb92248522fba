//! Error types for the circuit engine.
//!
//! Every variant except [`CircuitError::Output`] is a contract fault: the
//! caller broke a precondition (bad port index, unknown id, reading an
//! invalid signal, calculating a node that is not ready). The engine reports
//! these immediately and never clamps, defaults or retries.

use std::fmt;

use thiserror::Error;

use crate::circuit::NodeId;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Which side of a node a port index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// Unified error type for all engine operations.
#[derive(Error, Debug)]
pub enum CircuitError {
    // ============ Contract Faults ============
    /// Port index outside `[0, len)` for the node's arity
    #[error("{direction} index {index} out of range for node '{node}' ({len} {direction}s)")]
    PortOutOfRange {
        node: String,
        direction: PortDirection,
        index: usize,
        len: usize,
    },

    /// No node registered under this id
    #[error("No node registered with id {id}")]
    UnknownNode { id: NodeId },

    /// Kind-specific operation on a node of another kind
    #[error("Node {id} is a {actual}, expected a {expected}")]
    WrongKind {
        id: NodeId,
        expected: &'static str,
        actual: &'static str,
    },

    /// Value read from a signal that carries no value
    #[error("Attempted to read the value of an invalid signal")]
    InvalidAccess,

    /// `calculate()` called while `can_be_calculated()` is false
    #[error("Node '{node}' cannot be calculated: not all inputs are valid")]
    NotCalculable { node: String },

    // ============ Host I/O Errors ============
    /// Failure writing host output (CLI only)
    #[error("Failed to write circuit output: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },
}

impl CircuitError {
    /// Create a port range error for an input index
    pub fn input_out_of_range(node: impl Into<String>, index: usize, len: usize) -> Self {
        Self::PortOutOfRange {
            node: node.into(),
            direction: PortDirection::Input,
            index,
            len,
        }
    }

    /// Create a port range error for an output index
    pub fn output_out_of_range(node: impl Into<String>, index: usize, len: usize) -> Self {
        Self::PortOutOfRange {
            node: node.into(),
            direction: PortDirection::Output,
            index,
            len,
        }
    }
}

impl From<std::io::Error> for CircuitError {
    fn from(source: std::io::Error) -> Self {
        Self::Output { source }
    }
}
