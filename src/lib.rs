//! # VCircuit Core
//!
//! A dataflow evaluation engine for virtual circuits.
//!
//! This library provides:
//! - A tri-state [`Signal`] that carries a float payload or nothing at all
//! - The [`Node`] contract with fixed-arity ports and a readiness gate
//! - Logic, arithmetic, source and sink node kinds
//! - A [`Graph`] that owns nodes and wires and evaluates them once per tick
//!
//! ## Architecture
//!
//! - [`signal`] - The value carried on every port
//! - [`node`] - The node contract and shared port storage
//! - [`components`] - Built-in node kinds
//! - [`circuit`] - Graph storage and the propagation pass
//! - [`scenarios`] - Canned demonstration circuits (CLI only)
//!
//! ## Usage
//!
//! ### Native
//!
//! ```
//! use vcircuit_core::components::{And, Constant};
//! use vcircuit_core::{Graph, Node, Signal};
//!
//! let mut graph = Graph::new();
//! let a = graph.create_node(Constant::new(true));
//! let b = graph.create_node(Constant::new(false));
//! let and = graph.create_node(And::new(2));
//! graph.connect(a, 0, and, 0)?;
//! graph.connect(b, 0, and, 1)?;
//!
//! graph.update()?;
//! assert_eq!(graph.node(and)?.output(0)?, Signal::OFF);
//! # Ok::<(), vcircuit_core::CircuitError>(())
//! ```
//!
//! ### CLI
//!
//! ```bash
//! RUST_LOG=vcircuit_core=trace vcircuit gates
//! ```
//!
//! ## Evaluation
//!
//! One tick resets every node, then walks the nodes in id order and fires
//! each ready one, following its outgoing wires depth-first so that
//! downstream nodes fire as soon as their last input arrives. Nodes that
//! never become ready keep invalid outputs; feedback loops therefore settle
//! to invalid unless something breaks them.

pub mod circuit;
pub mod components;
pub mod error;
pub mod node;
pub mod signal;

#[cfg(feature = "cli")]
pub mod scenarios;

// Re-export main types for convenience
pub use circuit::{Connection, Graph, NodeId, PassReport};
pub use error::{CircuitError, Result};
pub use node::{Node, NodeBase};
pub use signal::Signal;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;
