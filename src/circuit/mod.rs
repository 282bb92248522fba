//! Circuit graphs and their evaluation.
//!
//! A [`Graph`] owns a set of nodes and the connections between their ports.
//! Each call to [`Graph::update`] runs one propagation pass that pushes
//! signals from the sources through whatever part of the network can be
//! evaluated this tick.

mod graph;
mod propagate;
mod types;
mod validate;

pub use graph::Graph;
pub use propagate::PassReport;
pub use types::{Connection, NodeId};
pub use validate::find_dangling_connections;
