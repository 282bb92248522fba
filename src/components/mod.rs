//! Node kinds for virtual circuits.
//!
//! This module provides every built-in implementation of the [`Node`]
//! contract:
//! - Logic: And, Or, Xor, Not
//! - Arithmetic: Sum, Multiplication, Negate, Reciprocal
//! - Sources: Constant, TriangleWave
//! - Sinks: Memory
//!
//! New kinds only need to implement [`Node`]; the graph never matches on
//! concrete types.
//!
//! [`Node`]: crate::node::Node

mod arithmetic;
mod logic;
mod memory;
mod sources;
mod wave;

pub use arithmetic::{Multiplication, Negate, Reciprocal, Sum};
pub use logic::{And, Not, Or, Xor};
pub use memory::Memory;
pub use sources::Constant;
pub use wave::{TriangleWave, TriangleWaveConfig};
