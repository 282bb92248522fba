//! Constant signal source.

use crate::error::Result;
use crate::node::{Node, NodeBase};
use crate::signal::Signal;

/// A zero-input node holding a fixed output value.
///
/// The value changes only through [`Constant::set_output`], which is how a
/// host injects external input into a circuit. `calculate()` leaves it
/// untouched and the node survives the pre-pass reset with its value intact.
#[derive(Debug, Clone)]
pub struct Constant {
    base: NodeBase,
}

impl Constant {
    /// Create a constant source emitting `signal` (which may be invalid).
    pub fn new(signal: impl Into<Signal>) -> Self {
        let mut base = NodeBase::new(0, 1);
        base.outputs_mut()[0] = signal.into();
        Self { base }
    }

    /// Set the emitted value.
    pub fn set_output(&mut self, signal: impl Into<Signal>) {
        self.base.outputs_mut()[0] = signal.into();
    }

    /// The emitted value.
    pub fn value(&self) -> Signal {
        self.base.outputs()[0]
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(Signal::INVALID)
    }
}

impl Node for Constant {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Constant"
    }

    fn compute(&mut self) -> Result<()> {
        Ok(())
    }

    fn can_be_calculated(&self) -> bool {
        true
    }

    fn before_calculate(&mut self) {}
}
