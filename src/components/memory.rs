//! Recording sink.

use crate::error::Result;
use crate::node::{Node, NodeBase};
use crate::signal::Signal;

/// A single-input, zero-output node that appends its input to a history on
/// every calculation, invalid signals included.
///
/// Memory is always calculable and keeps its input across passes, so within
/// a pass it records whatever reached it before the scan arrived at it.
#[derive(Debug, Clone)]
pub struct Memory {
    base: NodeBase,
    history: Vec<Signal>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(1, 0),
            history: Vec::new(),
        }
    }

    /// Recorded signals, oldest first.
    pub fn history(&self) -> &[Signal] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Memory {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Memory"
    }

    fn compute(&mut self) -> Result<()> {
        self.history.push(self.base.inputs()[0]);
        Ok(())
    }

    fn can_be_calculated(&self) -> bool {
        true
    }

    fn before_calculate(&mut self) {}
}
