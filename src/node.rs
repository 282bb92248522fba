//! The node contract shared by every node kind.
//!
//! A node has a fixed number of input and output ports decided at
//! construction. The ports live in a [`NodeBase`] that each kind embeds;
//! the [`Node`] trait provides bounds-checked port access, the calculation
//! gate and the reset behavior on top of it, so a kind only has to say what
//! it computes and, where it differs, when it is ready.
//!
//! The graph drives nodes exclusively through this trait. Concrete kinds are
//! recovered with [`downcast_ref`](trait.Node.html#method.downcast_ref)
//! when a host needs kind-specific state such as a memory's history.

use std::any::Any;
use std::fmt;

use crate::error::{CircuitError, Result};
use crate::signal::Signal;

/// Name and port storage embedded in every node.
///
/// The port vectors are only ever exposed as slices, so their lengths, and
/// with them the node's arity, cannot change after construction.
#[derive(Debug, Clone, Default)]
pub struct NodeBase {
    name: String,
    inputs: Vec<Signal>,
    outputs: Vec<Signal>,
}

impl NodeBase {
    /// Create storage for the given arity with every port invalid.
    pub fn new(num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            name: String::new(),
            inputs: vec![Signal::INVALID; num_inputs],
            outputs: vec![Signal::INVALID; num_outputs],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn inputs(&self) -> &[Signal] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut [Signal] {
        &mut self.inputs
    }

    pub fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut [Signal] {
        &mut self.outputs
    }

    /// Invalidate every input and output.
    pub fn invalidate_all(&mut self) {
        self.inputs.iter_mut().for_each(Signal::invalidate);
        self.outputs.iter_mut().for_each(Signal::invalidate);
    }
}

/// Upcast helper so trait objects can be downcast to their concrete kind.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A processing unit with fixed input/output arity.
///
/// Implementors provide [`base`](Node::base), [`kind`](Node::kind) and
/// [`compute`](Node::compute). The remaining methods have defaults that fit
/// combinational nodes: ready once every input is valid, and fully
/// invalidated before each propagation pass. Sources and sinks override
/// [`can_be_calculated`](Node::can_be_calculated) and
/// [`before_calculate`](Node::before_calculate).
pub trait Node: AsAny + fmt::Debug + 'static {
    /// Port and name storage.
    fn base(&self) -> &NodeBase;

    /// Mutable port and name storage.
    fn base_mut(&mut self) -> &mut NodeBase;

    /// Type tag of the node kind, e.g. `"And"`.
    fn kind(&self) -> &'static str;

    /// Recompute outputs from the current inputs.
    ///
    /// Only reached through [`calculate`](Node::calculate), after the
    /// readiness check has passed.
    fn compute(&mut self) -> Result<()>;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn set_name(&mut self, name: String) {
        self.base_mut().set_name(name);
    }

    /// Builder-style rename for freshly constructed nodes.
    fn named(mut self, name: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.set_name(name.into());
        self
    }

    fn num_inputs(&self) -> usize {
        self.base().inputs().len()
    }

    fn num_outputs(&self) -> usize {
        self.base().outputs().len()
    }

    /// Store a signal on an input port. Never triggers recomputation.
    fn set_input(&mut self, index: usize, signal: Signal) -> Result<()> {
        let len = self.num_inputs();
        if index >= len {
            return Err(CircuitError::input_out_of_range(self.name(), index, len));
        }
        self.base_mut().inputs_mut()[index] = signal;
        Ok(())
    }

    fn input(&self, index: usize) -> Result<Signal> {
        self.base()
            .inputs()
            .get(index)
            .copied()
            .ok_or_else(|| CircuitError::input_out_of_range(self.name(), index, self.num_inputs()))
    }

    fn output(&self, index: usize) -> Result<Signal> {
        self.base()
            .outputs()
            .get(index)
            .copied()
            .ok_or_else(|| CircuitError::output_out_of_range(self.name(), index, self.num_outputs()))
    }

    /// Whether [`calculate`](Node::calculate) may run now. No side effects.
    fn can_be_calculated(&self) -> bool {
        self.base().inputs().iter().all(Signal::is_valid)
    }

    /// Prepare for a new propagation pass.
    fn before_calculate(&mut self) {
        self.reset();
    }

    /// Recompute outputs, failing if the node is not ready.
    fn calculate(&mut self) -> Result<()> {
        if !self.can_be_calculated() {
            return Err(CircuitError::NotCalculable {
                node: self.name().to_string(),
            });
        }
        self.compute()
    }

    /// Force every port to invalid, whatever the kind.
    fn reset(&mut self) {
        self.base_mut().invalidate_all();
    }
}

impl dyn Node {
    /// Check whether this node is of kind `T`.
    pub fn is<T: Node>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    /// Borrow this node as its concrete kind, if it is a `T`.
    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    /// Mutably borrow this node as its concrete kind, if it is a `T`.
    pub fn downcast_mut<T: Node>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }
}

/// `name: in a b; out c`, with `*` for invalid signals.
impl fmt::Display for dyn Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs = self.base().inputs();
        let outputs = self.base().outputs();

        write!(f, "{}: ", self.name())?;

        if !inputs.is_empty() {
            write!(f, "in")?;
            for signal in inputs {
                write!(f, " {}", signal)?;
            }
            if !outputs.is_empty() {
                write!(f, "; ")?;
            }
        }

        if !outputs.is_empty() {
            write!(f, "out")?;
            for signal in outputs {
                write!(f, " {}", signal)?;
            }
        }

        Ok(())
    }
}
