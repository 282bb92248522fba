//! Boolean gates: And, Or, Xor, Not.
//!
//! Inputs are read with a nonzero test and outputs are `1.0` / `0.0`. Every
//! gate waits for all of its inputs to be valid before it computes.

use crate::error::Result;
use crate::node::{Node, NodeBase};
use crate::signal::Signal;

/// Read every input as a boolean.
fn input_bools(base: &NodeBase) -> Result<Vec<bool>> {
    base.inputs().iter().map(Signal::as_bool).collect()
}

/// Logical AND over `n >= 1` inputs.
#[derive(Debug, Clone)]
pub struct And {
    base: NodeBase,
}

impl And {
    /// Create an AND gate. The input count is clamped to at least 1.
    pub fn new(num_inputs: usize) -> Self {
        Self {
            base: NodeBase::new(num_inputs.max(1), 1),
        }
    }
}

impl Default for And {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Node for And {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "And"
    }

    fn compute(&mut self) -> Result<()> {
        let out = input_bools(&self.base)?.into_iter().all(|b| b);
        self.base.outputs_mut()[0] = Signal::from_bool(out);
        Ok(())
    }
}

/// Logical OR over `n >= 1` inputs.
#[derive(Debug, Clone)]
pub struct Or {
    base: NodeBase,
}

impl Or {
    /// Create an OR gate. The input count is clamped to at least 1.
    pub fn new(num_inputs: usize) -> Self {
        Self {
            base: NodeBase::new(num_inputs.max(1), 1),
        }
    }
}

impl Default for Or {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Node for Or {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Or"
    }

    fn compute(&mut self) -> Result<()> {
        let out = input_bools(&self.base)?.into_iter().any(|b| b);
        self.base.outputs_mut()[0] = Signal::from_bool(out);
        Ok(())
    }
}

/// Parity over `n >= 1` inputs: true when an odd number of inputs are true.
#[derive(Debug, Clone)]
pub struct Xor {
    base: NodeBase,
}

impl Xor {
    /// Create an XOR gate. The input count is clamped to at least 1.
    pub fn new(num_inputs: usize) -> Self {
        Self {
            base: NodeBase::new(num_inputs.max(1), 1),
        }
    }
}

impl Default for Xor {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Node for Xor {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Xor"
    }

    fn compute(&mut self) -> Result<()> {
        let out = input_bools(&self.base)?
            .into_iter()
            .fold(false, |acc, b| acc ^ b);
        self.base.outputs_mut()[0] = Signal::from_bool(out);
        Ok(())
    }
}

/// Single-input logical negation.
#[derive(Debug, Clone)]
pub struct Not {
    base: NodeBase,
}

impl Not {
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(1, 1),
        }
    }
}

impl Default for Not {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Not {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Not"
    }

    fn compute(&mut self) -> Result<()> {
        let value = self.base.inputs()[0].as_bool()?;
        self.base.outputs_mut()[0] = Signal::from_bool(!value);
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn eval(node: &mut dyn Node, bits: &[bool]) -> bool {
        for (i, &b) in bits.iter().enumerate() {
            node.set_input(i, Signal::from_bool(b)).unwrap();
        }
        node.calculate().unwrap();
        node.output(0).unwrap().as_bool().unwrap()
    }

    proptest! {
        #[test]
        fn and_or_match_all_any(bits in prop::collection::vec(any::<bool>(), 1..8)) {
            let mut and = And::new(bits.len());
            let mut or = Or::new(bits.len());
            prop_assert_eq!(eval(&mut and, &bits), bits.iter().all(|&b| b));
            prop_assert_eq!(eval(&mut or, &bits), bits.iter().any(|&b| b));
        }

        #[test]
        fn xor_matches_odd_count(bits in prop::collection::vec(any::<bool>(), 1..8)) {
            let mut xor = Xor::new(bits.len());
            let ones = bits.iter().filter(|&&b| b).count();
            prop_assert_eq!(eval(&mut xor, &bits), ones % 2 == 1);
        }
    }
}
