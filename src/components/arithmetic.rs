//! Arithmetic units: Sum, Multiplication, Negate, Reciprocal.
//!
//! Accumulators fold their inputs left to right starting from the identity
//! (0.0 for sums, 1.0 for products), so results are bit-exact for a given
//! input order.

use crate::error::Result;
use crate::node::{Node, NodeBase};
use crate::signal::Signal;

/// Sum of `n >= 1` inputs.
#[derive(Debug, Clone)]
pub struct Sum {
    base: NodeBase,
}

impl Sum {
    /// Create a summing node. The input count is clamped to at least 1.
    pub fn new(num_inputs: usize) -> Self {
        Self {
            base: NodeBase::new(num_inputs.max(1), 1),
        }
    }
}

impl Default for Sum {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Node for Sum {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Sum"
    }

    fn compute(&mut self) -> Result<()> {
        let mut sum = 0.0;
        for signal in self.base.inputs() {
            sum += signal.as_float()?;
        }
        self.base.outputs_mut()[0] = Signal::from_float(sum);
        Ok(())
    }
}

/// Product of `n >= 1` inputs.
#[derive(Debug, Clone)]
pub struct Multiplication {
    base: NodeBase,
}

impl Multiplication {
    /// Create a product node. The input count is clamped to at least 1.
    pub fn new(num_inputs: usize) -> Self {
        Self {
            base: NodeBase::new(num_inputs.max(1), 1),
        }
    }
}

impl Default for Multiplication {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Node for Multiplication {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Multiplication"
    }

    fn compute(&mut self) -> Result<()> {
        let mut product = 1.0;
        for signal in self.base.inputs() {
            product *= signal.as_float()?;
        }
        self.base.outputs_mut()[0] = Signal::from_float(product);
        Ok(())
    }
}

/// Arithmetic negation of a single input.
#[derive(Debug, Clone)]
pub struct Negate {
    base: NodeBase,
}

impl Negate {
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(1, 1),
        }
    }
}

impl Default for Negate {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Negate {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Negate"
    }

    fn compute(&mut self) -> Result<()> {
        let value = self.base.inputs()[0].as_float()?;
        self.base.outputs_mut()[0] = Signal::from_float(-value);
        Ok(())
    }
}

/// `1 / x` of a single input.
///
/// A zero input yields an infinite output rather than an error.
#[derive(Debug, Clone)]
pub struct Reciprocal {
    base: NodeBase,
}

impl Reciprocal {
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(1, 1),
        }
    }
}

impl Default for Reciprocal {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Reciprocal {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Reciprocal"
    }

    fn compute(&mut self) -> Result<()> {
        let value = self.base.inputs()[0].as_float()?;
        self.base.outputs_mut()[0] = Signal::from_float(1.0 / value);
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn accumulators_fold_left_to_right(values in prop::collection::vec(-1.0e3_f64..1.0e3_f64, 1..8)) {
            let mut sum = Sum::new(values.len());
            let mut product = Multiplication::new(values.len());
            for (i, &v) in values.iter().enumerate() {
                sum.set_input(i, Signal::from_float(v)).unwrap();
                product.set_input(i, Signal::from_float(v)).unwrap();
            }
            sum.calculate().unwrap();
            product.calculate().unwrap();

            let expected_sum = values.iter().fold(0.0, |acc, v| acc + v);
            let expected_product = values.iter().fold(1.0, |acc, v| acc * v);
            prop_assert_eq!(sum.output(0).unwrap().as_float().unwrap(), expected_sum);
            prop_assert_eq!(product.output(0).unwrap().as_float().unwrap(), expected_product);
        }
    }
}
