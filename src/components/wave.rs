//! Triangle wave oscillator.
//!
//! The oscillator is a zero-input source that advances once per
//! calculation. It bounces between `min` and `max` by `delta` per step;
//! the direction flips only on the step after the value has crossed a
//! bound, so each peak overshoots by up to one `delta`.

use crate::error::Result;
use crate::node::{Node, NodeBase};
use crate::signal::Signal;

/// Default lower bound.
pub const DEFAULT_MIN: f64 = -0.5;
/// Default upper bound.
pub const DEFAULT_MAX: f64 = 0.5;
/// Default step per calculation.
pub const DEFAULT_DELTA: f64 = 0.09;

/// Configuration for a [`TriangleWave`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleWaveConfig {
    /// Lower bound; below it the wave turns upward.
    pub min: f64,
    /// Upper bound; above it the wave turns downward.
    pub max: f64,
    /// Value before the first step.
    pub start: f64,
    /// Step size per calculation.
    pub delta: f64,
}

impl Default for TriangleWaveConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            start: 0.0,
            delta: DEFAULT_DELTA,
        }
    }
}

impl TriangleWaveConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bounds.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the starting value.
    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Set the step size.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Source emitting a triangle wave, one step per calculation.
#[derive(Debug, Clone)]
pub struct TriangleWave {
    base: NodeBase,
    config: TriangleWaveConfig,
    value: f64,
    direction: Direction,
}

impl TriangleWave {
    /// Create an oscillator from explicit parameters.
    pub fn new(min: f64, max: f64, start: f64, delta: f64) -> Self {
        Self::with_config(TriangleWaveConfig {
            min,
            max,
            start,
            delta,
        })
    }

    /// Create an oscillator from a configuration.
    pub fn with_config(config: TriangleWaveConfig) -> Self {
        Self {
            base: NodeBase::new(0, 1),
            config,
            value: config.start,
            direction: Direction::Up,
        }
    }

    /// Current internal value (the last emitted one, or `start`).
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn config(&self) -> &TriangleWaveConfig {
        &self.config
    }

    /// Advance one step and return the new value.
    fn step(&mut self) -> f64 {
        if self.value < self.config.min {
            self.direction = Direction::Up;
        } else if self.value > self.config.max {
            self.direction = Direction::Down;
        }

        match self.direction {
            Direction::Up => self.value += self.config.delta,
            Direction::Down => self.value -= self.config.delta,
        }

        self.value
    }
}

impl Default for TriangleWave {
    fn default() -> Self {
        Self::with_config(TriangleWaveConfig::default())
    }
}

impl Node for TriangleWave {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "TriangleWave"
    }

    fn compute(&mut self) -> Result<()> {
        let value = self.step();
        self.base.outputs_mut()[0].set(value);
        Ok(())
    }

    fn can_be_calculated(&self) -> bool {
        true
    }

    fn before_calculate(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn run(wave: &mut TriangleWave, steps: usize) -> Vec<f64> {
        (0..steps)
            .map(|_| {
                wave.calculate().unwrap();
                wave.output(0).unwrap().as_float().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_overshoot_then_flip() {
        let mut wave = TriangleWave::new(-0.5, 0.5, 0.0, 0.09);
        let values = run(&mut wave, 8);
        let expected = [0.09, 0.18, 0.27, 0.36, 0.45, 0.54, 0.45, 0.36];
        for (got, want) in values.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_turns_upward_below_min() {
        let config = TriangleWaveConfig::new()
            .with_range(-0.2, 0.2)
            .with_start(-0.15)
            .with_delta(0.1);
        let mut wave = TriangleWave::with_config(config);
        wave.direction = Direction::Down;

        // -0.15 is inside the range, so the wave keeps falling once more
        // before the bound check turns it around.
        let values = run(&mut wave, 3);
        assert_abs_diff_eq!(values[0], -0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(values[1], -0.15, epsilon = 1e-9);
        assert_abs_diff_eq!(values[2], -0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_output_invalid_until_first_step() {
        let wave = TriangleWave::default();
        assert!(wave.can_be_calculated());
        assert!(!wave.output(0).unwrap().is_valid());
        assert_abs_diff_eq!(wave.value(), 0.0);
    }

    #[test]
    fn test_before_calculate_keeps_output() {
        let mut wave = TriangleWave::default();
        wave.calculate().unwrap();
        wave.before_calculate();
        assert!(wave.output(0).unwrap().is_valid());
    }
}
