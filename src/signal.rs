//! Tri-state signal value carried by every port.
//!
//! A [`Signal`] is either invalid (nothing has reached or been computed for
//! the port yet) or valid with an `f64` payload. Boolean consumers read the
//! payload with a nonzero test; arithmetic consumers read it as a float.

use std::fmt;

use crate::error::{CircuitError, Result};

/// The value flowing through one port at one instant.
///
/// Signals are plain values: every transfer along a connection copies them,
/// so a destination input never aliases its source output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Signal(Option<f64>);

impl Signal {
    /// Logical true (`1.0`).
    pub const ON: Signal = Signal(Some(1.0));
    /// Logical false (`0.0`).
    pub const OFF: Signal = Signal(Some(0.0));
    /// No value.
    pub const INVALID: Signal = Signal(None);

    /// Create an invalid signal.
    pub fn invalid() -> Self {
        Self::INVALID
    }

    /// Create a valid boolean signal.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::ON
        } else {
            Self::OFF
        }
    }

    /// Create a valid float signal.
    pub fn from_float(value: f64) -> Self {
        Self(Some(value))
    }

    /// Check whether the signal carries a value.
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Read the payload as a boolean (nonzero is true).
    pub fn as_bool(&self) -> Result<bool> {
        self.as_float().map(|v| v != 0.0)
    }

    /// Read the payload as a float.
    pub fn as_float(&self) -> Result<f64> {
        self.0.ok_or(CircuitError::InvalidAccess)
    }

    /// The payload, if any. For display code that must not fail.
    pub fn value(&self) -> Option<f64> {
        self.0
    }

    /// Overwrite the payload, making the signal valid.
    pub fn set(&mut self, value: f64) {
        self.0 = Some(value);
    }

    /// Drop the payload.
    pub fn invalidate(&mut self) {
        self.0 = None;
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl From<f64> for Signal {
    fn from(value: f64) -> Self {
        Self::from_float(value)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "*"),
        }
    }
}
