use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE};
use crate::error::{LatticeError, Result};

/// Absolute and relative tolerances for floating point comparisons.
///
/// Two values `x` and `y` are approximately equal when
/// `|x - y| <= max(atol, rtol * max(|x|, |y|))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub atol: f64,
    pub rtol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            atol: DEFAULT_ABSOLUTE_TOLERANCE,
            rtol: DEFAULT_RELATIVE_TOLERANCE,
        }
    }
}

impl Tolerance {
    pub fn new(atol: f64, rtol: f64) -> Result<Self> {
        if !(atol.is_finite() && atol >= 0.0) {
            return Err(LatticeError::invalid_parameter(
                "atol",
                atol,
                "must be finite and non-negative",
            ));
        }
        if !(rtol.is_finite() && rtol >= 0.0) {
            return Err(LatticeError::invalid_parameter(
                "rtol",
                rtol,
                "must be finite and non-negative",
            ));
        }
        Ok(Self { atol, rtol })
    }

    pub fn with_atol(self, atol: f64) -> Result<Self> {
        Self::new(atol, self.rtol)
    }

    pub fn with_rtol(self, rtol: f64) -> Result<Self> {
        Self::new(self.atol, rtol)
    }

    pub fn approx_eq(&self, x: f64, y: f64) -> bool {
        if x == y {
            return true;
        }
        let scale = x.abs().max(y.abs());
        (x - y).abs() <= self.atol.max(self.rtol * scale)
    }
}

/// Approximate equality under a [`Tolerance`].
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool;

    fn approx_eq_default(&self, other: &Self) -> bool {
        self.approx_eq(other, &Tolerance::default())
    }
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        tol.approx_eq(*self, *other)
    }
}

impl<const N: usize> ApproxEq for [f64; N] {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        self.iter().zip(other.iter()).all(|(x, y)| tol.approx_eq(*x, *y))
    }
}
