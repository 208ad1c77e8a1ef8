use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LatticeError, Result};
use crate::lattice::lattice_constants::LatticeConstants;
use crate::lattice::lattice_types::LatticeSystem;

/// Differences between two sets of lattice constants of the same lattice system.
///
/// Unlike lattice constants, deltas carry no range constraints: lengths and angles may
/// be negative or zero. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum LatticeConstantDeltas {
    Triclinic {
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    },
    Monoclinic {
        a: f64,
        b: f64,
        c: f64,
        beta: f64,
    },
    Orthorhombic {
        a: f64,
        b: f64,
        c: f64,
    },
    Tetragonal {
        a: f64,
        c: f64,
    },
    Rhombohedral {
        a: f64,
        alpha: f64,
    },
    Hexagonal {
        a: f64,
        c: f64,
    },
    Cubic {
        a: f64,
    },
}

impl LatticeConstantDeltas {
    pub fn lattice_system(&self) -> LatticeSystem {
        match self {
            Self::Triclinic { .. } => LatticeSystem::Triclinic,
            Self::Monoclinic { .. } => LatticeSystem::Monoclinic,
            Self::Orthorhombic { .. } => LatticeSystem::Orthorhombic,
            Self::Tetragonal { .. } => LatticeSystem::Tetragonal,
            Self::Rhombohedral { .. } => LatticeSystem::Rhombohedral,
            Self::Hexagonal { .. } => LatticeSystem::Hexagonal,
            Self::Cubic { .. } => LatticeSystem::Cubic,
        }
    }

    /// Deltas in the same order as [`LatticeConstants::parameters`].
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            Self::Triclinic {
                a,
                b,
                c,
                alpha,
                beta,
                gamma,
            } => vec![a, b, c, alpha, beta, gamma],
            Self::Monoclinic { a, b, c, beta } => vec![a, b, c, beta],
            Self::Orthorhombic { a, b, c } => vec![a, b, c],
            Self::Tetragonal { a, c } | Self::Hexagonal { a, c } => vec![a, c],
            Self::Rhombohedral { a, alpha } => vec![a, alpha],
            Self::Cubic { a } => vec![a],
        }
    }

    /// Euclidean norm of the parameter deltas.
    pub fn norm(&self) -> f64 {
        self.parameters().iter().map(|x| x * x).sum::<f64>().sqrt()
    }
}

impl LatticeConstants {
    /// `self - other`, parameter by parameter.
    pub fn delta(&self, other: &LatticeConstants) -> Result<LatticeConstantDeltas> {
        use LatticeConstants as L;

        let deltas = match (self, other) {
            (L::Triclinic(x), L::Triclinic(y)) => LatticeConstantDeltas::Triclinic {
                a: x.a() - y.a(),
                b: x.b() - y.b(),
                c: x.c() - y.c(),
                alpha: x.alpha() - y.alpha(),
                beta: x.beta() - y.beta(),
                gamma: x.gamma() - y.gamma(),
            },
            (L::Monoclinic(x), L::Monoclinic(y)) => LatticeConstantDeltas::Monoclinic {
                a: x.a() - y.a(),
                b: x.b() - y.b(),
                c: x.c() - y.c(),
                beta: x.beta() - y.beta(),
            },
            (L::Orthorhombic(x), L::Orthorhombic(y)) => LatticeConstantDeltas::Orthorhombic {
                a: x.a() - y.a(),
                b: x.b() - y.b(),
                c: x.c() - y.c(),
            },
            (L::Tetragonal(x), L::Tetragonal(y)) => LatticeConstantDeltas::Tetragonal {
                a: x.a() - y.a(),
                c: x.c() - y.c(),
            },
            (L::Rhombohedral(x), L::Rhombohedral(y)) => LatticeConstantDeltas::Rhombohedral {
                a: x.a() - y.a(),
                alpha: x.alpha() - y.alpha(),
            },
            (L::Hexagonal(x), L::Hexagonal(y)) => LatticeConstantDeltas::Hexagonal {
                a: x.a() - y.a(),
                c: x.c() - y.c(),
            },
            (L::Cubic(x), L::Cubic(y)) => LatticeConstantDeltas::Cubic { a: x.a() - y.a() },
            _ => {
                return Err(LatticeError::LatticeSystemMismatch {
                    expected: self.lattice_system(),
                    found: other.lattice_system(),
                })
            }
        };
        Ok(deltas)
    }
}

impl fmt::Display for LatticeConstantDeltas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.parameters().iter().map(|x| format!("{:+.6}", x)).collect();
        write!(f, "{} deltas ({})", self.lattice_system(), values.join(", "))
    }
}
