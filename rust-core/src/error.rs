use thiserror::Error;

use crate::lattice::lattice_types::{Centering, LatticeSystem};

/// Errors raised by lattice construction, standardization and comparison.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    #[error("invalid parameter `{name}` = {value}: {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    #[error("invalid Bravais lattice: {system} lattices do not admit {centering} centering")]
    InvalidBravaisLattice {
        system: LatticeSystem,
        centering: Centering,
    },

    #[error("{stage} reduction did not converge within {iterations} iterations")]
    ReductionDidNotConverge {
        stage: &'static str,
        iterations: usize,
    },

    #[error("conventional cell resolution revisited state ({system}, {centering}) after {depth} transitions")]
    ResolutionDidNotTerminate {
        system: LatticeSystem,
        centering: Centering,
        depth: usize,
    },

    #[error("lattice system mismatch: expected {expected}, found {found}")]
    LatticeSystemMismatch {
        expected: LatticeSystem,
        found: LatticeSystem,
    },

    #[error("basis vectors are linearly dependent (|det| = {determinant:e})")]
    SingularBasis { determinant: f64 },
}

impl LatticeError {
    pub fn invalid_parameter(name: &'static str, value: f64, constraint: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            constraint,
        }
    }

    pub fn invalid_bravais_lattice(system: LatticeSystem, centering: Centering) -> Self {
        Self::InvalidBravaisLattice { system, centering }
    }
}

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, LatticeError>;
