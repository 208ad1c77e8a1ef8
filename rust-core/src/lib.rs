//! Crystallographic lattice standardization library
//!
//! This library computes canonical (IUCr conventional) unit cells for the 14 Bravais
//! lattices, detects when a cell of one lattice system is a limiting case of a
//! higher-symmetry system, and decides equivalence and supercell relations between
//! differently parameterized cells.

pub mod config;
pub mod error;
pub mod lattice;

pub use error::{LatticeError, Result};
pub use lattice::prelude::*;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
