use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::lattice::base_matrix::primitive_basis;
use crate::lattice::lattice_constants::LatticeConstants;
use crate::lattice::lattice_conventional::conventional_cell;
use crate::lattice::lattice_reduction::reduced_cell;
use crate::lattice::lattice_standardization::standardize;
use crate::lattice::lattice_types::{is_bravais_lattice, Centering, LatticeSystem};
use crate::lattice::tolerance::{ApproxEq, Tolerance};

/// A unit cell: lattice constants together with a centering.
///
/// The pair is not checked against the 14 Bravais lattices on construction;
/// [`standardize`] and [`conventional_cell`] reject invalid combinations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    lattice_constants: LatticeConstants,
    centering: Centering,
}

impl UnitCell {
    pub fn new(lattice_constants: impl Into<LatticeConstants>, centering: Centering) -> Self {
        Self {
            lattice_constants: lattice_constants.into(),
            centering,
        }
    }

    pub fn primitive(lattice_constants: impl Into<LatticeConstants>) -> Self {
        Self::new(lattice_constants, Centering::Primitive)
    }

    pub fn lattice_constants(&self) -> &LatticeConstants {
        &self.lattice_constants
    }

    pub fn centering(&self) -> Centering {
        self.centering
    }

    pub fn lattice_system(&self) -> LatticeSystem {
        self.lattice_constants.lattice_system()
    }

    pub fn is_bravais_lattice(&self) -> bool {
        is_bravais_lattice(self.lattice_system(), self.centering)
    }

    pub fn basis(&self) -> [Vector3<f64>; 3] {
        self.lattice_constants.basis()
    }

    pub fn primitive_basis(&self) -> Result<[Vector3<f64>; 3]> {
        primitive_basis(&self.lattice_constants, self.centering)
    }

    /// Volume of the (possibly centered) cell.
    pub fn volume(&self) -> f64 {
        self.lattice_constants.volume()
    }

    /// Volume per lattice point.
    pub fn primitive_volume(&self) -> f64 {
        self.volume() / self.centering.lattice_points_per_cell() as f64
    }

    pub fn surface_area(&self) -> f64 {
        self.lattice_constants.surface_area()
    }

    pub fn standardize(&self) -> Result<UnitCell> {
        let (lattice_constants, centering) = standardize(&self.lattice_constants, self.centering)?;
        Ok(UnitCell::new(lattice_constants, centering))
    }

    /// Conventional cell using the default tolerance.
    pub fn conventional_cell(&self) -> Result<UnitCell> {
        conventional_cell(self, &Tolerance::default())
    }

    pub fn reduced_cell(&self) -> Result<UnitCell> {
        reduced_cell(self)
    }
}

impl From<LatticeConstants> for UnitCell {
    fn from(lattice_constants: LatticeConstants) -> Self {
        UnitCell::primitive(lattice_constants)
    }
}

impl ApproxEq for UnitCell {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        self.centering == other.centering
            && self.lattice_constants.approx_eq(&other.lattice_constants, tol)
    }
}

impl fmt::Display for UnitCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.lattice_constants, self.centering)
    }
}
