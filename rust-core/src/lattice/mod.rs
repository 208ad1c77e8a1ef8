// Lattice module: lattice constants, unit cells and the standardization pipeline
// This module resolves any unit cell to its conventional IUCr cell and compares lattices

// ======================== MODULE DECLARATIONS ========================
pub mod base_matrix;
pub mod lattice_constants;
pub mod lattice_conventional;
pub mod lattice_deltas;
pub mod lattice_equivalence;
pub mod lattice_reduction;
pub mod lattice_standardization;
pub mod lattice_types;
pub mod tolerance;
pub mod unit_cell;

mod _tests_lattice_conventional;
mod _tests_lattice_deltas;
mod _tests_lattice_reduction;

// ======================== LATTICE SYSTEMS & CENTERINGS ========================
pub use lattice_types::{
    LatticeSystem,                  // enum - the 7 lattice systems (Triclinic, Monoclinic, Orthorhombic, Tetragonal, Rhombohedral, Hexagonal, Cubic)
    Centering,                      // enum - lattice centering types (Primitive, Body, Face, Base)
    is_bravais_lattice,             // fn(system: LatticeSystem, centering: Centering) -> bool - one of the 14 Bravais lattices
    bravais_lattices,               // fn() -> Vec<(LatticeSystem, Centering)> - all 14 Bravais lattices
};

// ======================== APPROXIMATE COMPARISON ========================
pub use tolerance::{
    Tolerance,                      // struct - absolute and relative tolerance {atol, rtol}
    ApproxEq,                       // trait - approx_eq(&self, other: &Self, tol: &Tolerance) -> bool
};

// ======================== LATTICE CONSTANTS ========================
pub use lattice_constants::{
    LatticeConstants,               // enum - lattice constants of any lattice system
    TriclinicLatticeConstants,      // struct - (a, b, c, alpha, beta, gamma)
    MonoclinicLatticeConstants,     // struct - (a, b, c, beta), unique axis b
    OrthorhombicLatticeConstants,   // struct - (a, b, c)
    TetragonalLatticeConstants,     // struct - (a, c)
    RhombohedralLatticeConstants,   // struct - (a, alpha)
    HexagonalLatticeConstants,      // struct - (a, c)
    CubicLatticeConstants,          // struct - (a)
    lattice_system,                 // fn(lattice_constants: &LatticeConstants) -> LatticeSystem
    parameter_names,                // fn(system: LatticeSystem) -> &'static [&'static str] - parameter order of a system
};
// LatticeConstants impl methods:
//   lattice_system(&self) -> LatticeSystem                         - lattice system of the variant
//   parameters(&self) -> Vec<f64>                                  - ordered parameters (angles in radians)
//   from_parameters(system, params: &[f64]) -> Result<Self>        - validated construction from a parameter slice
//   basis(&self) -> [Vector3<f64>; 3]                              - basis vectors in the canonical frame
//   metric_tensor(&self) -> Matrix3<f64>                           - Gram matrix of the basis
//   volume(&self) -> f64                                           - cell volume
//   surface_area(&self) -> f64                                     - total face area
//   delta(&self, other: &LatticeConstants) -> Result<LatticeConstantDeltas> - parameter differences

pub use lattice_deltas::LatticeConstantDeltas; // enum - per-system parameter differences (unconstrained)

// ======================== BASIS UTILITIES ========================
pub use base_matrix::{
    BaseMatrix,                     // struct - non-singular basis stored column-wise
    basis,                          // fn(lattice_constants: &LatticeConstants) -> [Vector3<f64>; 3]
    basis_matrix,                   // fn(lattice_constants: &LatticeConstants) -> Matrix3<f64>
    metric_tensor,                  // fn(lattice_constants: &LatticeConstants) -> Matrix3<f64>
    volume,                         // fn(lattice_constants: &LatticeConstants) -> f64
    surface_area,                   // fn(lattice_constants: &LatticeConstants) -> f64
    primitive_basis,                // fn(lattice_constants, centering) -> Result<[Vector3<f64>; 3]> - primitive vectors of a centered cell
};

// ======================== UNIT CELLS ========================
pub use unit_cell::UnitCell;       // struct - lattice constants together with a centering
// UnitCell impl methods:
//   new(lattice_constants, centering: Centering) -> Self           - unchecked construction
//   primitive(lattice_constants) -> Self                           - primitive cell
//   standardize(&self) -> Result<UnitCell>                         - canonical cell within its lattice system
//   conventional_cell(&self) -> Result<UnitCell>                   - conventional cell with the default tolerance
//   reduced_cell(&self) -> Result<UnitCell>                        - Delaunay-reduced primitive triclinic cell
//   volume(&self) / primitive_volume(&self) -> f64                 - cell volume and volume per lattice point

// ======================== STANDARDIZATION ========================
pub use lattice_standardization::{
    standardize,                    // fn(lattice_constants: &LatticeConstants, centering: Centering) -> Result<(LatticeConstants, Centering)>
    standardize_monoclinic,         // fn(&MonoclinicLatticeConstants, Centering) -> Result<(MonoclinicLatticeConstants, Centering)>
    standardize_orthorhombic,       // fn(&OrthorhombicLatticeConstants, Centering) -> Result<OrthorhombicLatticeConstants>
    convert_to_body_centering,      // fn(&MonoclinicLatticeConstants) -> Result<MonoclinicLatticeConstants> - C -> I
    convert_to_base_centering,      // fn(&MonoclinicLatticeConstants) -> Result<MonoclinicLatticeConstants> - I -> C
};

// ======================== REDUCTION ========================
pub use lattice_reduction::{
    delaunay_reduce,                // fn(basis: &[Vector3<f64>; 3]) -> Result<[Vector3<f64>; 3]> - Selling reduction
    size_reduce,                    // fn(basis: &[Vector3<f64>; 3]) -> Result<[Vector3<f64>; 3]> - pairwise nearest-integer reduction
    reduce_basis,                   // fn(basis: &[Vector3<f64>; 3]) -> Result<TriclinicLatticeConstants> - reduced cell of a basis
    reduced_cell,                   // fn(unit_cell: &UnitCell) -> Result<UnitCell> - reduced primitive cell
};

// ======================== CONVENTIONAL CELLS ========================
pub use lattice_conventional::{
    conventional_cell,              // fn(unit_cell: &UnitCell, tol: &Tolerance) -> Result<UnitCell> - limiting-case resolution
    conventional_lattice_system,    // fn(unit_cell: &UnitCell, tol: &Tolerance) -> Result<LatticeSystem>
};

// ======================== EQUIVALENCE & SUPERCELLS ========================
pub use lattice_equivalence::{
    is_equivalent_unit_cell,        // fn(test: T, reference: T, tol: &Tolerance) -> Result<bool> - same lattice?
    is_supercell,                   // fn(test: &LatticeConstants, reference: &LatticeConstants, tol: f64, max_index: i32) -> Result<bool>
    signed_permutations,            // fn() -> Vec<Matrix3<i8>> - the 48 axis relabelings
    centering_preserving_permutations, // fn(centering: Centering) -> Vec<Matrix3<i8>> - relabelings that keep the centered face
};

pub mod prelude {
    pub use super::{
        conventional_cell, is_equivalent_unit_cell, is_supercell, standardize, ApproxEq,
        Centering, CubicLatticeConstants, HexagonalLatticeConstants, LatticeConstantDeltas,
        LatticeConstants, LatticeSystem, MonoclinicLatticeConstants,
        OrthorhombicLatticeConstants, RhombohedralLatticeConstants, TetragonalLatticeConstants,
        Tolerance, TriclinicLatticeConstants, UnitCell,
    };
}
