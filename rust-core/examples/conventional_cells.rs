//! Walk through the standardization pipeline on a few hand-picked cells.
//!
//! Each cell is printed as given, standardized within its own lattice system and
//! finally resolved to its conventional cell.

use std::f64::consts::{PI, SQRT_2};
use xtallography::lattice::{
    conventional_cell, is_equivalent_unit_cell, is_supercell, Centering, CubicLatticeConstants,
    LatticeConstants, MonoclinicLatticeConstants, OrthorhombicLatticeConstants,
    RhombohedralLatticeConstants, TetragonalLatticeConstants, Tolerance, UnitCell,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let tol = Tolerance::default();

    println!("=== Conventional cells ===\n");
    let cells = [
        (
            "Tetragonal with a = c",
            UnitCell::primitive(TetragonalLatticeConstants::new(5.0, 5.0)?),
        ),
        (
            "Body-centered tetragonal with c = sqrt(2) a",
            UnitCell::new(TetragonalLatticeConstants::new(5.0, 5.0 * SQRT_2)?, Centering::Body),
        ),
        (
            "Base-centered monoclinic",
            UnitCell::new(
                MonoclinicLatticeConstants::new(6.0, 10.0, 8.0, 1.1 * PI / 2.0)?,
                Centering::Base,
            ),
        ),
        (
            "Face-centered orthorhombic with a square face",
            UnitCell::new(OrthorhombicLatticeConstants::new(4.0, 4.0, 7.0)?, Centering::Face),
        ),
        (
            "Rhombohedral with alpha = 60 degrees",
            UnitCell::primitive(RhombohedralLatticeConstants::new(2.0, PI / 3.0)?),
        ),
    ];

    for (label, cell) in cells {
        println!("{}:", label);
        println!("   given:        {}", cell);
        println!("   standardized: {}", cell.standardize()?);
        let conventional = conventional_cell(&cell, &tol)?;
        println!("   conventional: {}", conventional);
        println!(
            "   volume per lattice point: {:.4} -> {:.4}\n",
            cell.primitive_volume(),
            conventional.primitive_volume()
        );
    }

    println!("=== Equivalence ===\n");
    let fcc_as_rhombohedron =
        UnitCell::primitive(RhombohedralLatticeConstants::new(SQRT_2, PI / 3.0)?);
    let fcc = UnitCell::new(CubicLatticeConstants::new(2.0)?, Centering::Face);
    println!(
        "{} ~ {}: {}\n",
        fcc_as_rhombohedron,
        fcc,
        is_equivalent_unit_cell(fcc_as_rhombohedron, fcc, &tol)?
    );

    println!("=== Supercells ===\n");
    let reference: LatticeConstants = MonoclinicLatticeConstants::new(2.0, 3.0, 4.0, 1.9)?.into();
    let tripled: LatticeConstants = MonoclinicLatticeConstants::new(2.0, 9.0, 4.0, 1.9)?.into();
    println!(
        "{} supercell of {}: {}",
        tripled,
        reference,
        is_supercell(&tripled, &reference, 1e-3, 3)?
    );
    println!(
        "{} supercell of {}: {}",
        reference,
        tripled,
        is_supercell(&reference, &tripled, 1e-3, 3)?
    );

    Ok(())
}
