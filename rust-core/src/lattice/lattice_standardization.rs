use log::{debug, trace};
use std::f64::consts::PI;

use crate::config::{MAX_REDUCTION_ITERATIONS, REDUCTION_TOLERANCE};
use crate::error::{LatticeError, Result};
use crate::lattice::lattice_constants::{
    LatticeConstants, MonoclinicLatticeConstants, OrthorhombicLatticeConstants,
};
use crate::lattice::lattice_reduction::standardize_triclinic;
use crate::lattice::lattice_types::{is_bravais_lattice, Centering, LatticeSystem};

/// Canonical representative of a cell within its own lattice system.
///
/// Fails with [`LatticeError::InvalidBravaisLattice`] when the (lattice system, centering)
/// pair is not one of the 14 Bravais lattices. Monoclinic base-centered cells come back
/// body-centered.
pub fn standardize(
    lattice_constants: &LatticeConstants,
    centering: Centering,
) -> Result<(LatticeConstants, Centering)> {
    let system = lattice_constants.lattice_system();
    if !is_bravais_lattice(system, centering) {
        return Err(LatticeError::invalid_bravais_lattice(system, centering));
    }

    match lattice_constants {
        LatticeConstants::Triclinic(lc) => Ok((standardize_triclinic(lc)?.into(), centering)),
        LatticeConstants::Monoclinic(lc) => {
            let (lc, centering) = standardize_monoclinic(lc, centering)?;
            Ok((lc.into(), centering))
        }
        LatticeConstants::Orthorhombic(lc) => {
            Ok((standardize_orthorhombic(lc, centering)?.into(), centering))
        }
        // Tetragonal, hexagonal, rhombohedral and cubic cells carry only the free
        // parameters of their system; the constructors already enforce the ranges.
        LatticeConstants::Tetragonal(_)
        | LatticeConstants::Hexagonal(_)
        | LatticeConstants::Rhombohedral(_)
        | LatticeConstants::Cubic(_) => Ok((*lattice_constants, centering)),
    }
}

// ======================== ORTHORHOMBIC ========================

/// Sort edges ascending. Base-centered cells keep `c` (normal to the centered face) fixed.
pub fn standardize_orthorhombic(
    lattice_constants: &OrthorhombicLatticeConstants,
    centering: Centering,
) -> Result<OrthorhombicLatticeConstants> {
    let (a, b, c) = (lattice_constants.a(), lattice_constants.b(), lattice_constants.c());
    match centering {
        Centering::Base => OrthorhombicLatticeConstants::new(a.min(b), a.max(b), c),
        _ => {
            let mut edges = [a, b, c];
            edges.sort_by(f64::total_cmp);
            OrthorhombicLatticeConstants::new(edges[0], edges[1], edges[2])
        }
    }
}

// ======================== MONOCLINIC ========================

/// IUCr conventions for monoclinic cells with unique axis `b`.
///
/// The result satisfies `a <= c`, `pi/2 <= beta < pi` and the reduced-cell condition of
/// the a-c plane: `-2c cos(beta) <= a` for primitive cells, `-c cos(beta) <= a` for
/// body-centered cells. Base-centered cells are rewritten as body-centered first.
pub fn standardize_monoclinic(
    lattice_constants: &MonoclinicLatticeConstants,
    centering: Centering,
) -> Result<(MonoclinicLatticeConstants, Centering)> {
    let translation_multiple = match centering {
        Centering::Primitive => 1.0,
        Centering::Body => 2.0,
        Centering::Base => {
            let body = convert_to_body_centering(lattice_constants)?;
            debug!("monoclinic base-centered cell rewritten as body-centered: {:?}", body);
            return standardize_monoclinic(&body, Centering::Body);
        }
        Centering::Face => {
            return Err(LatticeError::invalid_bravais_lattice(
                LatticeSystem::Monoclinic,
                centering,
            ))
        }
    };

    let b = lattice_constants.b();
    let mut a = lattice_constants.a();
    let mut c = lattice_constants.c();
    let mut beta = lattice_constants.beta();

    // Obtuse beta (reflect a -> -a)
    if beta < PI / 2.0 {
        beta = PI - beta;
    }
    if a > c {
        std::mem::swap(&mut a, &mut c);
    }

    // Gauss reduction of the a-c plane: replace c by the shortest translation c + k m a
    // (m = 1 primitive, m = 2 body) and swap when c becomes the shorter edge. Each pass
    // strictly shortens c.
    let m = translation_multiple;
    for iteration in 0..MAX_REDUCTION_ITERATIONS {
        let cos_beta = beta.cos();
        if -2.0 / m * c * cos_beta <= a {
            trace!("monoclinic a-c plane reduced after {} iterations", iteration);
            return Ok((MonoclinicLatticeConstants::new(a, b, c, beta)?, centering));
        }

        // Components of c parallel and normal to a; the normal part fixes the face area
        let k = (-c * cos_beta / (m * a)).round().max(1.0);
        let parallel = c * cos_beta + k * m * a;
        let normal = c * beta.sin();
        let c_alt = parallel.hypot(normal);
        if !(c_alt < c * (1.0 - REDUCTION_TOLERANCE)) {
            // Violation is at the level of floating-point noise
            trace!("monoclinic reduction stopped at boundary: c = {}, c_alt = {}", c, c_alt);
            return Ok((MonoclinicLatticeConstants::new(a, b, c, beta)?, centering));
        }

        // a -> -a keeps the lattice and its centering, so beta stays obtuse
        beta = normal.atan2(parallel);
        if beta < PI / 2.0 {
            beta = PI - beta;
        }
        c = c_alt;
        if c < a {
            std::mem::swap(&mut a, &mut c);
        }
        debug!(
            "monoclinic reduction step {} (k = {}): a = {}, c = {}, beta = {}",
            iteration + 1,
            k,
            a,
            c,
            beta
        );
    }

    Err(LatticeError::ReductionDidNotConverge {
        stage: "monoclinic a-c plane",
        iterations: MAX_REDUCTION_ITERATIONS,
    })
}

/// Body-centered description of a base-centered monoclinic lattice.
///
/// With base-centered edges `a`, `c`, the body-centered cell has edges `a + c` and `-c`:
/// `a' = |a + c|`, `c' = c`, and `beta'` is the angle between `a + c` and `-c` (law of
/// cosines, evaluated through `atan2` so that thin cells keep their precision).
pub fn convert_to_body_centering(
    lattice_constants: &MonoclinicLatticeConstants,
) -> Result<MonoclinicLatticeConstants> {
    let (a, b, c, beta) = (
        lattice_constants.a(),
        lattice_constants.b(),
        lattice_constants.c(),
        lattice_constants.beta(),
    );

    let a_body = (a + c * beta.cos()).hypot(c * beta.sin());
    let c_body = c;
    // Angle between a + c and c: |(a + c) x c| = a c sin(beta), (a + c) . c = a c cos(beta) + c^2
    let angle = (a * beta.sin()).atan2(a * beta.cos() + c);
    let beta_body = PI - angle;

    MonoclinicLatticeConstants::new(a_body, b, c_body, beta_body)
}

/// Base-centered description of a body-centered monoclinic lattice.
///
/// Inverse of [`convert_to_body_centering`]: `a = |a' + c'|`, `c = c'`, and `beta` from the
/// face area `a c sin(beta) = a' c' sin(beta')`, chosen obtuse.
pub fn convert_to_base_centering(
    lattice_constants: &MonoclinicLatticeConstants,
) -> Result<MonoclinicLatticeConstants> {
    let (a_body, b, c_body, beta_body) = (
        lattice_constants.a(),
        lattice_constants.b(),
        lattice_constants.c(),
        lattice_constants.beta(),
    );

    let a = (a_body * a_body + c_body * c_body + 2.0 * a_body * c_body * beta_body.cos()).sqrt();
    let c = c_body;

    // Only |sin(beta)| is fixed by the lattice (c -> -c keeps the centering), so the
    // obtuse branch is always available. Rounding can push the argument past 1 when
    // beta is a right angle.
    let sin_beta = a_body * beta_body.sin() / a;
    let beta = if sin_beta >= 1.0 {
        PI / 2.0
    } else {
        PI - sin_beta.asin()
    };

    MonoclinicLatticeConstants::new(a, b, c, beta)
}
