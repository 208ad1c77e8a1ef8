use log::{debug, trace};
use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};

use crate::config::MAX_RESOLUTION_DEPTH;
use crate::error::{LatticeError, Result};
use crate::lattice::lattice_constants::{
    CubicLatticeConstants, HexagonalLatticeConstants, LatticeConstants,
    MonoclinicLatticeConstants, OrthorhombicLatticeConstants, RhombohedralLatticeConstants,
    TetragonalLatticeConstants,
};
use crate::lattice::lattice_types::{Centering, LatticeSystem};
use crate::lattice::tolerance::Tolerance;
use crate::lattice::unit_cell::UnitCell;

/// A detected degeneracy: why it fired and the cell re-expressed in the higher-symmetry system.
pub type LimitingCase = (&'static str, UnitCell);

/// IUCr conventional cell of the lattice generated by `unit_cell`.
///
/// The cell is standardized, then the limiting-case predicates of its (lattice system,
/// centering) state are tested in a fixed order. The first predicate that holds
/// re-expresses the cell in a higher-symmetry lattice system and resolution continues
/// from there; the result is the first state where no predicate holds.
///
/// Every transition strictly raises the lattice-system symmetry, so at most
/// [`MAX_RESOLUTION_DEPTH`] transitions can occur; a revisited state is reported as
/// [`LatticeError::ResolutionDidNotTerminate`].
pub fn conventional_cell(unit_cell: &UnitCell, tol: &Tolerance) -> Result<UnitCell> {
    let mut current = unit_cell.standardize()?;
    let mut visited = vec![(current.lattice_system(), current.centering())];

    for depth in 0..MAX_RESOLUTION_DEPTH {
        let Some((reason, next)) = limiting_case(&current, tol) else {
            trace!("conventional cell resolved after {} transitions: {}", depth, current);
            return Ok(current);
        };

        let next = next.standardize()?;
        debug!("limiting case ({}): {} -> {}", reason, current, next);

        let state = (next.lattice_system(), next.centering());
        if visited.contains(&state) {
            return Err(LatticeError::ResolutionDidNotTerminate {
                system: state.0,
                centering: state.1,
                depth: depth + 1,
            });
        }
        visited.push(state);
        current = next;
    }

    match limiting_case(&current, tol) {
        None => Ok(current),
        Some(_) => Err(LatticeError::ResolutionDidNotTerminate {
            system: current.lattice_system(),
            centering: current.centering(),
            depth: MAX_RESOLUTION_DEPTH,
        }),
    }
}

/// First limiting case that applies to a standardized cell, if any.
pub fn limiting_case(unit_cell: &UnitCell, tol: &Tolerance) -> Option<LimitingCase> {
    trace!("testing limiting cases of {}", unit_cell);
    let centering = unit_cell.centering();
    match unit_cell.lattice_constants() {
        LatticeConstants::Monoclinic(lc) => monoclinic_limiting_case(lc, centering, tol),
        LatticeConstants::Orthorhombic(lc) => orthorhombic_limiting_case(lc, centering, tol),
        LatticeConstants::Tetragonal(lc) => tetragonal_limiting_case(lc, centering, tol),
        LatticeConstants::Rhombohedral(lc) => rhombohedral_limiting_case(lc, tol),
        // No continuous degeneracy leads out of these systems
        LatticeConstants::Triclinic(_)
        | LatticeConstants::Hexagonal(_)
        | LatticeConstants::Cubic(_) => None,
    }
}

// ======================== MONOCLINIC ========================

fn monoclinic_limiting_case(
    lc: &MonoclinicLatticeConstants,
    centering: Centering,
    tol: &Tolerance,
) -> Option<LimitingCase> {
    let (a, b, c, beta) = (lc.a(), lc.b(), lc.c(), lc.beta());
    let cos_beta = beta.cos();

    // In-plane diagonals |a + c| and |a - c|
    let diagonal_short = (a * a + c * c + 2.0 * a * c * cos_beta).max(0.0).sqrt();
    let diagonal_long = (a * a + c * c - 2.0 * a * c * cos_beta).max(0.0).sqrt();

    match centering {
        Centering::Primitive => {
            if is_right_angle(beta, tol) {
                return orthorhombic("beta = pi/2", a, b, c, Centering::Primitive);
            }
            // a + c and a - c are orthogonal: rectangle centered in the a-c plane
            if tol.approx_eq(a, c) {
                return orthorhombic(
                    "a = c",
                    diagonal_short,
                    diagonal_long,
                    b,
                    Centering::Base,
                );
            }
            // a and 2c + a are orthogonal
            if tol.approx_eq(a, -2.0 * c * cos_beta) {
                let c_rect = (4.0 * c * c - a * a).max(0.0).sqrt();
                return orthorhombic("a = -2c cos(beta)", a, c_rect, b, Centering::Base);
            }
            None
        }
        Centering::Body => {
            if is_right_angle(beta, tol) {
                return orthorhombic("beta = pi/2", a, b, c, Centering::Body);
            }
            if tol.approx_eq(a, c) {
                return orthorhombic("a = c", diagonal_short, b, diagonal_long, Centering::Face);
            }
            // a and c + a are orthogonal; the body center sits on the (b, c + a) face,
            // which becomes the centered face with `a` as the unique axis
            if tol.approx_eq(a, -c * cos_beta) {
                let c_rect = (c * c - a * a).max(0.0).sqrt();
                return orthorhombic("a = -c cos(beta)", b, c_rect, a, Centering::Base);
            }
            monoclinic_rhombohedral_case(a, b, c, cos_beta, tol)
        }
        Centering::Base | Centering::Face => None,
    }
}

/// Body-centered monoclinic descriptions of a rhombohedral lattice (a_r, alpha).
///
/// With rhombohedral basis r1, r2, r3 the unique axis is r1 - r2 (b = 2 a_r sin(alpha/2)).
/// For alpha <= pi/2 the standardized cell is (r3, r1 - r2, r1 + r2 - r3), so that
/// a^2 + b^2 = c^2 and |a c cos(beta)| = |a^2 - b^2|, the sign of a^2 - b^2 switching at
/// alpha = pi/3. For larger alpha the reduced cell is (r3, r1 - r2, r1 + r2 + r3), whose
/// in-plane edges exchange roles at alpha = acos(-1/3).
fn monoclinic_rhombohedral_case(
    a: f64,
    b: f64,
    c: f64,
    cos_beta: f64,
    tol: &Tolerance,
) -> Option<LimitingCase> {
    if tol.approx_eq(a * a + b * b, c * c) {
        let companion = if b < a {
            // alpha < pi/3
            tol.approx_eq(a * c * cos_beta + a * a, b * b)
        } else {
            // pi/3 < alpha <= pi/2
            tol.approx_eq(a * c * cos_beta + b * b, a * a)
        };
        if companion {
            return rhombohedral("a^2 + b^2 = c^2 (alpha <= pi/2)", a, b);
        }
    }

    // pi/2 < alpha <= acos(-1/3)
    if tol.approx_eq(3.0 * b * b + c * c, 9.0 * a * a) && tol.approx_eq(-3.0 * a * cos_beta, c) {
        return rhombohedral("3b^2 + c^2 = 9a^2", a, b);
    }

    // acos(-1/3) < alpha < 2pi/3
    if tol.approx_eq(3.0 * b * b + a * a, 9.0 * c * c) && tol.approx_eq(-3.0 * c * cos_beta, a) {
        return rhombohedral("3b^2 + a^2 = 9c^2", c, b);
    }

    None
}

// ======================== ORTHORHOMBIC ========================

fn orthorhombic_limiting_case(
    lc: &OrthorhombicLatticeConstants,
    centering: Centering,
    tol: &Tolerance,
) -> Option<LimitingCase> {
    let (a, b, c) = (lc.a(), lc.b(), lc.c());

    match centering {
        Centering::Primitive | Centering::Body => {
            if tol.approx_eq(a, b) {
                return tetragonal("a = b", a, c, centering);
            }
            if tol.approx_eq(b, c) {
                return tetragonal("b = c", b, a, centering);
            }
            None
        }
        // Face-centered square prism = body-centered square prism rotated by pi/4
        Centering::Face => {
            if tol.approx_eq(a, b) {
                return tetragonal("a = b", a * FRAC_1_SQRT_2, c, Centering::Body);
            }
            if tol.approx_eq(b, c) {
                return tetragonal("b = c", b * FRAC_1_SQRT_2, a, Centering::Body);
            }
            None
        }
        Centering::Base => {
            if tol.approx_eq(a, b) {
                return tetragonal("a = b", a * FRAC_1_SQRT_2, c, Centering::Primitive);
            }
            if tol.approx_eq(b, 2.0 * a * (PI / 3.0).sin()) {
                return HexagonalLatticeConstants::new(a, c)
                    .ok()
                    .map(|hex| ("b = 2a sin(pi/3)", UnitCell::primitive(hex)));
            }
            None
        }
    }
}

// ======================== TETRAGONAL ========================

fn tetragonal_limiting_case(
    lc: &TetragonalLatticeConstants,
    centering: Centering,
    tol: &Tolerance,
) -> Option<LimitingCase> {
    let (a, c) = (lc.a(), lc.c());

    if tol.approx_eq(a, c) {
        return cubic("a = c", a, centering);
    }
    // Body-centered (a, a, sqrt(2) a) is face-centered cubic with edge c
    if centering == Centering::Body && tol.approx_eq(c, SQRT_2 * a) {
        return cubic("c = sqrt(2) a", c, Centering::Face);
    }
    None
}

// ======================== RHOMBOHEDRAL ========================

fn rhombohedral_limiting_case(
    lc: &RhombohedralLatticeConstants,
    tol: &Tolerance,
) -> Option<LimitingCase> {
    let (a, alpha) = (lc.a(), lc.alpha());

    if is_right_angle(alpha, tol) {
        return cubic("alpha = pi/2", a, Centering::Primitive);
    }
    if tol.approx_eq(alpha, PI / 3.0) {
        return cubic("alpha = pi/3", SQRT_2 * a, Centering::Face);
    }
    if tol.approx_eq(alpha, (-1.0_f64 / 3.0).acos()) {
        return cubic("alpha = acos(-1/3)", 2.0 * a / 3.0_f64.sqrt(), Centering::Body);
    }
    None
}

// ======================== HELPERS ========================

/// Check if angle is approximately 90 degrees (pi/2 radians)
fn is_right_angle(angle: f64, tol: &Tolerance) -> bool {
    tol.approx_eq(angle, PI / 2.0)
}

fn orthorhombic(
    reason: &'static str,
    a: f64,
    b: f64,
    c: f64,
    centering: Centering,
) -> Option<LimitingCase> {
    OrthorhombicLatticeConstants::new(a, b, c)
        .ok()
        .map(|lc| (reason, UnitCell::new(lc, centering)))
}

fn tetragonal(reason: &'static str, a: f64, c: f64, centering: Centering) -> Option<LimitingCase> {
    TetragonalLatticeConstants::new(a, c)
        .ok()
        .map(|lc| (reason, UnitCell::new(lc, centering)))
}

fn cubic(reason: &'static str, a: f64, centering: Centering) -> Option<LimitingCase> {
    CubicLatticeConstants::new(a)
        .ok()
        .map(|lc| (reason, UnitCell::new(lc, centering)))
}

/// Rhombohedral lattice with edge `edge` whose two-fold axis r1 - r2 has length `b`.
fn rhombohedral(reason: &'static str, edge: f64, b: f64) -> Option<LimitingCase> {
    let cos_alpha = (1.0 - b * b / (2.0 * edge * edge)).clamp(-1.0, 1.0);
    RhombohedralLatticeConstants::new(edge, cos_alpha.acos())
        .ok()
        .map(|lc| (reason, UnitCell::primitive(lc)))
}

/// Lattice system the conventional cell of `unit_cell` belongs to.
pub fn conventional_lattice_system(unit_cell: &UnitCell, tol: &Tolerance) -> Result<LatticeSystem> {
    Ok(conventional_cell(unit_cell, tol)?.lattice_system())
}
