use log::{debug, trace};
use nalgebra::{Matrix2, Matrix3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{LatticeError, Result};
use crate::lattice::lattice_constants::{LatticeConstants, MonoclinicLatticeConstants};
use crate::lattice::lattice_types::Centering;
use crate::lattice::lattice_conventional::conventional_cell;
use crate::lattice::tolerance::Tolerance;
use crate::lattice::unit_cell::UnitCell;

// ======================== AXIS RELABELING ========================

/// The 48 signed permutation matrices (the holohedry of the cube).
///
/// Applied to a metric tensor as `P^T G P` they relabel and reverse cell axes without
/// changing the lattice.
pub fn signed_permutations() -> Vec<Matrix3<i8>> {
    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let mut operations = Vec::with_capacity(48);
    for permutation in PERMUTATIONS {
        for signs in 0..8u8 {
            let mut rotation = Matrix3::<i8>::zeros();
            for (column, &row) in permutation.iter().enumerate() {
                rotation[(row, column)] = if signs & (1 << column) == 0 { 1 } else { -1 };
            }
            operations.push(rotation);
        }
    }
    operations
}

/// Signed permutations that keep the centering of a conventional cell.
///
/// Primitive, body and face centerings are invariant under every relabeling. A base
/// centered (C face) cell only allows operations that map `c` onto `+-c`.
pub fn centering_preserving_permutations(centering: Centering) -> Vec<Matrix3<i8>> {
    let mut operations = signed_permutations();
    if centering == Centering::Base {
        operations.retain(|operation| operation[(2, 2)] != 0);
    }
    operations
}

/// Component-wise comparison of two metric tensors relative to the largest diagonal entry.
fn metrics_approx_eq(x: &Matrix3<f64>, y: &Matrix3<f64>, tol: &Tolerance) -> bool {
    let scale = (0..3).map(|i| x[(i, i)].max(y[(i, i)])).fold(0.0_f64, f64::max);
    let threshold = tol.atol.max(tol.rtol * scale);
    x.iter().zip(y.iter()).all(|(a, b)| (a - b).abs() <= threshold)
}

// ======================== EQUIVALENCE ========================

/// Whether two unit cells generate the same lattice.
///
/// Both cells are resolved to their conventional cells. Cells with different lattice
/// systems or centerings are never equivalent; otherwise the metric tensors are compared
/// up to relabeling of the axes. Lattice constants are taken as primitive cells.
pub fn is_equivalent_unit_cell<T: Into<UnitCell>>(
    test: T,
    reference: T,
    tol: &Tolerance,
) -> Result<bool> {
    let test = conventional_cell(&test.into(), tol)?;
    let reference = conventional_cell(&reference.into(), tol)?;

    if test.lattice_system() != reference.lattice_system() {
        trace!(
            "lattice systems differ: {} vs {}",
            test.lattice_system(),
            reference.lattice_system()
        );
        return Ok(false);
    }
    if test.centering() != reference.centering() {
        trace!("centerings differ: {} vs {}", test.centering(), reference.centering());
        return Ok(false);
    }

    // Conventional triclinic cells are already reduced; only the axis labels may differ.
    // Relabelings that move a centered face would compare a different lattice.
    let test_metric = test.lattice_constants().metric_tensor();
    let reference_metric = reference.lattice_constants().metric_tensor();

    let equivalent = centering_preserving_permutations(test.centering())
        .iter()
        .any(|operation| {
            let p = operation.map(f64::from);
            metrics_approx_eq(&(p.transpose() * test_metric * p), &reference_metric, tol)
        });
    debug!("{} equivalent to {}: {}", test, reference, equivalent);
    Ok(equivalent)
}

// ======================== SUPERCELLS ========================

/// Whether `test` is a proper supercell of `reference`: `test` = M `reference` for an
/// integer matrix M with entries in `[-max_index, max_index]` and index `|det M| >= 2`.
///
/// The search is bounded, so supercells that need larger entries are reported as
/// `false`. `tol` is relative to the largest diagonal entry of the test metric tensor.
pub fn is_supercell(
    test: &LatticeConstants,
    reference: &LatticeConstants,
    tol: f64,
    max_index: i32,
) -> Result<bool> {
    if !(tol.is_finite() && tol > 0.0) {
        return Err(LatticeError::invalid_parameter("tol", tol, "must be positive"));
    }
    if max_index <= 0 {
        return Err(LatticeError::invalid_parameter(
            "max_index",
            f64::from(max_index),
            "must be positive",
        ));
    }

    if test.lattice_system() != reference.lattice_system() {
        trace!(
            "supercell check across lattice systems: {} vs {}",
            test.lattice_system(),
            reference.lattice_system()
        );
        return Ok(false);
    }

    let found = match (test, reference) {
        (LatticeConstants::Monoclinic(t), LatticeConstants::Monoclinic(r)) => {
            is_monoclinic_supercell(t, r, tol, max_index)
        }
        _ => is_supercell_metric(
            &test.metric_tensor(),
            &reference.metric_tensor(),
            tol,
            max_index,
        ),
    };
    debug!(
        "supercell search ({}, max_index = {}): {} over {} -> {}",
        test.lattice_system(),
        max_index,
        test,
        reference,
        found
    );
    Ok(found)
}

/// Monoclinic supercells keep the unique axis: `b` is an integer multiple `n` and the
/// a-c plane is a sublattice of the reference a-c plane.
fn is_monoclinic_supercell(
    test: &MonoclinicLatticeConstants,
    reference: &MonoclinicLatticeConstants,
    tol: f64,
    max_index: i32,
) -> bool {
    let ratio = test.b() / reference.b();
    let n = ratio.round();
    if n < 1.0 || (ratio - n).abs() > tol {
        trace!("unique axis ratio {} is not a positive integer", ratio);
        return false;
    }

    let plane_metric = |lc: &MonoclinicLatticeConstants| {
        let ac = lc.a() * lc.c() * lc.beta().cos();
        Matrix2::new(lc.a() * lc.a(), ac, ac, lc.c() * lc.c())
    };
    let g_test = plane_metric(test);
    let g_ref = plane_metric(reference);
    let threshold = tol * g_test[(0, 0)].max(g_test[(1, 1)]);

    let range = -max_index..=max_index;
    for m11 in range.clone() {
        for m21 in range.clone() {
            for m12 in range.clone() {
                for m22 in range.clone() {
                    let det = m11 * m22 - m12 * m21;
                    if det == 0 || (n as i64) * i64::from(det.abs()) < 2 {
                        continue;
                    }
                    let m = Matrix2::new(m11, m12, m21, m22).map(f64::from);
                    let candidate = m.transpose() * g_ref * m;
                    if candidate
                        .iter()
                        .zip(g_test.iter())
                        .all(|(x, y)| (x - y).abs() <= threshold)
                    {
                        trace!("monoclinic supercell: n = {}, M = {}", n, m);
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Bounded search for an integer M with `M^T G_ref M = G_test` and `|det M| >= 2`.
///
/// The columns of M are lattice vectors of the reference whose lengths match the test
/// edges, so each column is drawn from a precomputed candidate list and only triples
/// with matching scalar products are kept.
pub fn is_supercell_metric(
    test_metric: &Matrix3<f64>,
    reference_metric: &Matrix3<f64>,
    tol: f64,
    max_index: i32,
) -> bool {
    let scale = (0..3).map(|i| test_metric[(i, i)]).fold(0.0_f64, f64::max);
    let threshold = tol * scale;

    let mut lattice_vectors = Vec::new();
    for i in -max_index..=max_index {
        for j in -max_index..=max_index {
            for k in -max_index..=max_index {
                if (i, j, k) != (0, 0, 0) {
                    lattice_vectors.push(Vector3::new(i, j, k));
                }
            }
        }
    }

    let dot = |u: &Vector3<i32>, v: &Vector3<i32>| -> f64 {
        u.map(f64::from).dot(&(reference_metric * v.map(f64::from)))
    };
    let candidates: Vec<Vec<Vector3<i32>>> = (0..3)
        .map(|axis| {
            lattice_vectors
                .iter()
                .copied()
                .filter(|v| (dot(v, v) - test_metric[(axis, axis)]).abs() <= threshold)
                .collect()
        })
        .collect();
    trace!(
        "supercell column candidates: {} / {} / {}",
        candidates[0].len(),
        candidates[1].len(),
        candidates[2].len()
    );

    let completes = |v1: &Vector3<i32>| {
        candidates[1].iter().any(|v2| {
            if (dot(v1, v2) - test_metric[(0, 1)]).abs() > threshold {
                return false;
            }
            candidates[2].iter().any(|v3| {
                (dot(v1, v3) - test_metric[(0, 2)]).abs() <= threshold
                    && (dot(v2, v3) - test_metric[(1, 2)]).abs() <= threshold
                    && integer_determinant(v1, v2, v3).abs() >= 2
            })
        })
    };

    #[cfg(feature = "parallel")]
    {
        candidates[0].par_iter().any(completes)
    }

    #[cfg(not(feature = "parallel"))]
    {
        candidates[0].iter().any(completes)
    }
}

fn integer_determinant(v1: &Vector3<i32>, v2: &Vector3<i32>, v3: &Vector3<i32>) -> i64 {
    let [a, b, c] = [v1, v2, v3].map(|v| v.map(i64::from));
    a.dot(&b.cross(&c))
}
