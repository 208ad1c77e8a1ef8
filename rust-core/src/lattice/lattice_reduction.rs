use log::{debug, trace};
use nalgebra::{Matrix3, Vector3};

use crate::config::{BASE_VECTOR_TOLERANCE, MAX_DELAUNAY_ITERATIONS, REDUCTION_TOLERANCE};
use crate::error::{LatticeError, Result};
use crate::lattice::base_matrix::{basis, primitive_basis, BaseMatrix};
use crate::lattice::lattice_constants::{LatticeConstants, TriclinicLatticeConstants};
use crate::lattice::unit_cell::UnitCell;

/// Pairwise size reduction: subtract from each vector the nearest-integer multiple of a
/// shorter one until no projection exceeds half of the shorter vector.
///
/// Long, skewed bases are brought close to reduced in a few passes, independent of the
/// edge ratio.
pub fn size_reduce(basis: &[Vector3<f64>; 3]) -> Result<[Vector3<f64>; 3]> {
    let mut reduced = BaseMatrix::from_base_vectors(basis[0], basis[1], basis[2])?.base_vectors();

    for pass in 0..MAX_DELAUNAY_ITERATIONS {
        reduced.sort_by(|x, y| x.norm_squared().total_cmp(&y.norm_squared()));

        let mut changed = false;
        for i in 1..3 {
            for j in 0..i {
                let ratio = reduced[i].dot(&reduced[j]) / reduced[j].norm_squared();
                if ratio.abs() > 0.5 + REDUCTION_TOLERANCE {
                    let shift = reduced[j] * ratio.round();
                    reduced[i] -= shift;
                    changed = true;
                }
            }
        }

        if !changed {
            trace!("size reduction finished after {} passes", pass);
            return Ok(reduced);
        }
    }

    Err(LatticeError::ReductionDidNotConverge {
        stage: "size",
        iterations: MAX_DELAUNAY_ITERATIONS,
    })
}

/// Delaunay (Selling) reduction of a basis.
///
/// The basis is size-reduced first. The superbase {b1, b2, b3, b4 = -(b1 + b2 + b3)} is
/// then reduced by repeatedly removing a positive scalar product b_i . b_j through the
/// substitution b_k += b_i (k != i, j), b_i = -b_i, until all six scalar products are
/// non-positive. Every substitution lowers the sum of squared lengths of the superbase,
/// so the loop terminates.
pub fn delaunay_reduce(basis: &[Vector3<f64>; 3]) -> Result<[Vector3<f64>; 3]> {
    let [b1, b2, b3] = size_reduce(basis)?;
    let mut superbase = [b1, b2, b3, -(b1 + b2 + b3)];

    for iteration in 0..MAX_DELAUNAY_ITERATIONS {
        let scale = superbase
            .iter()
            .map(|v| v.norm_squared())
            .fold(0.0_f64, f64::max);

        let positive_pair = (0..4)
            .flat_map(|i| ((i + 1)..4).map(move |j| (i, j)))
            .find(|&(i, j)| superbase[i].dot(&superbase[j]) > REDUCTION_TOLERANCE * scale);

        let Some((i, j)) = positive_pair else {
            trace!("Delaunay reduction finished after {} iterations", iteration);
            return Ok([superbase[0], superbase[1], superbase[2]]);
        };

        let pivot = superbase[i];
        for (k, v) in superbase.iter_mut().enumerate() {
            if k != i && k != j {
                *v += pivot;
            }
        }
        superbase[i] = -pivot;
    }

    Err(LatticeError::ReductionDidNotConverge {
        stage: "Delaunay",
        iterations: MAX_DELAUNAY_ITERATIONS,
    })
}

/// Shortest three linearly independent vectors of a Delaunay-reduced superbase,
/// ordered by length and with signs chosen so that the inter-axial angles are either
/// all acute or all non-acute.
pub fn shortest_basis(delaunay_basis: &[Vector3<f64>; 3]) -> Result<[Vector3<f64>; 3]> {
    let [v1, v2, v3] = *delaunay_basis;
    let lattice_volume = BaseMatrix::from_base_vectors(v1, v2, v3)?.volume();

    let v4 = -(v1 + v2 + v3);
    let mut candidates = vec![v1, v2, v3, v4, v1 + v2, v1 + v3, v2 + v3];
    candidates.sort_by(|x, y| x.norm_squared().total_cmp(&y.norm_squared()));

    let mut chosen: Vec<Vector3<f64>> = Vec::with_capacity(3);
    for candidate in candidates {
        let accepted = match chosen.len() {
            0 => true,
            1 => chosen[0].cross(&candidate).norm()
                > BASE_VECTOR_TOLERANCE * chosen[0].norm() * candidate.norm(),
            // Pairwise sums can span an index-2 sublattice; the third vector must
            // complete a basis of the full lattice
            _ => {
                let volume = Matrix3::from_columns(&[chosen[0], chosen[1], candidate])
                    .determinant()
                    .abs();
                (volume - lattice_volume).abs() <= REDUCTION_TOLERANCE.sqrt() * lattice_volume
            }
        };
        if accepted {
            chosen.push(candidate);
            if chosen.len() == 3 {
                break;
            }
        }
    }

    if chosen.len() < 3 {
        debug!("no shorter basis among the Delaunay vectors, keeping the Delaunay basis");
        let mut fallback = [v1, v2, v3];
        fallback.sort_by(|x, y| x.norm_squared().total_cmp(&y.norm_squared()));
        return Ok(normalize_angle_signs(fallback));
    }

    Ok(normalize_angle_signs([chosen[0], chosen[1], chosen[2]]))
}

/// Flip vector signs so that all three scalar products share a sign: all positive
/// (type I cell) when their product is positive, otherwise all non-positive (type II).
fn normalize_angle_signs(basis: [Vector3<f64>; 3]) -> [Vector3<f64>; 3] {
    let scale = basis.iter().map(|v| v.norm_squared()).fold(0.0_f64, f64::max);
    let eps = REDUCTION_TOLERANCE * scale;
    let products = |b: &[Vector3<f64>; 3]| [b[0].dot(&b[1]), b[0].dot(&b[2]), b[1].dot(&b[2])];

    let [g12, g13, g23] = products(&basis);
    let type_one = g12.abs() > eps && g13.abs() > eps && g23.abs() > eps && g12 * g13 * g23 > 0.0;

    for signs in [
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0],
    ] {
        let flipped = [basis[0] * signs[0], basis[1] * signs[1], basis[2] * signs[2]];
        let accepted = if type_one {
            products(&flipped).iter().all(|&g| g > 0.0)
        } else {
            products(&flipped).iter().all(|&g| g <= eps)
        };
        if accepted {
            return flipped;
        }
    }

    basis
}

/// Reduced triclinic description of the basis: Delaunay reduction followed by the
/// choice of the shortest three vectors.
pub fn reduce_basis(basis: &[Vector3<f64>; 3]) -> Result<TriclinicLatticeConstants> {
    let delaunay = delaunay_reduce(basis)?;
    let shortest = shortest_basis(&delaunay)?;
    TriclinicLatticeConstants::from_basis(&shortest)
}

/// Triclinic standardization: reduced cell with `a <= b <= c` and all angles acute or
/// all non-acute.
pub fn standardize_triclinic(
    lattice_constants: &TriclinicLatticeConstants,
) -> Result<TriclinicLatticeConstants> {
    let reduced = reduce_basis(&basis(&LatticeConstants::Triclinic(*lattice_constants)))?;
    debug!("triclinic cell reduced to {:?}", reduced);
    Ok(reduced)
}

/// Reduced (primitive, triclinic) cell of the lattice generated by a unit cell.
///
/// Two unit cells describe the same lattice exactly when their reduced cells agree
/// (up to the ambiguities of cells with equal edge lengths).
pub fn reduced_cell(unit_cell: &UnitCell) -> Result<UnitCell> {
    let primitive = primitive_basis(unit_cell.lattice_constants(), unit_cell.centering())?;
    let reduced = reduce_basis(&primitive)?;
    Ok(UnitCell::primitive(reduced))
}
