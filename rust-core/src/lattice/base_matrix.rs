use nalgebra::{Matrix3, Vector3};

use crate::config::BASE_VECTOR_TOLERANCE;
use crate::error::{LatticeError, Result};
use crate::lattice::lattice_constants::{normalized_gram_determinant, LatticeConstants};
use crate::lattice::lattice_types::{is_bravais_lattice, Centering};

/// Three linearly independent basis vectors stored as the columns of a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseMatrix {
    base_matrix: Matrix3<f64>,
}

impl BaseMatrix {
    pub fn from_base_vectors(
        base_1: Vector3<f64>,
        base_2: Vector3<f64>,
        base_3: Vector3<f64>,
    ) -> Result<Self> {
        Self::from_matrix(Matrix3::from_columns(&[base_1, base_2, base_3]))
    }

    pub fn from_matrix(matrix: Matrix3<f64>) -> Result<Self> {
        // Linearly non-dependent, measured against the size of the vectors
        let scale: f64 = (0..3).map(|i| matrix.column(i).norm()).product();
        let determinant = matrix.determinant();
        if !determinant.is_finite() || determinant.abs() <= BASE_VECTOR_TOLERANCE * scale {
            return Err(LatticeError::SingularBasis { determinant });
        }

        Ok(BaseMatrix {
            base_matrix: matrix,
        })
    }

    pub fn base_vectors(&self) -> [Vector3<f64>; 3] {
        [
            self.base_matrix.column(0).into(),
            self.base_matrix.column(1).into(),
            self.base_matrix.column(2).into(),
        ]
    }

    /// Unsigned volume of the spanned parallelepiped.
    pub fn volume(&self) -> f64 {
        self.base_matrix.determinant().abs()
    }
}

// ======================== BASIS OF LATTICE CONSTANTS ========================

/// Basis vectors of a cell in the canonical Cartesian frame.
///
/// `a` always lies along x. Monoclinic cells put the unique axis `b` along y, so that
/// `a` and `c` span the xz-plane; triclinic, hexagonal and rhombohedral cells put `b`
/// in the xy-plane.
pub fn basis(lattice_constants: &LatticeConstants) -> [Vector3<f64>; 3] {
    match lattice_constants {
        LatticeConstants::Triclinic(lc) => {
            let (a, b, c) = (lc.a(), lc.b(), lc.c());
            let (ca, cb) = (lc.alpha().cos(), lc.beta().cos());
            let (cg, sg) = (lc.gamma().cos(), lc.gamma().sin());
            let v = normalized_gram_determinant(lc.alpha(), lc.beta(), lc.gamma()).sqrt();
            [
                Vector3::new(a, 0.0, 0.0),
                Vector3::new(b * cg, b * sg, 0.0),
                Vector3::new(c * cb, c * (ca - cb * cg) / sg, c * v / sg),
            ]
        }
        LatticeConstants::Monoclinic(lc) => {
            let (c, beta) = (lc.c(), lc.beta());
            [
                Vector3::new(lc.a(), 0.0, 0.0),
                Vector3::new(0.0, lc.b(), 0.0),
                Vector3::new(c * beta.cos(), 0.0, c * beta.sin()),
            ]
        }
        LatticeConstants::Orthorhombic(lc) => diagonal_basis(lc.a(), lc.b(), lc.c()),
        LatticeConstants::Tetragonal(lc) => diagonal_basis(lc.a(), lc.a(), lc.c()),
        LatticeConstants::Hexagonal(lc) => {
            let a = lc.a();
            [
                Vector3::new(a, 0.0, 0.0),
                Vector3::new(-a / 2.0, a * 3.0_f64.sqrt() / 2.0, 0.0),
                Vector3::new(0.0, 0.0, lc.c()),
            ]
        }
        LatticeConstants::Rhombohedral(lc) => {
            let a = lc.a();
            let (ca, sa) = (lc.alpha().cos(), lc.alpha().sin());
            let v = normalized_gram_determinant(lc.alpha(), lc.alpha(), lc.alpha()).sqrt();
            [
                Vector3::new(a, 0.0, 0.0),
                Vector3::new(a * ca, a * sa, 0.0),
                Vector3::new(a * ca, a * (ca - ca * ca) / sa, a * v / sa),
            ]
        }
        LatticeConstants::Cubic(lc) => diagonal_basis(lc.a(), lc.a(), lc.a()),
    }
}

fn diagonal_basis(a: f64, b: f64, c: f64) -> [Vector3<f64>; 3] {
    [
        Vector3::new(a, 0.0, 0.0),
        Vector3::new(0.0, b, 0.0),
        Vector3::new(0.0, 0.0, c),
    ]
}

/// Basis vectors as the columns of a matrix.
pub fn basis_matrix(lattice_constants: &LatticeConstants) -> Matrix3<f64> {
    Matrix3::from_columns(&basis(lattice_constants))
}

/// Metric tensor (Gram matrix) of the basis.
pub fn metric_tensor(lattice_constants: &LatticeConstants) -> Matrix3<f64> {
    let b = basis_matrix(lattice_constants);
    b.transpose() * b
}

/// Volume of the cell, computed in closed form for each lattice system.
pub fn volume(lattice_constants: &LatticeConstants) -> f64 {
    match lattice_constants {
        LatticeConstants::Triclinic(lc) => {
            lc.a()
                * lc.b()
                * lc.c()
                * normalized_gram_determinant(lc.alpha(), lc.beta(), lc.gamma()).sqrt()
        }
        LatticeConstants::Monoclinic(lc) => lc.a() * lc.b() * lc.c() * lc.beta().sin(),
        LatticeConstants::Orthorhombic(lc) => lc.a() * lc.b() * lc.c(),
        LatticeConstants::Tetragonal(lc) => lc.a() * lc.a() * lc.c(),
        LatticeConstants::Hexagonal(lc) => 3.0_f64.sqrt() / 2.0 * lc.a() * lc.a() * lc.c(),
        LatticeConstants::Rhombohedral(lc) => {
            lc.a().powi(3) * normalized_gram_determinant(lc.alpha(), lc.alpha(), lc.alpha()).sqrt()
        }
        LatticeConstants::Cubic(lc) => lc.a().powi(3),
    }
}

/// Total area of the six faces of the cell.
pub fn surface_area(lattice_constants: &LatticeConstants) -> f64 {
    let [v1, v2, v3] = basis(lattice_constants);
    2.0 * (v1.cross(&v2).norm() + v2.cross(&v3).norm() + v3.cross(&v1).norm())
}

/// Primitive basis vectors of the lattice generated by a centered cell.
///
/// Body: (a, b, (a+b+c)/2). Face: ((b+c)/2, (a+c)/2, (a+b)/2). Base: (a, (a+b)/2, c).
pub fn primitive_basis(
    lattice_constants: &LatticeConstants,
    centering: Centering,
) -> Result<[Vector3<f64>; 3]> {
    let system = lattice_constants.lattice_system();
    if !is_bravais_lattice(system, centering) {
        return Err(LatticeError::invalid_bravais_lattice(system, centering));
    }

    let [a, b, c] = basis(lattice_constants);
    Ok(match centering {
        Centering::Primitive => [a, b, c],
        Centering::Body => [a, b, (a + b + c) / 2.0],
        Centering::Face => [(b + c) / 2.0, (a + c) / 2.0, (a + b) / 2.0],
        Centering::Base => [a, (a + b) / 2.0, c],
    })
}

impl LatticeConstants {
    pub fn basis(&self) -> [Vector3<f64>; 3] {
        basis(self)
    }

    pub fn basis_matrix(&self) -> Matrix3<f64> {
        basis_matrix(self)
    }

    pub fn metric_tensor(&self) -> Matrix3<f64> {
        metric_tensor(self)
    }

    pub fn volume(&self) -> f64 {
        volume(self)
    }

    pub fn surface_area(&self) -> f64 {
        surface_area(self)
    }
}
