use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::error::{LatticeError, Result};
use crate::lattice::lattice_types::LatticeSystem;
use crate::lattice::tolerance::{ApproxEq, Tolerance};

// ======================== VALIDATION HELPERS ========================

fn check_length(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LatticeError::invalid_parameter(
            name,
            value,
            "must be finite and positive",
        ))
    }
}

/// Accept angles in the open interval (0, upper).
fn check_angle(
    name: &'static str,
    value: f64,
    upper: f64,
    constraint: &'static str,
) -> Result<f64> {
    if value.is_finite() && value > 0.0 && value < upper {
        Ok(value)
    } else {
        Err(LatticeError::invalid_parameter(name, value, constraint))
    }
}

/// Determinant of the Gram matrix of three unit vectors with the given inter-axial angles.
pub(crate) fn normalized_gram_determinant(alpha: f64, beta: f64, gamma: f64) -> f64 {
    let (ca, cb, cg) = (alpha.cos(), beta.cos(), gamma.cos());
    1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg
}

// ======================== PER-SYSTEM LATTICE CONSTANTS ========================

/// Lattice constants of a triclinic cell. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TriclinicParameters")]
pub struct TriclinicLatticeConstants {
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
}

impl TriclinicLatticeConstants {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        let a = check_length("a", a)?;
        let b = check_length("b", b)?;
        let c = check_length("c", c)?;
        let alpha = check_angle("alpha", alpha, PI, "must lie in (0, pi)")?;
        let beta = check_angle("beta", beta, PI, "must lie in (0, pi)")?;
        let gamma = check_angle("gamma", gamma, PI, "must lie in (0, pi)")?;

        // The three angles must close into a parallelepiped of non-zero volume
        let det = normalized_gram_determinant(alpha, beta, gamma);
        if !(det > 0.0) {
            return Err(LatticeError::invalid_parameter(
                "alpha, beta, gamma",
                det,
                "angles must span a parallelepiped with positive volume",
            ));
        }

        Ok(Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        })
    }

    /// Read the lattice constants off three basis vectors.
    pub fn from_basis(basis: &[Vector3<f64>; 3]) -> Result<Self> {
        let [v1, v2, v3] = basis;
        let (a, b, c) = (v1.norm(), v2.norm(), v3.norm());
        let angle = |u: &Vector3<f64>, v: &Vector3<f64>, lu: f64, lv: f64| {
            (u.dot(v) / (lu * lv)).clamp(-1.0, 1.0).acos()
        };
        Self::new(
            a,
            b,
            c,
            angle(v2, v3, b, c),
            angle(v1, v3, a, c),
            angle(v1, v2, a, b),
        )
    }

    pub fn a(&self) -> f64 {
        self.a
    }
    pub fn b(&self) -> f64 {
        self.b
    }
    pub fn c(&self) -> f64 {
        self.c
    }
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
    pub fn beta(&self) -> f64 {
        self.beta
    }
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

/// Lattice constants of a monoclinic cell with `b` as the unique axis. `beta` is in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MonoclinicParameters")]
pub struct MonoclinicLatticeConstants {
    a: f64,
    b: f64,
    c: f64,
    beta: f64,
}

impl MonoclinicLatticeConstants {
    pub fn new(a: f64, b: f64, c: f64, beta: f64) -> Result<Self> {
        Ok(Self {
            a: check_length("a", a)?,
            b: check_length("b", b)?,
            c: check_length("c", c)?,
            beta: check_angle(
                "beta",
                beta,
                PI,
                "must lie in (0, pi); 0 and pi give a flat cell",
            )?,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }
    pub fn b(&self) -> f64 {
        self.b
    }
    pub fn c(&self) -> f64 {
        self.c
    }
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

/// Lattice constants of an orthorhombic cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrthorhombicParameters")]
pub struct OrthorhombicLatticeConstants {
    a: f64,
    b: f64,
    c: f64,
}

impl OrthorhombicLatticeConstants {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        Ok(Self {
            a: check_length("a", a)?,
            b: check_length("b", b)?,
            c: check_length("c", c)?,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }
    pub fn b(&self) -> f64 {
        self.b
    }
    pub fn c(&self) -> f64 {
        self.c
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TetragonalParameters")]
pub struct TetragonalLatticeConstants {
    a: f64,
    c: f64,
}

impl TetragonalLatticeConstants {
    pub fn new(a: f64, c: f64) -> Result<Self> {
        Ok(Self {
            a: check_length("a", a)?,
            c: check_length("c", c)?,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }
    pub fn c(&self) -> f64 {
        self.c
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HexagonalParameters")]
pub struct HexagonalLatticeConstants {
    a: f64,
    c: f64,
}

impl HexagonalLatticeConstants {
    pub fn new(a: f64, c: f64) -> Result<Self> {
        Ok(Self {
            a: check_length("a", a)?,
            c: check_length("c", c)?,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }
    pub fn c(&self) -> f64 {
        self.c
    }
}

/// Lattice constants of a rhombohedral cell in the rhombohedral (primitive) setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RhombohedralParameters")]
pub struct RhombohedralLatticeConstants {
    a: f64,
    alpha: f64,
}

impl RhombohedralLatticeConstants {
    pub fn new(a: f64, alpha: f64) -> Result<Self> {
        Ok(Self {
            a: check_length("a", a)?,
            alpha: check_angle("alpha", alpha, 2.0 * PI / 3.0, "must lie in (0, 2*pi/3)")?,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CubicParameters")]
pub struct CubicLatticeConstants {
    a: f64,
}

impl CubicLatticeConstants {
    pub fn new(a: f64) -> Result<Self> {
        Ok(Self {
            a: check_length("a", a)?,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }
}

// ======================== DESERIALIZATION THROUGH CONSTRUCTORS ========================

#[derive(Deserialize)]
struct TriclinicParameters {
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
}

#[derive(Deserialize)]
struct MonoclinicParameters {
    a: f64,
    b: f64,
    c: f64,
    beta: f64,
}

#[derive(Deserialize)]
struct OrthorhombicParameters {
    a: f64,
    b: f64,
    c: f64,
}

#[derive(Deserialize)]
struct TetragonalParameters {
    a: f64,
    c: f64,
}

#[derive(Deserialize)]
struct HexagonalParameters {
    a: f64,
    c: f64,
}

#[derive(Deserialize)]
struct RhombohedralParameters {
    a: f64,
    alpha: f64,
}

#[derive(Deserialize)]
struct CubicParameters {
    a: f64,
}

impl TryFrom<TriclinicParameters> for TriclinicLatticeConstants {
    type Error = LatticeError;
    fn try_from(p: TriclinicParameters) -> Result<Self> {
        Self::new(p.a, p.b, p.c, p.alpha, p.beta, p.gamma)
    }
}

impl TryFrom<MonoclinicParameters> for MonoclinicLatticeConstants {
    type Error = LatticeError;
    fn try_from(p: MonoclinicParameters) -> Result<Self> {
        Self::new(p.a, p.b, p.c, p.beta)
    }
}

impl TryFrom<OrthorhombicParameters> for OrthorhombicLatticeConstants {
    type Error = LatticeError;
    fn try_from(p: OrthorhombicParameters) -> Result<Self> {
        Self::new(p.a, p.b, p.c)
    }
}

impl TryFrom<TetragonalParameters> for TetragonalLatticeConstants {
    type Error = LatticeError;
    fn try_from(p: TetragonalParameters) -> Result<Self> {
        Self::new(p.a, p.c)
    }
}

impl TryFrom<HexagonalParameters> for HexagonalLatticeConstants {
    type Error = LatticeError;
    fn try_from(p: HexagonalParameters) -> Result<Self> {
        Self::new(p.a, p.c)
    }
}

impl TryFrom<RhombohedralParameters> for RhombohedralLatticeConstants {
    type Error = LatticeError;
    fn try_from(p: RhombohedralParameters) -> Result<Self> {
        Self::new(p.a, p.alpha)
    }
}

impl TryFrom<CubicParameters> for CubicLatticeConstants {
    type Error = LatticeError;
    fn try_from(p: CubicParameters) -> Result<Self> {
        Self::new(p.a)
    }
}

// ======================== CLOSED SUM OVER LATTICE SYSTEMS ========================

/// Lattice constants of any of the seven lattice systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum LatticeConstants {
    Triclinic(TriclinicLatticeConstants),
    Monoclinic(MonoclinicLatticeConstants),
    Orthorhombic(OrthorhombicLatticeConstants),
    Tetragonal(TetragonalLatticeConstants),
    Rhombohedral(RhombohedralLatticeConstants),
    Hexagonal(HexagonalLatticeConstants),
    Cubic(CubicLatticeConstants),
}

impl LatticeConstants {
    pub fn lattice_system(&self) -> LatticeSystem {
        match self {
            LatticeConstants::Triclinic(_) => LatticeSystem::Triclinic,
            LatticeConstants::Monoclinic(_) => LatticeSystem::Monoclinic,
            LatticeConstants::Orthorhombic(_) => LatticeSystem::Orthorhombic,
            LatticeConstants::Tetragonal(_) => LatticeSystem::Tetragonal,
            LatticeConstants::Rhombohedral(_) => LatticeSystem::Rhombohedral,
            LatticeConstants::Hexagonal(_) => LatticeSystem::Hexagonal,
            LatticeConstants::Cubic(_) => LatticeSystem::Cubic,
        }
    }

    /// Independent parameters in declaration order (lengths first, angles in radians).
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            LatticeConstants::Triclinic(lc) => {
                vec![lc.a, lc.b, lc.c, lc.alpha, lc.beta, lc.gamma]
            }
            LatticeConstants::Monoclinic(lc) => vec![lc.a, lc.b, lc.c, lc.beta],
            LatticeConstants::Orthorhombic(lc) => vec![lc.a, lc.b, lc.c],
            LatticeConstants::Tetragonal(lc) => vec![lc.a, lc.c],
            LatticeConstants::Rhombohedral(lc) => vec![lc.a, lc.alpha],
            LatticeConstants::Hexagonal(lc) => vec![lc.a, lc.c],
            LatticeConstants::Cubic(lc) => vec![lc.a],
        }
    }

    pub fn parameter_names(&self) -> &'static [&'static str] {
        parameter_names(self.lattice_system())
    }

    /// Build lattice constants of `system` from its parameters in [`parameters`](Self::parameters) order.
    pub fn from_parameters(system: LatticeSystem, params: &[f64]) -> Result<Self> {
        let expected = parameter_names(system).len();
        if params.len() != expected {
            return Err(LatticeError::invalid_parameter(
                "parameters",
                params.len() as f64,
                "wrong number of parameters for the lattice system",
            ));
        }
        let p = params;
        Ok(match system {
            LatticeSystem::Triclinic => {
                TriclinicLatticeConstants::new(p[0], p[1], p[2], p[3], p[4], p[5])?.into()
            }
            LatticeSystem::Monoclinic => {
                MonoclinicLatticeConstants::new(p[0], p[1], p[2], p[3])?.into()
            }
            LatticeSystem::Orthorhombic => {
                OrthorhombicLatticeConstants::new(p[0], p[1], p[2])?.into()
            }
            LatticeSystem::Tetragonal => TetragonalLatticeConstants::new(p[0], p[1])?.into(),
            LatticeSystem::Rhombohedral => RhombohedralLatticeConstants::new(p[0], p[1])?.into(),
            LatticeSystem::Hexagonal => HexagonalLatticeConstants::new(p[0], p[1])?.into(),
            LatticeSystem::Cubic => CubicLatticeConstants::new(p[0])?.into(),
        })
    }
}

/// Parameter names of a lattice system, matching [`LatticeConstants::parameters`].
pub fn parameter_names(system: LatticeSystem) -> &'static [&'static str] {
    match system {
        LatticeSystem::Triclinic => &["a", "b", "c", "alpha", "beta", "gamma"],
        LatticeSystem::Monoclinic => &["a", "b", "c", "beta"],
        LatticeSystem::Orthorhombic => &["a", "b", "c"],
        LatticeSystem::Tetragonal | LatticeSystem::Hexagonal => &["a", "c"],
        LatticeSystem::Rhombohedral => &["a", "alpha"],
        LatticeSystem::Cubic => &["a"],
    }
}

/// Lattice system of a lattice-constants record.
pub fn lattice_system(lattice_constants: &LatticeConstants) -> LatticeSystem {
    lattice_constants.lattice_system()
}

impl From<TriclinicLatticeConstants> for LatticeConstants {
    fn from(lc: TriclinicLatticeConstants) -> Self {
        LatticeConstants::Triclinic(lc)
    }
}

impl From<MonoclinicLatticeConstants> for LatticeConstants {
    fn from(lc: MonoclinicLatticeConstants) -> Self {
        LatticeConstants::Monoclinic(lc)
    }
}

impl From<OrthorhombicLatticeConstants> for LatticeConstants {
    fn from(lc: OrthorhombicLatticeConstants) -> Self {
        LatticeConstants::Orthorhombic(lc)
    }
}

impl From<TetragonalLatticeConstants> for LatticeConstants {
    fn from(lc: TetragonalLatticeConstants) -> Self {
        LatticeConstants::Tetragonal(lc)
    }
}

impl From<RhombohedralLatticeConstants> for LatticeConstants {
    fn from(lc: RhombohedralLatticeConstants) -> Self {
        LatticeConstants::Rhombohedral(lc)
    }
}

impl From<HexagonalLatticeConstants> for LatticeConstants {
    fn from(lc: HexagonalLatticeConstants) -> Self {
        LatticeConstants::Hexagonal(lc)
    }
}

impl From<CubicLatticeConstants> for LatticeConstants {
    fn from(lc: CubicLatticeConstants) -> Self {
        LatticeConstants::Cubic(lc)
    }
}

// ======================== APPROXIMATE EQUALITY ========================

impl ApproxEq for TriclinicLatticeConstants {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        [self.a, self.b, self.c, self.alpha, self.beta, self.gamma].approx_eq(
            &[other.a, other.b, other.c, other.alpha, other.beta, other.gamma],
            tol,
        )
    }
}

impl ApproxEq for MonoclinicLatticeConstants {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        [self.a, self.b, self.c, self.beta].approx_eq(&[other.a, other.b, other.c, other.beta], tol)
    }
}

impl ApproxEq for OrthorhombicLatticeConstants {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        [self.a, self.b, self.c].approx_eq(&[other.a, other.b, other.c], tol)
    }
}

impl ApproxEq for TetragonalLatticeConstants {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        [self.a, self.c].approx_eq(&[other.a, other.c], tol)
    }
}

impl ApproxEq for HexagonalLatticeConstants {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        [self.a, self.c].approx_eq(&[other.a, other.c], tol)
    }
}

impl ApproxEq for RhombohedralLatticeConstants {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        [self.a, self.alpha].approx_eq(&[other.a, other.alpha], tol)
    }
}

impl ApproxEq for CubicLatticeConstants {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        tol.approx_eq(self.a, other.a)
    }
}

impl ApproxEq for LatticeConstants {
    fn approx_eq(&self, other: &Self, tol: &Tolerance) -> bool {
        use LatticeConstants::*;
        match (self, other) {
            (Triclinic(x), Triclinic(y)) => x.approx_eq(y, tol),
            (Monoclinic(x), Monoclinic(y)) => x.approx_eq(y, tol),
            (Orthorhombic(x), Orthorhombic(y)) => x.approx_eq(y, tol),
            (Tetragonal(x), Tetragonal(y)) => x.approx_eq(y, tol),
            (Rhombohedral(x), Rhombohedral(y)) => x.approx_eq(y, tol),
            (Hexagonal(x), Hexagonal(y)) => x.approx_eq(y, tol),
            (Cubic(x), Cubic(y)) => x.approx_eq(y, tol),
            _ => false,
        }
    }
}

// ======================== DISPLAY ========================

impl fmt::Display for LatticeConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.lattice_system())?;
        let names = self.parameter_names();
        for (i, (name, value)) in names.iter().zip(self.parameters()).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if matches!(*name, "alpha" | "beta" | "gamma") {
                write!(f, "{}={:.4}°", name, value.to_degrees())?;
            } else {
                write!(f, "{}={:.6}", name, value)?;
            }
        }
        f.write_str(")")
    }
}
