use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven 3D lattice systems.
///
/// Variants are declared in order of increasing symmetry, so the derived ordering
/// can be used to check that a limiting-case transition never lowers the symmetry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LatticeSystem {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Rhombohedral,
    Hexagonal,
    Cubic,
}

/// Centerings that make sense in 3D setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Centering {
    Primitive,
    /// Extra lattice point at (1/2, 1/2, 1/2).
    Body,
    /// Extra lattice points at the centers of all three face pairs.
    Face,
    /// Extra lattice point at the center of the face spanned by `a` and `b` (C-centering).
    Base,
}

impl LatticeSystem {
    pub const ALL: [LatticeSystem; 7] = [
        LatticeSystem::Triclinic,
        LatticeSystem::Monoclinic,
        LatticeSystem::Orthorhombic,
        LatticeSystem::Tetragonal,
        LatticeSystem::Rhombohedral,
        LatticeSystem::Hexagonal,
        LatticeSystem::Cubic,
    ];

    /// Centerings that combine with this lattice system into a Bravais lattice.
    pub fn valid_centerings(self) -> &'static [Centering] {
        use Centering::*;
        match self {
            LatticeSystem::Triclinic => &[Primitive],
            LatticeSystem::Monoclinic => &[Primitive, Body, Base],
            LatticeSystem::Orthorhombic => &[Primitive, Body, Face, Base],
            LatticeSystem::Tetragonal => &[Primitive, Body],
            LatticeSystem::Rhombohedral => &[Primitive],
            LatticeSystem::Hexagonal => &[Primitive],
            LatticeSystem::Cubic => &[Primitive, Body, Face],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LatticeSystem::Triclinic => "triclinic",
            LatticeSystem::Monoclinic => "monoclinic",
            LatticeSystem::Orthorhombic => "orthorhombic",
            LatticeSystem::Tetragonal => "tetragonal",
            LatticeSystem::Rhombohedral => "rhombohedral",
            LatticeSystem::Hexagonal => "hexagonal",
            LatticeSystem::Cubic => "cubic",
        }
    }
}

impl Centering {
    pub const ALL: [Centering; 4] = [
        Centering::Primitive,
        Centering::Body,
        Centering::Face,
        Centering::Base,
    ];

    /// Number of lattice points in a cell with this centering.
    pub fn lattice_points_per_cell(self) -> usize {
        match self {
            Centering::Primitive => 1,
            Centering::Body | Centering::Base => 2,
            Centering::Face => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Centering::Primitive => "primitive",
            Centering::Body => "body",
            Centering::Face => "face",
            Centering::Base => "base",
        }
    }
}

/// Check whether a (lattice system, centering) pair is one of the 14 Bravais lattices.
pub fn is_bravais_lattice(system: LatticeSystem, centering: Centering) -> bool {
    system.valid_centerings().contains(&centering)
}

/// All 14 Bravais lattices as (lattice system, centering) pairs.
pub fn bravais_lattices() -> Vec<(LatticeSystem, Centering)> {
    LatticeSystem::ALL
        .iter()
        .flat_map(|&system| {
            system
                .valid_centerings()
                .iter()
                .map(move |&centering| (system, centering))
        })
        .collect()
}

impl fmt::Display for LatticeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Centering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatticeSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triclinic" | "anorthic" => Ok(LatticeSystem::Triclinic),
            "monoclinic" => Ok(LatticeSystem::Monoclinic),
            "orthorhombic" => Ok(LatticeSystem::Orthorhombic),
            "tetragonal" => Ok(LatticeSystem::Tetragonal),
            "rhombohedral" | "trigonal" => Ok(LatticeSystem::Rhombohedral),
            "hexagonal" => Ok(LatticeSystem::Hexagonal),
            "cubic" => Ok(LatticeSystem::Cubic),
            other => Err(format!("unknown lattice system '{other}'")),
        }
    }
}

impl FromStr for Centering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primitive" | "p" => Ok(Centering::Primitive),
            "body" | "body-centered" | "i" => Ok(Centering::Body),
            "face" | "face-centered" | "f" => Ok(Centering::Face),
            "base" | "base-centered" | "c" => Ok(Centering::Base),
            other => Err(format!("unknown centering '{other}'")),
        }
    }
}
