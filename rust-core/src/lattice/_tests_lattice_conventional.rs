#[cfg(test)]
mod _tests_lattice_conventional {
    use super::super::lattice_constants::*;
    use super::super::lattice_conventional::*;
    use super::super::lattice_types::{Centering, LatticeSystem};
    use super::super::tolerance::{ApproxEq, Tolerance};
    use super::super::unit_cell::UnitCell;
    use crate::error::LatticeError;
    use nalgebra::Vector3;
    use std::f64::consts::{PI, SQRT_2};

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn loose() -> Tolerance {
        Tolerance::new(0.0, 1e-9).unwrap()
    }

    fn resolve(cell: UnitCell) -> UnitCell {
        conventional_cell(&cell, &tol()).unwrap()
    }

    fn assert_cell(cell: &UnitCell, system: LatticeSystem, centering: Centering, params: &[f64]) {
        assert_eq!(cell.lattice_system(), system, "unexpected system for {}", cell);
        assert_eq!(cell.centering(), centering, "unexpected centering for {}", cell);
        let actual = cell.lattice_constants().parameters();
        assert_eq!(actual.len(), params.len());
        for (x, y) in actual.iter().zip(params) {
            assert!((x - y).abs() < 1e-9 * y.abs().max(1.0), "{} != {} in {}", x, y, cell);
        }
    }

    // Body-centered monoclinic description of a rhombohedral lattice, built from vectors
    fn rhombohedral_as_body_monoclinic(a: f64, alpha: f64) -> UnitCell {
        let rhombohedral = RhombohedralLatticeConstants::new(a, alpha).unwrap();
        let [r1, r2, r3] = LatticeConstants::from(rhombohedral).basis();
        let unique: Vector3<f64> = r1 - r2;
        let (x, z) = if alpha <= PI / 2.0 {
            (r3, r1 + r2 - r3)
        } else {
            (r3, r1 + r2 + r3)
        };
        let (x, z) = if x.norm() <= z.norm() { (x, z) } else { (z, x) };
        let monoclinic = MonoclinicLatticeConstants::new(
            x.norm(),
            unique.norm(),
            z.norm(),
            x.angle(&z),
        ).unwrap();
        UnitCell::new(monoclinic, Centering::Body)
    }

    // ==================== Tetragonal ====================

    #[test]
    fn test_tetragonal_equal_edges_is_cubic() {
        let cell = UnitCell::primitive(TetragonalLatticeConstants::new(5.0, 5.0).unwrap());
        assert_cell(&resolve(cell), LatticeSystem::Cubic, Centering::Primitive, &[5.0]);
    }

    #[test]
    fn test_tetragonal_generic_unchanged() {
        let cell = UnitCell::primitive(TetragonalLatticeConstants::new(5.0, 10.0).unwrap());
        let resolved = resolve(cell);
        assert_eq!(resolved, cell);
    }

    #[test]
    fn test_body_centered_tetragonal_is_face_centered_cubic() {
        let cell = UnitCell::new(
            TetragonalLatticeConstants::new(5.0, 5.0 * SQRT_2).unwrap(),
            Centering::Body,
        );
        assert_cell(&resolve(cell), LatticeSystem::Cubic, Centering::Face, &[5.0 * SQRT_2]);
    }

    #[test]
    fn test_body_centered_tetragonal_equal_edges_is_body_centered_cubic() {
        let cell = UnitCell::new(
            TetragonalLatticeConstants::new(3.0, 3.0).unwrap(),
            Centering::Body,
        );
        assert_cell(&resolve(cell), LatticeSystem::Cubic, Centering::Body, &[3.0]);
    }

    #[test]
    fn test_invalid_tetragonal_centerings_rejected() {
        let lc = TetragonalLatticeConstants::new(5.0, 7.0).unwrap();
        for centering in [Centering::Face, Centering::Base] {
            let result = conventional_cell(&UnitCell::new(lc, centering), &tol());
            assert_eq!(
                result.unwrap_err(),
                LatticeError::InvalidBravaisLattice {
                    system: LatticeSystem::Tetragonal,
                    centering,
                }
            );
        }
    }

    // ==================== Orthorhombic ====================

    #[test]
    fn test_orthorhombic_to_tetragonal() {
        let cell = UnitCell::primitive(OrthorhombicLatticeConstants::new(4.0, 2.0, 2.0).unwrap());
        assert_cell(&resolve(cell), LatticeSystem::Tetragonal, Centering::Primitive, &[2.0, 4.0]);

        let cell = UnitCell::new(
            OrthorhombicLatticeConstants::new(3.0, 3.0, 5.0).unwrap(),
            Centering::Body,
        );
        assert_cell(&resolve(cell), LatticeSystem::Tetragonal, Centering::Body, &[3.0, 5.0]);
    }

    #[test]
    fn test_face_centered_orthorhombic_chain_to_cubic() {
        // Square-based F cell is a body-centered tetragonal cell rotated by pi/4
        let cell = UnitCell::new(
            OrthorhombicLatticeConstants::new(4.0, 4.0, 7.0).unwrap(),
            Centering::Face,
        );
        assert_cell(
            &resolve(cell),
            LatticeSystem::Tetragonal,
            Centering::Body,
            &[4.0 / SQRT_2, 7.0],
        );

        // All edges equal: face-centered cubic, through body-centered tetragonal
        let cell = UnitCell::new(
            OrthorhombicLatticeConstants::new(4.0, 4.0, 4.0).unwrap(),
            Centering::Face,
        );
        assert_cell(&resolve(cell), LatticeSystem::Cubic, Centering::Face, &[4.0]);
    }

    #[test]
    fn test_base_centered_orthorhombic() {
        let cell = UnitCell::new(
            OrthorhombicLatticeConstants::new(3.0, 3.0, 5.0).unwrap(),
            Centering::Base,
        );
        assert_cell(
            &resolve(cell),
            LatticeSystem::Tetragonal,
            Centering::Primitive,
            &[3.0 / SQRT_2, 5.0],
        );

        // Rectangle with b = sqrt(3) a centered: hexagonal net
        let a = 2.0;
        let b = 2.0 * a * (PI / 3.0).sin();
        let cell = UnitCell::new(
            OrthorhombicLatticeConstants::new(a, b, 7.0).unwrap(),
            Centering::Base,
        );
        assert_cell(&resolve(cell), LatticeSystem::Hexagonal, Centering::Primitive, &[2.0, 7.0]);
    }

    // ==================== Monoclinic ====================

    #[test]
    fn test_monoclinic_right_angle_is_orthorhombic() {
        let cell = UnitCell::primitive(
            MonoclinicLatticeConstants::new(3.0, 5.0, 4.0, PI / 2.0).unwrap(),
        );
        assert_cell(
            &resolve(cell),
            LatticeSystem::Orthorhombic,
            Centering::Primitive,
            &[3.0, 4.0, 5.0],
        );

        let cell = UnitCell::new(
            MonoclinicLatticeConstants::new(3.0, 5.0, 4.0, PI / 2.0).unwrap(),
            Centering::Body,
        );
        assert_cell(&resolve(cell), LatticeSystem::Orthorhombic, Centering::Body, &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_monoclinic_equal_edges_is_base_centered_orthorhombic() {
        let (a, beta) = (3.0_f64, 1.9_f64);
        let cell = UnitCell::primitive(MonoclinicLatticeConstants::new(a, 7.0, a, beta).unwrap());

        let short = (2.0 * a * a * (1.0 + beta.cos())).sqrt();
        let long = (2.0 * a * a * (1.0 - beta.cos())).sqrt();
        assert_cell(
            &resolve(cell),
            LatticeSystem::Orthorhombic,
            Centering::Base,
            &[short, long, 7.0],
        );
    }

    #[test]
    fn test_monoclinic_reduced_boundary_is_base_centered_orthorhombic() {
        // a = -2c cos(beta)
        let (c, beta) = (4.0_f64, 1.8_f64);
        let a = -2.0 * c * beta.cos();
        let cell = UnitCell::primitive(MonoclinicLatticeConstants::new(a, 9.0, c, beta).unwrap());

        let resolved = resolve(cell);
        assert_eq!(resolved.lattice_system(), LatticeSystem::Orthorhombic);
        assert_eq!(resolved.centering(), Centering::Base);
        assert!((resolved.volume() - 2.0 * cell.volume()).abs() < 1e-9 * cell.volume());
    }

    #[test]
    fn test_body_centered_monoclinic_equal_edges_is_face_centered() {
        let (a, beta) = (3.0_f64, 1.9_f64);
        let cell = UnitCell::new(
            MonoclinicLatticeConstants::new(a, 4.0, a, beta).unwrap(),
            Centering::Body,
        );

        let resolved = resolve(cell);
        assert_eq!(resolved.lattice_system(), LatticeSystem::Orthorhombic);
        assert_eq!(resolved.centering(), Centering::Face);
        assert!(
            (resolved.primitive_volume() - cell.primitive_volume()).abs() < 1e-9 * cell.volume()
        );
    }

    #[test]
    fn test_rhombohedral_regimes_from_body_centered_monoclinic() {
        for alpha_degrees in [50.0_f64, 75.0, 100.0, 115.0] {
            let alpha = alpha_degrees.to_radians();
            let cell = rhombohedral_as_body_monoclinic(2.0, alpha);
            let resolved = resolve(cell);

            assert_cell(
                &resolved,
                LatticeSystem::Rhombohedral,
                Centering::Primitive,
                &[2.0, alpha],
            );
            assert!(
                (resolved.primitive_volume() - cell.primitive_volume()).abs() < 1e-9 * cell.volume()
            );
        }
    }

    #[test]
    fn test_generic_body_centered_monoclinic_unchanged() {
        let cell = UnitCell::new(
            MonoclinicLatticeConstants::new(3.0, 4.5, 5.0, 1.9).unwrap(),
            Centering::Body,
        );
        let resolved = resolve(cell);
        assert_eq!(resolved.lattice_system(), LatticeSystem::Monoclinic);
        assert_eq!(resolved.centering(), Centering::Body);
    }

    // ==================== Rhombohedral ====================

    #[test]
    fn test_rhombohedral_cubic_limits() {
        let cell = UnitCell::primitive(RhombohedralLatticeConstants::new(2.0, PI / 2.0).unwrap());
        assert_cell(&resolve(cell), LatticeSystem::Cubic, Centering::Primitive, &[2.0]);

        let cell = UnitCell::primitive(RhombohedralLatticeConstants::new(2.0, PI / 3.0).unwrap());
        assert_cell(&resolve(cell), LatticeSystem::Cubic, Centering::Face, &[2.0 * SQRT_2]);

        let cell = UnitCell::primitive(
            RhombohedralLatticeConstants::new(3.0_f64.sqrt(), (-1.0_f64 / 3.0).acos()).unwrap(),
        );
        assert_cell(&resolve(cell), LatticeSystem::Cubic, Centering::Body, &[2.0]);
    }

    // ==================== Properties ====================

    #[test]
    fn test_terminal_systems() {
        let cells = [
            UnitCell::primitive(HexagonalLatticeConstants::new(2.0, 3.0).unwrap()),
            UnitCell::new(CubicLatticeConstants::new(2.0).unwrap(), Centering::Face),
            UnitCell::primitive(RhombohedralLatticeConstants::new(2.0, 1.0).unwrap()),
        ];
        for cell in cells {
            assert!(limiting_case(&cell, &tol()).is_none());
            assert_eq!(resolve(cell), cell);
        }
    }

    #[test]
    fn test_conventional_cell_idempotent_and_volume_preserving() {
        let cells = [
            UnitCell::new(
                TetragonalLatticeConstants::new(5.0, 5.0 * SQRT_2).unwrap(),
                Centering::Body,
            ),
            UnitCell::new(
                OrthorhombicLatticeConstants::new(4.0, 4.0, 4.0).unwrap(),
                Centering::Face,
            ),
            UnitCell::new(
                MonoclinicLatticeConstants::new(6.0, 10.0, 8.0, 1.1 * PI / 2.0).unwrap(),
                Centering::Base,
            ),
            UnitCell::primitive(MonoclinicLatticeConstants::new(3.0, 7.0, 3.0, 1.9).unwrap()),
            rhombohedral_as_body_monoclinic(2.0, 1.3),
            UnitCell::primitive(
                TriclinicLatticeConstants::new(2.0, 3.0, 4.0, 1.3, 1.4, 1.7).unwrap(),
            ),
        ];

        for cell in cells {
            let once = resolve(cell);
            let twice = resolve(once);
            assert!(once.approx_eq(&twice, &loose()), "{} -> {} -> {}", cell, once, twice);

            let expected = cell.primitive_volume();
            assert!(
                (once.primitive_volume() - expected).abs() < 1e-9 * expected,
                "volume per lattice point changed: {} -> {}",
                cell,
                once
            );
        }
    }

    #[test]
    fn test_unit_cell_method_uses_default_tolerance() {
        let cell = UnitCell::primitive(TetragonalLatticeConstants::new(5.0, 5.0).unwrap());
        assert_eq!(cell.conventional_cell().unwrap(), resolve(cell));
        assert_eq!(
            conventional_lattice_system(&cell, &tol()).unwrap(),
            LatticeSystem::Cubic
        );
    }
}
