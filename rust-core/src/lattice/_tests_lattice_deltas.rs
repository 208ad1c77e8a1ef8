#[cfg(test)]
mod _tests_lattice_deltas {
    use super::super::lattice_constants::*;
    use super::super::lattice_deltas::LatticeConstantDeltas;
    use super::super::lattice_types::LatticeSystem;
    use crate::error::LatticeError;

    #[test]
    fn test_delta_per_parameter() {
        let x: LatticeConstants =
            MonoclinicLatticeConstants::new(2.0, 3.0, 4.0, 1.9).unwrap().into();
        let y: LatticeConstants =
            MonoclinicLatticeConstants::new(2.5, 3.0, 3.0, 1.7).unwrap().into();

        let delta = x.delta(&y).unwrap();
        assert_eq!(delta.lattice_system(), LatticeSystem::Monoclinic);

        let expected = [-0.5, 0.0, 1.0, 0.2];
        for (d, e) in delta.parameters().iter().zip(expected) {
            assert!((d - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_delta_norm() {
        let x: LatticeConstants = OrthorhombicLatticeConstants::new(4.0, 5.0, 6.0).unwrap().into();
        let y: LatticeConstants = OrthorhombicLatticeConstants::new(1.0, 1.0, 6.0).unwrap().into();
        assert!((x.delta(&y).unwrap().norm() - 5.0).abs() < 1e-12);

        // Deltas are antisymmetric
        assert_eq!(
            y.delta(&x).unwrap(),
            LatticeConstantDeltas::Orthorhombic { a: -3.0, b: -4.0, c: 0.0 }
        );
    }

    #[test]
    fn test_delta_of_identical_constants_is_zero() {
        let x: LatticeConstants = RhombohedralLatticeConstants::new(2.0, 1.1).unwrap().into();
        assert_eq!(x.delta(&x).unwrap().norm(), 0.0);
    }

    #[test]
    fn test_delta_requires_same_system() {
        let cubic: LatticeConstants = CubicLatticeConstants::new(2.0).unwrap().into();
        let hexagonal: LatticeConstants = HexagonalLatticeConstants::new(2.0, 3.0).unwrap().into();

        assert_eq!(
            cubic.delta(&hexagonal).unwrap_err(),
            LatticeError::LatticeSystemMismatch {
                expected: LatticeSystem::Cubic,
                found: LatticeSystem::Hexagonal,
            }
        );
    }

    #[test]
    fn test_delta_display() {
        let delta = LatticeConstantDeltas::Tetragonal { a: 0.5, c: -1.0 };
        assert_eq!(delta.to_string(), "tetragonal deltas (+0.500000, -1.000000)");
    }
}
