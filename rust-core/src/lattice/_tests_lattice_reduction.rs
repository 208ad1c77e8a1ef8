#[cfg(test)]
mod _tests_lattice_reduction {
    use super::super::lattice_constants::*;
    use super::super::lattice_reduction::*;
    use super::super::lattice_types::{Centering, LatticeSystem};
    use super::super::unit_cell::UnitCell;
    use crate::error::LatticeError;
    use nalgebra::{Matrix3, Vector3};
    use std::f64::consts::PI;

    const TOL: f64 = 1e-9;

    fn determinant(basis: &[Vector3<f64>; 3]) -> f64 {
        Matrix3::from_columns(basis).determinant()
    }

    #[test]
    fn test_delaunay_superbase_is_obtuse() {
        // Skewed description of a simple cubic lattice
        let (a, b, c) = (
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        let skewed = [a, b + 3.0 * a, c + 2.0 * a - b];
        let reduced = delaunay_reduce(&skewed).unwrap();

        let [v1, v2, v3] = reduced;
        let superbase = [v1, v2, v3, -(v1 + v2 + v3)];
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert!(superbase[i].dot(&superbase[j]) <= TOL);
            }
        }
        assert!((determinant(&reduced).abs() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_reduce_basis_recovers_cubic_cell() {
        let (a, b, c) = (
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(0.0, 0.0, 2.0),
        );
        let reduced = reduce_basis(&[a + b, b, c - a + 2.0 * b]).unwrap();

        for length in [reduced.a(), reduced.b(), reduced.c()] {
            assert!((length - 2.0).abs() < TOL);
        }
        for angle in [reduced.alpha(), reduced.beta(), reduced.gamma()] {
            assert!((angle - PI / 2.0).abs() < TOL);
        }
    }

    #[test]
    fn test_reduced_cell_is_ordered() {
        let lc = TriclinicLatticeConstants::new(5.0, 2.0, 3.0, 1.2, 1.3, 1.4).unwrap();
        let reduced = reduced_cell(&UnitCell::primitive(lc)).unwrap();
        assert_eq!(reduced.lattice_system(), LatticeSystem::Triclinic);
        assert_eq!(reduced.centering(), Centering::Primitive);

        let LatticeConstants::Triclinic(r) = *reduced.lattice_constants() else {
            panic!("reduced cell must be triclinic");
        };
        assert!(r.a() <= r.b() + TOL && r.b() <= r.c() + TOL);

        // All angles acute or all non-acute
        let acute = [r.alpha(), r.beta(), r.gamma()].map(|angle| angle < PI / 2.0);
        assert!(acute.iter().all(|&x| x) || acute.iter().all(|&x| !x));

        let original = UnitCell::primitive(lc).volume();
        assert!((reduced.volume() - original).abs() < TOL * original);
    }

    #[test]
    fn test_reduced_cell_of_face_centered_cubic() {
        let fcc = UnitCell::new(CubicLatticeConstants::new(2.0).unwrap(), Centering::Face);
        let reduced = reduced_cell(&fcc).unwrap();

        // Nearest neighbours of FCC lie at a / sqrt(2)
        let LatticeConstants::Triclinic(r) = *reduced.lattice_constants() else {
            panic!("reduced cell must be triclinic");
        };
        for length in [r.a(), r.b(), r.c()] {
            assert!((length - 2.0_f64.sqrt()).abs() < TOL);
        }
        assert!((reduced.volume() - fcc.primitive_volume()).abs() < TOL);
    }

    #[test]
    fn test_reduced_cell_of_body_centered_cell_halves_volume() {
        let bct = UnitCell::new(
            TetragonalLatticeConstants::new(3.0, 7.0).unwrap(),
            Centering::Body,
        );
        let reduced = reduced_cell(&bct).unwrap();
        assert!((reduced.volume() - bct.volume() / 2.0).abs() < TOL * bct.volume());
    }

    #[test]
    fn test_size_reduce_long_skewed_basis() {
        let gamma: f64 = 0.3;
        let (a, b, c) = (
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(200.0 * gamma.cos(), 200.0 * gamma.sin(), 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        let reduced = size_reduce(&[a, b, c]).unwrap();

        assert!((determinant(&reduced).abs() - determinant(&[a, b, c]).abs()).abs() < 1e-9);
        for i in 0..3 {
            for j in 0..3 {
                if reduced[j].norm() < reduced[i].norm() {
                    let ratio = reduced[i].dot(&reduced[j]) / reduced[j].norm_squared();
                    assert!(ratio.abs() <= 0.5 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_standardize_long_skewed_triclinic_cell() {
        // b = 200 at 0.3 rad from a: the shortest in-plane partner of a is b - 191 a
        let gamma: f64 = 0.3;
        let lc =
            TriclinicLatticeConstants::new(1.0, 200.0, 1.0, PI / 2.0, PI / 2.0, gamma).unwrap();
        let reduced = standardize_triclinic(&lc).unwrap();

        assert!((reduced.a() - 1.0).abs() < TOL);
        assert!((reduced.b() - 1.0).abs() < TOL);
        assert!((reduced.c() - 200.0 * gamma.sin()).abs() < 1e-3);

        let volume = LatticeConstants::from(lc).volume();
        assert!((LatticeConstants::from(reduced).volume() - volume).abs() < 1e-9 * volume);
    }

    #[test]
    fn test_reduction_rejects_singular_basis() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let degenerate = [v, 2.0 * v, Vector3::new(0.0, 0.0, 1.0)];
        assert!(matches!(delaunay_reduce(&degenerate), Err(LatticeError::SingularBasis { .. })));
        assert!(matches!(size_reduce(&degenerate), Err(LatticeError::SingularBasis { .. })));
    }

    #[test]
    fn test_standardize_triclinic_is_stable() {
        let lc = TriclinicLatticeConstants::new(2.0, 3.0, 4.0, 1.3, 1.4, 1.7).unwrap();
        let once = standardize_triclinic(&lc).unwrap();
        let twice = standardize_triclinic(&once).unwrap();
        for (x, y) in LatticeConstants::from(once)
            .parameters()
            .iter()
            .zip(LatticeConstants::from(twice).parameters())
        {
            assert!((x - y).abs() < TOL);
        }
    }
}
