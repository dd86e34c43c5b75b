use super::*;
use crate::error::NumError;
use nalgebra::{dmatrix, dvector, DMatrix, DVector};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn cofactor_det(a: &DMatrix<f64>) -> f64 {
    match a.nrows() {
        2 => a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)],
        3 => {
            a[(0, 0)] * (a[(1, 1)] * a[(2, 2)] - a[(1, 2)] * a[(2, 1)])
                - a[(0, 1)] * (a[(1, 0)] * a[(2, 2)] - a[(1, 2)] * a[(2, 0)])
                + a[(0, 2)] * (a[(1, 0)] * a[(2, 1)] - a[(1, 1)] * a[(2, 0)])
        }
        _ => unreachable!("cofactor helper covers 2x2 and 3x3"),
    }
}

/// Diagonally dominant random matrix (well conditioned).
fn random_dominant(rng: &mut StdRng, n: usize) -> DMatrix<f64> {
    let mut a = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0));
    for i in 0..n {
        a[(i, i)] += n as f64 + 1.0;
    }
    a
}

#[test]
fn solve_small_exact() {
    let a = dmatrix![2.0, 1.0; 1.0, 3.0];
    let b = dvector![3.0, 4.0];
    let x = solve(&a, &b).unwrap();
    assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 1.0).abs() < 1e-12);
    assert!((&a * &x - &b).norm() < 1e-10);
}

#[test]
fn solve_needs_pivoting() {
    // Zero in the (0,0) slot forces a row swap.
    let a = dmatrix![0.0, 2.0, 1.0; 1.0, 1.0, 0.0; 3.0, 0.0, 1.0];
    let b = dvector![5.0, 3.0, 5.0];
    let x = solve(&a, &b).unwrap();
    assert!((&a * &x - &b).norm() < 1e-12);
}

#[test]
fn solve_singular_is_error() {
    let a = dmatrix![1.0, 2.0; 2.0, 4.0];
    let b = dvector![1.0, 2.0];
    assert!(matches!(
        solve(&a, &b),
        Err(NumError::SingularMatrix { col: 1, .. })
    ));
    assert!(matches!(inverse(&a), Err(NumError::SingularMatrix { .. })));
    assert!(matches!(determinant(&a), Err(NumError::SingularMatrix { .. })));
}

#[test]
fn shape_errors() {
    let a = dmatrix![1.0, 2.0, 3.0; 4.0, 5.0, 6.0];
    assert!(matches!(
        solve(&a, &dvector![1.0, 2.0]),
        Err(NumError::NotSquare { rows: 2, cols: 3 })
    ));
    let sq = dmatrix![1.0, 0.0; 0.0, 1.0];
    assert!(matches!(
        solve(&sq, &dvector![1.0, 2.0, 3.0]),
        Err(NumError::DimensionMismatch { op: "solve", .. })
    ));
    assert!(multiply(&a, &a).is_err());
}

#[test]
fn lu_reconstructs_permuted_matrix() {
    let a = dmatrix![1.0, 2.0, 3.0; 4.0, 5.0, 6.0; 7.0, 8.0, 10.0];
    let f = lu(&a).unwrap();
    let pa = DMatrix::from_fn(3, 3, |i, j| a[(f.perm[i], j)]);
    assert!((&f.l * &f.u - pa).norm() < 1e-12);
    for i in 0..3 {
        assert_eq!(f.l[(i, i)], 1.0);
        for j in i + 1..3 {
            assert_eq!(f.l[(i, j)], 0.0);
            assert!(f.u[(j, i)].abs() < 1e-12);
        }
    }
}

#[test]
fn determinant_matches_cofactor() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in [2usize, 3] {
        for _ in 0..50 {
            let a = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-5.0..5.0));
            let expected = cofactor_det(&a);
            match determinant(&a) {
                Ok(d) => assert!((d - expected).abs() < 1e-9, "{d} vs {expected}"),
                Err(_) => assert!(expected.abs() < 1e-9),
            }
        }
    }
    // Odd permutation flips the sign.
    let swap = dmatrix![0.0, 1.0; 1.0, 0.0];
    assert!((determinant(&swap).unwrap() + 1.0).abs() < 1e-15);
}

#[test]
fn inverse_times_matrix_is_identity() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = random_dominant(&mut rng, 5);
    let inv = inverse(&a).unwrap();
    let id = multiply(&a, &inv).unwrap();
    assert!((id - DMatrix::<f64>::identity(5, 5)).norm() < 1e-10);
}

#[test]
fn multiply_and_transpose_match_nalgebra() {
    let a = dmatrix![1.0, 2.0, 3.0; 4.0, 5.0, 6.0];
    let b = dmatrix![1.0, 0.5; -1.0, 2.0; 0.0, 3.0];
    assert_eq!(multiply(&a, &b).unwrap(), &a * &b);
    assert_eq!(transpose(&a), a.transpose());
}

#[test]
fn qr_is_orthonormal_and_upper() {
    let a = dmatrix![12.0, -51.0, 4.0; 6.0, 167.0, -68.0; -4.0, 24.0, -41.0];
    let Qr { q, r } = qr(&a);
    assert!((&q * &r - &a).norm() < 1e-9);
    assert!((q.transpose() * &q - DMatrix::<f64>::identity(3, 3)).norm() < 1e-9);
    for i in 0..3 {
        for j in 0..i {
            assert_eq!(r[(i, j)], 0.0);
        }
    }
}

#[test]
fn eigenvalues_symmetric() {
    let a = dmatrix![2.0, 1.0; 1.0, 2.0];
    let mut ev: Vec<f64> = eigenvalues_default(&a).unwrap().iter().copied().collect();
    ev.sort_by(|x, y| x.total_cmp(y));
    assert!((ev[0] - 1.0).abs() < 1e-6);
    assert!((ev[1] - 3.0).abs() < 1e-6);

    let b = dmatrix![4.0, 1.0, 0.0; 1.0, 3.0, 1.0; 0.0, 1.0, 2.0];
    let mut got: Vec<f64> = eigenvalues(&b, 500).unwrap().iter().copied().collect();
    got.sort_by(|x, y| x.total_cmp(y));
    let mut want: Vec<f64> = b.clone().symmetric_eigenvalues().iter().copied().collect();
    want.sort_by(|x, y| x.total_cmp(y));
    for (g, w) in got.iter().zip(&want) {
        assert!((g - w).abs() < 1e-5, "{g} vs {w}");
    }
    assert!(eigenvalues_default(&dmatrix![1.0, 2.0]).is_err());
}

proptest! {
    #[test]
    fn solve_residual_small(seed in any::<u64>(), n in 1usize..8) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = random_dominant(&mut rng, n);
        let b = DVector::from_fn(n, |_, _| rng.gen_range(-10.0..10.0));
        let x = solve(&a, &b).unwrap();
        prop_assert!((&a * &x - &b).norm() < 1e-8);
        let via_lu = lu(&a).unwrap().solve(&b).unwrap();
        prop_assert!((via_lu - x).norm() < 1e-9);
    }
}
