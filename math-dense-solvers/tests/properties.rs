//! Property tests for the direct and iterative solvers
//!
//! Random systems are diagonally dominant so they are well conditioned;
//! every check runs over a range of sizes with a fixed seed.

use approx::assert_relative_eq;
use math_audio_dense_solvers::{
    Matrix, PivotStrategy, SolverError, SorConfig, condition_number, determinant,
    generated_system, inverse, solve, sor,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STRATEGIES: [PivotStrategy; 2] = [PivotStrategy::Partial, PivotStrategy::FirstNonZero];

/// Random `n x n` matrix with entries in [-1, 1] and `n` added on the diagonal
fn random_system(rng: &mut StdRng, n: usize) -> (Matrix, Matrix) {
    let a = Matrix::from_fn(n, n, |i, j| {
        let v: f64 = rng.random_range(-1.0..1.0);
        if i == j { v + n as f64 } else { v }
    })
    .unwrap();
    let f = Matrix::from_fn(n, 1, |_, _| rng.random_range(-10.0..10.0)).unwrap();
    (a, f)
}

#[test]
fn test_inverse_times_matrix_is_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..=8 {
        let (a, _) = random_system(&mut rng, n);
        let id = Matrix::identity(n).unwrap();

        let inv = inverse(&a).unwrap();
        assert!(a.multiply(&inv).unwrap().approx_eq(&id, 1e-9));

        // solving against the identity gives the inverse as well
        for strategy in STRATEGIES {
            let x = solve(&a, &id, strategy).unwrap();
            assert!(x.approx_eq(&inv, 1e-9), "n = {}, {:?}", n, strategy);
        }
    }
}

#[test]
fn test_solution_satisfies_system() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 1..=10 {
        let (a, f) = random_system(&mut rng, n);

        let x_partial = solve(&a, &f, PivotStrategy::Partial).unwrap();
        let x_first = solve(&a, &f, PivotStrategy::FirstNonZero).unwrap();

        assert!(a.multiply(&x_partial).unwrap().approx_eq(&f, 1e-9));
        assert!(a.multiply(&x_first).unwrap().approx_eq(&f, 1e-9));
        assert!(x_partial.approx_eq(&x_first, 1e-9));
    }
}

#[test]
fn test_solve_with_weak_diagonal() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 2..=6 {
        // rotate the rows of a dominant matrix so the large entries leave the diagonal
        let (dominant, f) = random_system(&mut rng, n);
        let a = Matrix::from_fn(n, n, |i, j| dominant.get((i + 1) % n, j)).unwrap();

        for strategy in STRATEGIES {
            let x = solve(&a, &f, strategy).unwrap();
            assert!(a.multiply(&x).unwrap().approx_eq(&f, 1e-9));
        }
    }
}

#[test]
fn test_determinant_properties() {
    let mut rng = StdRng::seed_from_u64(19);
    for n in 1..=8 {
        let (a, _) = random_system(&mut rng, n);
        let at = a.transpose().unwrap();

        let det = determinant(&a, PivotStrategy::Partial).unwrap();
        assert_relative_eq!(
            det,
            determinant(&a, PivotStrategy::FirstNonZero).unwrap(),
            max_relative = 1e-10
        );
        for strategy in STRATEGIES {
            assert_relative_eq!(det, determinant(&at, strategy).unwrap(), max_relative = 1e-10);
        }
    }
}

#[test]
fn test_determinant_of_product() {
    let mut rng = StdRng::seed_from_u64(23);
    let (a, _) = random_system(&mut rng, 4);
    let (b, _) = random_system(&mut rng, 4);
    let ab = a.multiply(&b).unwrap();

    let det = |m: &Matrix| determinant(m, PivotStrategy::Partial).unwrap();
    assert_relative_eq!(det(&ab), det(&a) * det(&b), max_relative = 1e-10);
}

#[test]
fn test_determinant_2x2_exact() {
    let a: Matrix = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    for strategy in STRATEGIES {
        assert_eq!(determinant(&a, strategy).unwrap(), -2.0);
    }
}

#[test]
fn test_condition_number_of_identity() {
    for n in [1, 2, 5, 16] {
        let id: Matrix = Matrix::identity(n).unwrap();
        assert_eq!(condition_number(&id).unwrap(), 1.0);
    }
}

#[test]
fn test_condition_number_is_at_least_one() {
    let mut rng = StdRng::seed_from_u64(29);
    for n in 1..=6 {
        let (a, _) = random_system(&mut rng, n);
        assert!(condition_number(&a).unwrap() >= 1.0 - 1e-12);
    }
}

#[test]
fn test_sor_reference_system() {
    let a: Matrix = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]]).unwrap();
    let f: Matrix = Matrix::column(&[1.0, 2.0]).unwrap();
    let config = SorConfig {
        omega: 1.0,
        precision: 1e-8,
        max_sweeps: Some(10_000),
        print_interval: 0,
    };

    let solution = sor(&a, &f, &config).unwrap();
    assert!(solution.converged);
    assert!(solution.sweeps < 100);
    assert_relative_eq!(solution.x.get(0, 0), 0.0909, epsilon = 1e-4);
    assert_relative_eq!(solution.x.get(1, 0), 0.6364, epsilon = 1e-4);
}

#[test]
fn test_sor_agrees_with_gauss_on_generated_system() {
    let (a, f) = generated_system::<f64>(6, 2).unwrap();
    let direct = solve(&a, &f, PivotStrategy::Partial).unwrap();

    for omega in [0.8, 1.0, 1.4] {
        let config = SorConfig {
            omega,
            precision: 1e-12,
            max_sweeps: Some(100_000),
            print_interval: 0,
        };
        let iterative = sor(&a, &f, &config).unwrap();
        assert!(iterative.converged, "omega = {}", omega);
        assert!(iterative.x.approx_eq(&direct, 1e-8), "omega = {}", omega);
    }
}

#[test]
fn test_copy_is_independent() {
    let mut rng = StdRng::seed_from_u64(31);
    let (m, _) = random_system(&mut rng, 4);
    let original = m.clone();

    let mut copy = m.try_clone().unwrap();
    copy.set(0, 0, 1e6);
    copy.swap_rows(1, 3);
    copy.add_scaled_row(0, 2, 5.0);

    assert_eq!(m, original);
}

#[test]
fn test_shape_errors() {
    let a: Matrix = Matrix::new(2, 3).unwrap();
    let b: Matrix = Matrix::new(2, 3).unwrap();
    assert!(matches!(
        a.multiply(&b),
        Err(SolverError::DimensionMismatch { expected: 3, got: 2 })
    ));

    let f: Matrix = Matrix::new(2, 1).unwrap();
    assert!(solve(&a, &f, PivotStrategy::Partial).unwrap_err().is_invalid_argument());
    assert!(determinant(&a, PivotStrategy::FirstNonZero).unwrap_err().is_invalid_argument());
    assert!(inverse(&a).unwrap_err().is_invalid_argument());
}
