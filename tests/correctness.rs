use matvec_power::matrix::naive::power_iterate_naive;
use matvec_power::matrix::transpose::transpose;
use matvec_power::threaded::Partition;
use matvec_power::{
    DEFAULT_SCALE, Error, Matrix, Method, RunConfig, Slot, initial_vector, power_iterate,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_vectors_equal(expected: &[f64], actual: &[f64], name: &str) {
    assert_eq!(expected.len(), actual.len(), "{}: length mismatch", name);
    for i in 0..expected.len() {
        let tol = 1e-9 * expected[i].abs().max(1.0);
        assert!(
            (expected[i] - actual[i]).abs() < tol,
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            expected[i],
            actual[i]
        );
    }
}

/// Random asymmetric matrix with entries in [-1, 1] / d, so repeated
/// application neither explodes nor vanishes too fast.
fn random_matrix(d: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let scale = 1.0 / d as f64;
    Matrix::from_fn(d, |_, _| rng.gen_range(-1.0..1.0) * scale).unwrap()
}

fn random_vector(d: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..d).map(|_| rng.gen_range(-10.0..10.0)).collect()
}

fn run(m: &Matrix, v: &[f64], method: Method, threads: usize, iterations: usize) -> Vec<f64> {
    let config = RunConfig::new(method, threads, iterations).unwrap();
    power_iterate(m, v, &config).unwrap().result
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn test_diag_half_two_iterations() {
    let a = Matrix::scaled_identity(3, 0.5).unwrap();
    let result = run(&a, &[1.0, 2.0, 3.0], Method::RowMajor, 1, 2);
    assert_eq!(result, vec![0.25, 0.5, 0.75]);
}

#[test]
fn test_zero_iterations_returns_input() {
    let a = Matrix::scaled_identity(4, DEFAULT_SCALE).unwrap();
    let v = initial_vector(4).unwrap();

    for method in [Method::RowMajor, Method::ColumnMajor] {
        for threads in 1..=4 {
            let config = RunConfig::new(method, threads, 0).unwrap();
            let outcome = power_iterate(&a, &v, &config).unwrap();
            assert_eq!(outcome.result, vec![1.0, 2.0, 3.0, 4.0]);
            assert_eq!(outcome.result_slot, Slot::A);
        }
    }
}

#[test]
fn test_default_workload() {
    let d = 1000;
    let a = Matrix::scaled_identity(d, DEFAULT_SCALE).unwrap();
    let v = initial_vector(d).unwrap();
    let iterations = 10;

    let expected: Vec<f64> = (0..d)
        .map(|i| (i as f64 + 1.0) * DEFAULT_SCALE.powi(iterations as i32))
        .collect();

    for method in [Method::RowMajor, Method::ColumnMajor] {
        let result = run(&a, &v, method, 4, iterations);
        assert_vectors_equal(&expected, &result, &format!("default_{:?}", method));
    }
}

// ============================================================
// Single thread vs naive reference
// ============================================================

#[test]
fn test_single_thread_matches_naive() {
    for d in [1, 2, 3, 7, 16, 33] {
        let a = random_matrix(d, d as u64);
        let v = random_vector(d, 100 + d as u64);

        for method in [Method::RowMajor, Method::ColumnMajor] {
            for iterations in 0..6 {
                let expected = power_iterate_naive(&a, &v, iterations, method).unwrap();
                let actual = run(&a, &v, method, 1, iterations);
                assert_vectors_equal(
                    &expected,
                    &actual,
                    &format!("d={} {:?} k={}", d, method, iterations),
                );
            }
        }
    }
}

// ============================================================
// Multi-threaded tests
// ============================================================

#[test]
fn test_even_split_matches_single_thread() {
    let d = 24;
    let a = random_matrix(d, 7);
    let v = random_vector(d, 8);

    for method in [Method::RowMajor, Method::ColumnMajor] {
        for iterations in [1, 2, 5, 10] {
            let single = run(&a, &v, method, 1, iterations);
            for threads in [2, 3, 4, 6, 8, 12, 24] {
                let multi = run(&a, &v, method, threads, iterations);
                assert_vectors_equal(
                    &single,
                    &multi,
                    &format!("{:?} threads={} k={}", method, threads, iterations),
                );
            }
        }
    }
}

#[test]
fn test_uneven_split_matches_single_thread() {
    let d = 37;
    let a = random_matrix(d, 11);
    let v = random_vector(d, 12);

    for method in [Method::RowMajor, Method::ColumnMajor] {
        let single = run(&a, &v, method, 1, 7);
        for threads in [2, 5, 10, 36, 37] {
            let multi = run(&a, &v, method, threads, 7);
            assert_vectors_equal(&single, &multi, &format!("{:?} threads={}", method, threads));
        }
    }
}

#[test]
fn test_many_passes_many_threads() {
    // Every pass reads all lines, so a missing barrier shows up quickly here.
    let d = 64;
    let a = random_matrix(d, 21);
    let v = random_vector(d, 22);
    let iterations = 200;

    for method in [Method::RowMajor, Method::ColumnMajor] {
        let expected = power_iterate_naive(&a, &v, iterations, method).unwrap();
        for threads in [2, 8, 16] {
            let actual = run(&a, &v, method, threads, iterations);
            assert_vectors_equal(
                &expected,
                &actual,
                &format!("stress {:?} threads={}", method, threads),
            );
        }
    }
}

#[test]
fn test_more_threads_than_dimension() {
    let a = random_matrix(3, 31);
    let v = random_vector(3, 32);
    let expected = power_iterate_naive(&a, &v, 4, Method::RowMajor).unwrap();
    let actual = run(&a, &v, Method::RowMajor, 8, 4);
    assert_vectors_equal(&expected, &actual, "threads > d");
}

// ============================================================
// Row-major vs column-major
// ============================================================

#[test]
fn test_methods_apply_a_and_a_transpose() {
    // [[1, 2, 0],
    //  [0, 1, 3],
    //  [4, 0, 1]]
    let a = Matrix::from_rows(&[
        vec![1.0, 2.0, 0.0],
        vec![0.0, 1.0, 3.0],
        vec![4.0, 0.0, 1.0],
    ])
    .unwrap();
    let v = [1.0, 1.0, 1.0];

    let row = run(&a, &v, Method::RowMajor, 2, 1);
    let col = run(&a, &v, Method::ColumnMajor, 2, 1);

    assert_eq!(row, vec![3.0, 4.0, 5.0]);
    assert_eq!(col, vec![5.0, 3.0, 4.0]);
    assert_ne!(row, col);

    // Column-major on A is row-major on Aᵀ.
    let at = transpose(&a).unwrap();
    for iterations in 1..5 {
        let col = run(&a, &v, Method::ColumnMajor, 3, iterations);
        let row_t = run(&at, &v, Method::RowMajor, 3, iterations);
        assert_vectors_equal(&row_t, &col, &format!("transpose k={}", iterations));
    }
}

// ============================================================
// Buffer parity
// ============================================================

#[test]
fn test_result_slot_follows_parity() {
    let a = Matrix::scaled_identity(5, 2.0).unwrap();
    let v = initial_vector(5).unwrap();

    for iterations in 0..6 {
        let config = RunConfig::new(Method::RowMajor, 2, iterations).unwrap();
        let outcome = power_iterate(&a, &v, &config).unwrap();
        assert_eq!(outcome.result_slot, Slot::holding_result(iterations));

        let factor = 2f64.powi(iterations as i32);
        let expected: Vec<f64> = v.iter().map(|x| x * factor).collect();
        assert_eq!(outcome.result, expected);
    }
}

// ============================================================
// Partition coverage
// ============================================================

#[test]
fn test_partition_covers_dimension_once() {
    for d in [1, 2, 10, 999, 1000] {
        for workers in [1, 2, 3, 7, 8, 64] {
            if workers > d {
                continue;
            }
            let p = Partition::new(d, workers).unwrap();
            let total: usize = p.slices().iter().map(|s| s.len()).sum();
            assert_eq!(total, d);
            assert_eq!(p.slices().first().unwrap().from, 0);
            assert_eq!(p.slices().last().unwrap().to, d);
            for pair in p.slices().windows(2) {
                assert_eq!(pair[0].to, pair[1].from);
            }
        }
    }
}

// ============================================================
// Invalid configuration
// ============================================================

#[test]
fn test_zero_threads_rejected() {
    assert!(matches!(
        RunConfig::new(Method::RowMajor, 0, 1),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        RunConfig::from_args(["1", "-2", "1"]),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Partition::new(8, 0),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn test_vector_length_mismatch_rejected() {
    let a = Matrix::scaled_identity(4, 1.0).unwrap();
    let config = RunConfig::new(Method::RowMajor, 2, 1).unwrap();
    assert!(matches!(
        power_iterate(&a, &[1.0; 3], &config),
        Err(Error::InvalidConfiguration(_))
    ));
}
