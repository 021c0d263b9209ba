//! Multi-threaded power iteration: `V(n+1) = A · V(n)`.
//!
//! A fixed dense matrix is applied to a vector over and over, with the
//! output indices split across worker threads. Two buffers swap input and
//! output roles every pass, so nothing gets copied between iterations.
//!
//! ## Usage
//!
//! ```
//! use matvec_power::{Matrix, Method, RunConfig, power_iterate};
//!
//! let a = Matrix::scaled_identity(3, 0.5).unwrap();
//! let v = [1.0, 2.0, 3.0];
//! let config = RunConfig::new(Method::RowMajor, 1, 2).unwrap();
//!
//! let outcome = power_iterate(&a, &v, &config).unwrap();
//! assert_eq!(outcome.result, vec![0.25, 0.5, 0.75]);
//! ```
//!
//! ## Methods
//!
//! - [`Method::RowMajor`]: element `i` is row `i` of A dotted with V
//! - [`Method::ColumnMajor`]: element `i` is column `i` of A dotted with V,
//!   i.e. the product with Aᵀ
//!
//! ## What's inside
//!
//! - Owned row-major matrix with explicit stride
//! - Slice partitioner, last worker absorbs the remainder
//! - Per-pass barrier that can be aborted if a worker dies
//! - Naive single-threaded baseline for correctness checks

pub mod config;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod threaded;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use kernels::Method;
pub use matrix::{Matrix, initial_vector};
pub use threaded::{RunOutcome, Slot};

/// Dimension of the matrix and vectors used by the command-line run.
pub const DIMENSION: usize = 1000;

/// Diagonal value of the default iteration matrix (`0.999 · I`).
pub const DEFAULT_SCALE: f64 = 0.999;

/// Applies `matrix` to `initial` `config.iterations` times across
/// `config.threads` threads.
///
/// Returns the final vector and the elapsed time of the parallel phase
/// only. See [`threaded::coordinator::run`].
pub fn power_iterate(matrix: &Matrix, initial: &[f64], config: &RunConfig) -> Result<RunOutcome> {
    threaded::run(matrix, initial, config)
}
