use crate::error::Result;
use crate::kernels::Method;
use crate::matrix::Matrix;
use crate::matrix::transpose::transpose;

/// Naive matrix-vector product: `y = A · x`.
///
/// Textbook double loop over the row-major storage. Accumulates from zero
/// in index order, the same order the threaded kernels use, so results are
/// bit-for-bit comparable.
///
/// # Arguments
///
/// * `a` - Matrix A (d × d), row-major
/// * `x` - Input vector (d)
/// * `y` - Output vector (d), overwritten
/// * `d` - Dimension
pub fn matvec_naive(a: &[f64], x: &[f64], y: &mut [f64], d: usize) {
    for i in 0..d {
        let mut sum = 0.0;
        for j in 0..d {
            sum += a[i * d + j] * x[j];
        }
        y[i] = sum;
    }
}

/// Applies the matrix `iterations` times to `initial` on one thread.
///
/// Column-major runs against an explicit transpose, so this path shares no
/// indexing code with the line kernels.
///
/// Use this as a correctness baseline, not for performance.
pub fn power_iterate_naive(
    matrix: &Matrix,
    initial: &[f64],
    iterations: usize,
    method: Method,
) -> Result<Vec<f64>> {
    let transposed;
    let a = match method {
        Method::RowMajor => matrix,
        Method::ColumnMajor => {
            transposed = transpose(matrix)?;
            &transposed
        }
    };

    let d = a.dim();
    let mut v = initial.to_vec();
    let mut next = vec![0.0; d];
    for _ in 0..iterations {
        matvec_naive(a.as_slice(), &v, &mut next, d);
        std::mem::swap(&mut v, &mut next);
    }
    Ok(v)
}
