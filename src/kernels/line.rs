//! Per-element multiply-accumulate.
//!
//! One output element is the dot product of a matrix line with the whole
//! input vector. Row-major walks `A[l][..]` with stride 1; column-major walks
//! `A[..][l]` with stride D, which is the cache-unfriendly direction.

use crate::kernels::Method;
use crate::matrix::Matrix;

/// Read access to a vector, so the same multiplier runs over plain slices
/// and over the shared buffers the workers use.
pub trait VectorRead {
    fn len(&self) -> usize;

    fn value(&self, j: usize) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access to single elements of a vector.
pub trait VectorWrite {
    fn store(&self, i: usize, value: f64);
}

impl VectorRead for [f64] {
    fn len(&self) -> usize {
        <[f64]>::len(self)
    }

    #[inline]
    fn value(&self, j: usize) -> f64 {
        self[j]
    }
}

impl VectorRead for Vec<f64> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn value(&self, j: usize) -> f64 {
        self[j]
    }
}

/// `sum_j line(l)[j] * input[j]`, accumulated from zero in index order.
#[inline]
pub fn line_dot<V: VectorRead + ?Sized>(
    matrix: &Matrix,
    method: Method,
    line: usize,
    input: &V,
) -> f64 {
    let d = matrix.dim();
    debug_assert_eq!(input.len(), d);

    match method {
        Method::RowMajor => matrix
            .row(line)
            .iter()
            .enumerate()
            .fold(0.0, |acc, (j, &a)| acc + a * input.value(j)),
        Method::ColumnMajor => {
            (0..d).fold(0.0, |acc, j| acc + matrix.get(j, line) * input.value(j))
        }
    }
}

/// Computes element `line` of the next vector and overwrites it in `output`.
///
/// The previous contents of `output[line]` never leak into the sum.
#[inline]
pub fn iterate_line<V, W>(matrix: &Matrix, method: Method, line: usize, input: &V, output: &W)
where
    V: VectorRead + ?Sized,
    W: VectorWrite + ?Sized,
{
    output.store(line, line_dot(matrix, method, line, input));
}

/// Runs [`iterate_line`] over every index in `[from, to)`.
pub fn iterate_lines<V, W>(
    matrix: &Matrix,
    method: Method,
    from: usize,
    to: usize,
    input: &V,
    output: &W,
) where
    V: VectorRead + ?Sized,
    W: VectorWrite + ?Sized,
{
    for line in from..to {
        iterate_line(matrix, method, line, input, output);
    }
}
