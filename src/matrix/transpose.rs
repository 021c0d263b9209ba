use crate::error::Result;
use crate::matrix::Matrix;

/// Transpose a square matrix: returns M^T.
///
/// What was column j of `m` becomes row j of the result, which turns a
/// column-major line walk into a row-major one.
///
/// # Example
///
/// ```
/// use matvec_power::matrix::{Matrix, transpose::transpose};
///
/// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let t = transpose(&m).unwrap();
///
/// assert_eq!(t.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
/// ```
pub fn transpose(m: &Matrix) -> Result<Matrix> {
    Matrix::from_fn(m.dim(), |i, j| m.get(j, i))
}
