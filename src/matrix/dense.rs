//! Owned square matrix with contiguous row-major storage.

use crate::error::{Error, Result, try_zeroed};

/// Dense D×D matrix, row-major with stride `dim`.
///
/// Built once before the parallel phase and only ever lent out as `&Matrix`
/// afterwards, so workers can read it concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocates a `dim × dim` matrix of zeros.
    pub fn zeros(dim: usize) -> Result<Self> {
        let elements = dim.checked_mul(dim).ok_or_else(|| {
            Error::InvalidConfiguration(format!("matrix dimension {} overflows", dim))
        })?;
        let data = try_zeroed("matrix", elements)?;
        Ok(Self { dim, data })
    }

    /// `scale · I`. The default workload uses `scale = 0.999`.
    pub fn scaled_identity(dim: usize, scale: f64) -> Result<Self> {
        let mut m = Self::zeros(dim)?;
        for i in 0..dim {
            m.data[i * dim + i] = scale;
        }
        Ok(m)
    }

    /// Builds a matrix from `f(row, col)`.
    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> f64) -> Result<Self> {
        let mut m = Self::zeros(dim)?;
        for i in 0..dim {
            for j in 0..dim {
                m.data[i * dim + j] = f(i, j);
            }
        }
        Ok(m)
    }

    /// Wraps row-major data. Fails unless `data.len() == dim * dim`.
    pub fn from_row_major(dim: usize, data: Vec<f64>) -> Result<Self> {
        if dim.checked_mul(dim) != Some(data.len()) {
            return Err(Error::InvalidConfiguration(format!(
                "expected {}x{} elements, got {}",
                dim,
                dim,
                data.len()
            )));
        }
        Ok(Self { dim, data })
    }

    /// Builds a matrix from nested rows, rejecting anything that isn't square.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let dim = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(Error::InvalidConfiguration(format!(
                "matrix is not square: row {} has {} elements, expected {}",
                i,
                row.len(),
                dim
            )));
        }
        Self::from_row_major(dim, rows.concat())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.dim + col]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Default starting vector: `1, 2, ..., dim`.
pub fn initial_vector(dim: usize) -> Result<Vec<f64>> {
    let mut v = try_zeroed("initial vector", dim)?;
    for (i, x) in v.iter_mut().enumerate() {
        *x = i as f64 + 1.0;
    }
    Ok(v)
}
