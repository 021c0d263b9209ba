//! Splits the output indices into one contiguous slice per worker.

use std::ops::Range;

use crate::error::{Error, Result};

/// Half-open index range `[from, to)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub from: usize,
    pub to: usize,
}

impl Slice {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn range(&self) -> Range<usize> {
        self.from..self.to
    }
}

/// The slices of `[0, dim)`, indexed by worker id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    dim: usize,
    slices: Vec<Slice>,
}

impl Partition {
    /// Splits `[0, dim)` into `workers` slices of `dim / workers` lines each;
    /// the last slice also takes the remainder.
    ///
    /// With more workers than lines every slice but the last is empty.
    pub fn new(dim: usize, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidConfiguration(
                "thread count must be at least 1".to_string(),
            ));
        }

        let base = dim / workers;
        let mut slices = Vec::new();
        slices
            .try_reserve_exact(workers)
            .map_err(|source| Error::AllocationFailure {
                what: "partition",
                elements: workers,
                source,
            })?;
        slices.extend((0..workers).map(|i| Slice {
            from: i * base,
            to: if i == workers - 1 { dim } else { (i + 1) * base },
        }));

        let partition = Self { dim, slices };
        partition.verify()?;
        Ok(partition)
    }

    /// Checks that the slices tile `[0, dim)` in order with no gaps or overlaps.
    pub fn verify(&self) -> Result<()> {
        let mut expected_from = 0;
        for (worker, s) in self.slices.iter().enumerate() {
            if s.from != expected_from || s.to < s.from {
                return Err(Error::InvalidConfiguration(format!(
                    "slice {} is [{}, {}), expected it to start at {}",
                    worker, s.from, s.to, expected_from
                )));
            }
            expected_from = s.to;
        }
        if expected_from != self.dim {
            return Err(Error::InvalidConfiguration(format!(
                "slices cover [0, {}) but dimension is {}",
                expected_from, self.dim
            )));
        }
        Ok(())
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn workers(&self) -> usize {
        self.slices.len()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}
