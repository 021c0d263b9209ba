//! The two vectors that trade input/output roles every iteration.
//!
//! Elements are `f64` bit patterns in `AtomicU64`s so several workers can
//! hold `&BufferPair` at once. Loads and stores are `Relaxed`: within a pass
//! no element is both read and written, and the iteration barrier orders
//! one pass's stores before the next pass's loads.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::kernels::{VectorRead, VectorWrite};

/// Fixed-length vector that can be read and written through `&self`.
pub struct SharedVector {
    cells: Box<[AtomicU64]>,
}

impl SharedVector {
    pub fn from_slice(what: &'static str, values: &[f64]) -> Result<Self> {
        let mut cells = reserve(what, values.len())?;
        cells.extend(values.iter().map(|v| AtomicU64::new(v.to_bits())));
        Ok(Self {
            cells: cells.into_boxed_slice(),
        })
    }

    pub fn zeroed(what: &'static str, len: usize) -> Result<Self> {
        let mut cells = reserve(what, len)?;
        cells.extend((0..len).map(|_| AtomicU64::new(0.0f64.to_bits())));
        Ok(Self {
            cells: cells.into_boxed_slice(),
        })
    }

    pub fn to_vec(&self) -> Vec<f64> {
        (0..self.cells.len()).map(|j| self.value(j)).collect()
    }
}

fn reserve(what: &'static str, elements: usize) -> Result<Vec<AtomicU64>> {
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(elements)
        .map_err(|source| Error::AllocationFailure {
            what,
            elements,
            source,
        })?;
    Ok(cells)
}

impl VectorRead for SharedVector {
    fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn value(&self, j: usize) -> f64 {
        f64::from_bits(self.cells[j].load(Ordering::Relaxed))
    }
}

impl VectorWrite for SharedVector {
    #[inline]
    fn store(&self, i: usize, value: f64) {
        self.cells[i].store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Names one of the two buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Starts out holding the initial vector.
    A,
    /// Starts out as the first output.
    B,
}

impl Slot {
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    /// Where the result sits after `iterations` passes.
    pub fn holding_result(iterations: usize) -> Self {
        if iterations % 2 == 0 { Slot::A } else { Slot::B }
    }
}

pub struct BufferPair {
    a: SharedVector,
    b: SharedVector,
}

impl BufferPair {
    /// `A` gets a copy of `initial`; `B` starts as zeros of the same length.
    pub fn new(initial: &[f64]) -> Result<Self> {
        let a = SharedVector::from_slice("input buffer", initial)?;
        let b = SharedVector::zeroed("output buffer", initial.len())?;
        Ok(Self { a, b })
    }

    pub fn slot(&self, slot: Slot) -> &SharedVector {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// A fresh role assignment: read `A`, write `B`.
    pub fn view(&self) -> BufferView<'_> {
        BufferView {
            pair: self,
            input: Slot::A,
        }
    }
}

/// One worker's idea of which buffer is input and which is output.
///
/// Every worker starts from [`BufferPair::view`] and swaps once per pass,
/// so all views agree at each barrier.
#[derive(Clone, Copy)]
pub struct BufferView<'a> {
    pair: &'a BufferPair,
    input: Slot,
}

impl<'a> BufferView<'a> {
    pub fn input(&self) -> &'a SharedVector {
        self.pair.slot(self.input)
    }

    pub fn output(&self) -> &'a SharedVector {
        self.pair.slot(self.input.other())
    }

    pub fn input_slot(&self) -> Slot {
        self.input
    }

    pub fn swap(&mut self) {
        self.input = self.input.other();
    }
}
