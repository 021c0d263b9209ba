//! Dense matrix storage and naive implementations.
//!
//! The naive power iteration here is the single-threaded correctness
//! baseline the threaded engine is compared against.

pub mod dense;
pub mod naive;
pub mod transpose;

pub use dense::{Matrix, initial_vector};
