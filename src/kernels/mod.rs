//! Line multipliers.
//!
//! A "line" is a row or a column of the matrix depending on [`Method`].
//! These functions compute single output elements and know nothing about
//! threads; the threaded engine calls them over each worker's slice.

pub mod line;
pub mod method;

pub use line::{VectorRead, VectorWrite, iterate_line, iterate_lines, line_dot};
pub use method::Method;
