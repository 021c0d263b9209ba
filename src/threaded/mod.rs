//! Multi-threaded power iteration.
//!
//! Each worker owns a contiguous slice of the output indices and runs every
//! pass over that slice on its own thread. Threads are spawned once and run
//! all passes; they meet at a barrier between passes because each output
//! element needs the whole previous vector.
//!
//! - `partition`: splits `[0, D)` into per-worker slices
//! - `buffer_pair`: the two vectors trading input/output roles
//! - `barrier`: abortable per-pass rendezvous
//! - `worker`: the per-thread pass loop
//! - `coordinator`: spawn, join, resolve the result buffer

pub mod barrier;
pub mod buffer_pair;
pub mod coordinator;
pub mod partition;
pub mod worker;

pub use buffer_pair::{BufferPair, Slot};
pub use coordinator::{RunOutcome, run};
pub use partition::{Partition, Slice};
