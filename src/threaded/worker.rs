//! The per-thread iteration loop.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::kernels::{Method, iterate_lines};
use crate::matrix::Matrix;
use crate::threaded::barrier::{AbortGuard, IterationBarrier};
use crate::threaded::buffer_pair::{BufferPair, Slot};
use crate::threaded::partition::Slice;

/// Everything one worker needs, borrowed from the coordinator.
pub struct WorkerTask<'a> {
    pub worker: usize,
    pub slice: Slice,
    pub iterations: usize,
    pub method: Method,
    pub matrix: &'a Matrix,
    pub buffers: &'a BufferPair,
    pub barrier: &'a IterationBarrier,
}

/// What a worker hands back through its join handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    pub slice: Slice,
    pub passes: usize,
    /// The buffer that holds this worker's slice of the final vector.
    pub result_slot: Slot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running(usize),
    Done,
}

impl WorkerState {
    /// Whether `self -> next` is a legal step for a run of `iterations` passes.
    pub fn can_become(self, next: Self, iterations: usize) -> bool {
        match (self, next) {
            (WorkerState::Idle, WorkerState::Running(0)) => iterations > 0,
            (WorkerState::Idle, WorkerState::Done) => iterations == 0,
            (WorkerState::Running(k), WorkerState::Running(j)) => j == k + 1 && j < iterations,
            (WorkerState::Running(k), WorkerState::Done) => k + 1 == iterations,
            _ => false,
        }
    }
}

/// Runs `iterations` passes over the task's slice.
///
/// Each pass reads the whole input buffer and writes only `slice` of the
/// output buffer. Between passes every worker meets at the barrier, so no
/// one reads a buffer another worker is still writing. There is no barrier
/// after the final pass; the coordinator's join orders it instead.
pub fn run_worker(task: WorkerTask<'_>) -> Result<WorkerReport> {
    let guard = AbortGuard::new(task.barrier);
    let mut view = task.buffers.view();
    let mut state = WorkerState::Idle;

    debug!(
        worker = task.worker,
        from = task.slice.from,
        to = task.slice.to,
        "worker started"
    );

    let mut passes = 0;
    for k in 0..task.iterations {
        state = transition(&task, state, WorkerState::Running(k));

        iterate_lines(
            task.matrix,
            task.method,
            task.slice.from,
            task.slice.to,
            view.input(),
            view.output(),
        );
        view.swap();
        passes += 1;

        if k + 1 < task.iterations {
            task.barrier
                .wait()
                .map_err(|_| Error::WorkerAborted {
                    worker: task.worker,
                })?;
        }
    }
    transition(&task, state, WorkerState::Done);

    guard.disarm();

    debug!(worker = task.worker, passes, "worker finished");
    Ok(WorkerReport {
        worker: task.worker,
        slice: task.slice,
        passes,
        result_slot: view.input_slot(),
    })
}

fn transition(task: &WorkerTask<'_>, from: WorkerState, to: WorkerState) -> WorkerState {
    debug_assert!(
        from.can_become(to, task.iterations),
        "worker {}: illegal transition {:?} -> {:?}",
        task.worker,
        from,
        to
    );
    trace!(worker = task.worker, ?from, ?to, "worker state");
    to
}
