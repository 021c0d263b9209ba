//! Spawns the workers, waits for them, and picks out the result buffer.

use std::any::Any;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::threaded::barrier::IterationBarrier;
use crate::threaded::buffer_pair::{BufferPair, Slot};
use crate::threaded::partition::Partition;
use crate::threaded::worker::{WorkerReport, WorkerTask, run_worker};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: Vec<f64>,
    /// Wall-clock time from first spawn to last join.
    pub elapsed: Duration,
    pub result_slot: Slot,
}

/// Applies `matrix` to `initial` `config.iterations` times on
/// `config.threads` worker threads.
///
/// Allocation, partitioning and validation all happen before the clock
/// starts. Any failure in any worker fails the whole run; no partial
/// result is returned.
pub fn run(matrix: &Matrix, initial: &[f64], config: &RunConfig) -> Result<RunOutcome> {
    let dim = matrix.dim();
    if initial.len() != dim {
        return Err(Error::InvalidConfiguration(format!(
            "initial vector has {} elements, matrix is {}x{}",
            initial.len(),
            dim,
            dim
        )));
    }
    if config.threads > dim {
        warn!(
            threads = config.threads,
            dim, "more threads than lines, some workers will idle"
        );
    }

    let partition = Partition::new(dim, config.threads)?;
    let buffers = BufferPair::new(initial)?;
    let barrier = IterationBarrier::new(partition.workers());
    let expected = Slot::holding_result(config.iterations);

    info!(
        dim,
        threads = config.threads,
        iterations = config.iterations,
        method = %config.method,
        "starting parallel phase"
    );

    let start = Instant::now();
    let reports = spawn_and_join(matrix, &buffers, &barrier, &partition, config, run_worker)?;
    let end = Instant::now();
    let elapsed = end
        .checked_duration_since(start)
        .ok_or_else(|| Error::TimingFailure("monotonic clock went backwards".to_string()))?;

    for report in &reports {
        if report.passes != config.iterations || report.result_slot != expected {
            return Err(Error::InvalidConfiguration(format!(
                "worker {} finished {} passes in buffer {:?}, expected {} passes in {:?}",
                report.worker, report.passes, report.result_slot, config.iterations, expected
            )));
        }
    }

    let result = buffers.slot(expected).to_vec();
    debug_assert_eq!(result.len(), buffers.len());

    info!(
        elapsed_us = elapsed.as_micros() as u64,
        result_slot = ?expected,
        "parallel phase finished"
    );

    Ok(RunOutcome {
        result,
        elapsed,
        result_slot: expected,
    })
}

fn spawn_and_join<F>(
    matrix: &Matrix,
    buffers: &BufferPair,
    barrier: &IterationBarrier,
    partition: &Partition,
    config: &RunConfig,
    body: F,
) -> Result<Vec<WorkerReport>>
where
    F: Fn(WorkerTask<'_>) -> Result<WorkerReport> + Sync,
{
    let body = &body;
    thread::scope(|s| -> Result<Vec<WorkerReport>> {
        let mut handles = reserve("join handles", partition.workers())?;
        let mut reports = reserve("worker reports", partition.workers())?;
        let mut spawn_error = None;

        for (worker, &slice) in partition.slices().iter().enumerate() {
            let task = WorkerTask {
                worker,
                slice,
                iterations: config.iterations,
                method: config.method,
                matrix,
                buffers,
                barrier,
            };
            let spawned = thread::Builder::new()
                .name(format!("worker-{}", worker))
                .spawn_scoped(s, move || body(task));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    error!(worker, %source, "failed to spawn worker");
                    // Workers already running would otherwise wait for this one forever.
                    barrier.abort();
                    spawn_error = Some(Error::ThreadCreationFailure { worker, source });
                    break;
                }
            }
        }

        let mut panicked = None;
        let mut failed = None;
        let mut aborted = None;

        for (worker, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(err @ Error::WorkerAborted { .. })) => {
                    aborted.get_or_insert(err);
                }
                Ok(Err(err)) => {
                    error!(worker, %err, "worker failed");
                    failed.get_or_insert(err);
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(worker, %message, "worker panicked");
                    panicked.get_or_insert(Error::ThreadJoinFailure { worker, message });
                }
            }
        }

        match spawn_error.or(panicked).or(failed).or(aborted) {
            Some(err) => Err(err),
            None => Ok(reports),
        }
    })
}

fn reserve<T>(what: &'static str, elements: usize) -> Result<Vec<T>> {
    let mut items = Vec::new();
    items
        .try_reserve_exact(elements)
        .map_err(|source| Error::AllocationFailure {
            what,
            elements,
            source,
        })?;
    Ok(items)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("worker panicked: {}", s)
    } else {
        "worker panicked".to_string()
    }
}
