//! Per-iteration rendezvous that can be torn down when a worker fails.
//!
//! `std::sync::Barrier` has no way out: if one party dies the rest wait
//! forever. This one carries an abort flag that wakes every waiter.

use std::sync::{Condvar, Mutex, MutexGuard};

use tracing::warn;

struct State {
    arrived: usize,
    generation: u64,
    aborted: bool,
}

/// Returned by [`IterationBarrier::wait`] once the run has been aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

pub struct IterationBarrier {
    parties: usize,
    state: Mutex<State>,
    cvar: Condvar,
}

impl IterationBarrier {
    pub fn new(parties: usize) -> Self {
        Self {
            parties,
            state: Mutex::new(State {
                arrived: 0,
                generation: 0,
                aborted: false,
            }),
            cvar: Condvar::new(),
        }
    }

    /// Blocks until all parties have arrived for the current generation.
    ///
    /// Everything a party wrote before calling `wait` is visible to every
    /// other party after its `wait` returns.
    pub fn wait(&self) -> Result<(), Aborted> {
        let mut state = self.lock();
        if state.aborted {
            return Err(Aborted);
        }

        let generation = state.generation;
        state.arrived += 1;
        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.cvar.notify_all();
            return Ok(());
        }

        while state.generation == generation && !state.aborted {
            state = self
                .cvar
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }

        if state.generation == generation {
            Err(Aborted)
        } else {
            Ok(())
        }
    }

    /// Releases every current and future waiter with [`Aborted`].
    pub fn abort(&self) {
        let mut state = self.lock();
        if !state.aborted {
            warn!(
                arrived = state.arrived,
                parties = self.parties,
                "aborting iteration barrier"
            );
            state.aborted = true;
        }
        self.cvar.notify_all();
    }

    pub fn is_aborted(&self) -> bool {
        self.lock().aborted
    }

    // Nothing panics while holding the lock, so a poisoned state is still
    // consistent.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Aborts the barrier on drop unless [`AbortGuard::disarm`] was called.
///
/// Held by each worker so that a panic or early error releases the others.
pub struct AbortGuard<'a> {
    barrier: &'a IterationBarrier,
    armed: bool,
}

impl<'a> AbortGuard<'a> {
    pub fn new(barrier: &'a IterationBarrier) -> Self {
        Self {
            barrier,
            armed: true,
        }
    }

    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbortGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.barrier.abort();
        }
    }
}
