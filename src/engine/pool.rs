//! Scoped worker pool for per-point maps.
//!
//! ## Purpose
//!
//! Distributes the independent per-point computations (bandwidths, local
//! estimates) across a fixed number of workers.
//!
//! ## Design notes
//!
//! * One pool per smoothing call. The rayon pool is owned by [`WorkerPool`]
//!   and released when it is dropped, on success and on error alike.
//! * A single worker means no pool at all: maps run as plain iterators on
//!   the calling thread.
//! * Results are always collected in index order, so the worker count never
//!   changes the output.
//! * Per-worker scratch state is created with `map_init` and reused across
//!   the indices that worker handles.
//! * A panic inside a task propagates out of [`WorkerPool::map_indexed`];
//!   no partial result is returned.

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::primitives::errors::LowessError;

/// Fixed-size pool that executes index maps.
#[derive(Debug)]
pub enum WorkerPool {
    /// Run on the calling thread.
    Sequential,

    /// Run on a dedicated rayon pool.
    Parallel(ThreadPool),
}

impl WorkerPool {
    /// Acquire a pool with `workers` threads.
    pub fn new(workers: usize) -> Result<Self, LowessError> {
        if workers == 0 {
            return Err(LowessError::InvalidWorkers(workers));
        }
        if workers == 1 {
            return Ok(Self::Sequential);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("parlowess-worker-{i}"))
            .build()
            .map_err(|e| LowessError::ThreadPool(e.to_string()))?;
        debug!("acquired worker pool with {} threads", pool.current_num_threads());

        Ok(Self::Parallel(pool))
    }

    /// Number of workers executing maps.
    pub fn workers(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel(pool) => pool.current_num_threads(),
        }
    }

    /// Evaluate `f(state, i)` for every `i in 0..n`, returning results in
    /// index order. `init` creates one scratch state per worker.
    pub fn map_indexed<R, S, I, F>(&self, n: usize, init: I, f: F) -> Vec<R>
    where
        R: Send,
        I: Fn() -> S + Send + Sync,
        F: Fn(&mut S, usize) -> R + Send + Sync,
    {
        match self {
            Self::Sequential => {
                let mut state = init();
                (0..n).map(|i| f(&mut state, i)).collect()
            }
            Self::Parallel(pool) => pool.install(|| {
                (0..n)
                    .into_par_iter()
                    .map_init(&init, |state, i| f(state, i))
                    .collect()
            }),
        }
    }
}
