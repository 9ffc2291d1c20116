//! Execution engine for robust LOWESS smoothing.
//!
//! ## Purpose
//!
//! Drives the full smoothing pipeline over already-sorted data:
//!
//! 1. Acquire a scoped [`WorkerPool`].
//! 2. **Phase 1** (parallel, once): per-point bandwidths.
//! 3. Span bounds from bandwidths (sequential two-pointer scan).
//! 4. **Phase 2** (parallel, per iteration): local estimates for every point.
//! 5. Residuals and robustness weights on the calling thread.
//! 6. Repeat 4-5 for the configured number of iterations.
//!
//! ## Synchronization
//!
//! Each map borrows an immutable [`IterationContext`] and returns a fresh
//! vector. Robustness weights are only rewritten after the map has fully
//! completed, so no worker of iteration `k + 1` can observe a partially
//! updated state from iteration `k`.
//!
//! ## Invariants
//!
//! * Input x-values are sorted ascending.
//! * x and y have the same nonzero length.

use log::{debug, trace};
use num_traits::Float;

use crate::algorithms::regression::IterationContext;
use crate::algorithms::robustness::{compute_residuals, update_robustness_weights};
use crate::engine::pool::WorkerPool;
use crate::math::bandwidth::{bandwidth_at, neighbor_count};
use crate::primitives::errors::LowessError;
use crate::primitives::span::SpanBounds;

// ============================================================================
// Executor Output
// ============================================================================

/// Sorted-order output of one executor run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOutput<T> {
    /// Smoothed values.
    pub y: Vec<T>,

    /// Residuals `y - smoothed` of the final pass.
    pub residuals: Vec<T>,

    /// Robustness weights derived from the final pass.
    pub robustness_weights: Vec<T>,

    /// Per-point bandwidths.
    pub bandwidths: Vec<T>,

    /// Span bounds used for every local fit.
    pub spans: SpanBounds,

    /// Number of estimation passes performed.
    pub iterations: usize,

    /// Number of workers that executed the maps.
    pub workers: usize,
}

// ============================================================================
// Executor
// ============================================================================

/// Configured smoothing engine.
#[derive(Debug, Clone, Copy)]
pub struct LowessExecutor<T> {
    /// Span fraction `f`.
    pub fraction: T,

    /// Number of estimation passes (the first one unweighted).
    pub iterations: usize,

    /// Worker count for the parallel maps.
    pub workers: usize,
}

impl<T: Float + Send + Sync> LowessExecutor<T> {
    /// Create an executor.
    pub fn new(fraction: T, iterations: usize, workers: usize) -> Self {
        Self {
            fraction,
            iterations,
            workers,
        }
    }

    /// Run the pipeline on x sorted ascending and y in matching order.
    pub fn run(&self, x: &[T], y: &[T]) -> Result<ExecutorOutput<T>, LowessError> {
        let n = x.len();
        if n == 0 {
            return Err(LowessError::EmptyInput);
        }
        if y.len() != n {
            return Err(LowessError::MismatchedInputs {
                x_len: n,
                y_len: y.len(),
            });
        }

        let pool = WorkerPool::new(self.workers)?;
        let r = neighbor_count(n, self.fraction);
        debug!(
            "smoothing {} points: r={}, iterations={}, workers={}",
            n,
            r,
            self.iterations,
            pool.workers()
        );

        // Phase 1: bandwidths
        let h = pool.map_indexed(
            n,
            || vec![T::zero(); n],
            |scratch, i| bandwidth_at(x, i, r, scratch),
        );

        let spans = SpanBounds::compute(x, &h, r)?;

        // Phase 2: robustness iterations
        let mut yest = y.to_vec();
        let mut delta = vec![T::one(); n];
        let mut residuals = vec![T::zero(); n];
        let mut scratch = vec![T::zero(); n];

        for iteration in 0..self.iterations {
            let ctx = IterationContext {
                x,
                y,
                h: &h,
                spans: &spans,
                delta: &delta,
                previous: &yest,
            };
            let next = pool.map_indexed(n, || (), |_, i| ctx.estimate(i));
            yest = next;

            compute_residuals(y, &yest, &mut residuals);
            let scale = update_robustness_weights(&residuals, &mut delta, &mut scratch);
            trace!(
                "iteration {}: residual scale {:?}",
                iteration,
                scale.value().and_then(|s| s.to_f64())
            );
        }

        Ok(ExecutorOutput {
            y: yest,
            residuals,
            robustness_weights: delta,
            bandwidths: h,
            spans,
            iterations: self.iterations,
            workers: pool.workers(),
        })
    }
}
