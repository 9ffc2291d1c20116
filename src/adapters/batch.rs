//! Batch adapter for robust LOWESS smoothing.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter. It handles complete
//! datasets in memory with optional parallel processing.
//!
//! ## Key concepts
//!
//! ### Batch Processing
//! The batch adapter:
//! 1. Flattens and validates input data
//! 2. Sorts data by x-values (required for span finding)
//! 3. Executes the engine inside a scoped worker pool
//! 4. Unsorts results to match original input order
//! 5. Packages everything into a `LowessResult`
//!
//! ### Builder Pattern
//! Configuration is done through `BatchLowessBuilder`; validation is
//! deferred until `build()` is called.
//!
//! ## Invariants
//!
//! * Input arrays x and y must have the same nonzero length.
//! * All values must be finite.
//! * Fraction must be in (0, 1].
//! * Output order matches input order.

use std::fmt::Debug;
use std::result::Result;

use log::debug;
use num_traits::Float;

use crate::engine::executor::LowessExecutor;
use crate::engine::output::LowessResult;
use crate::engine::validator::{validate_inputs, validate_params};
use crate::input::LowessInput;
use crate::primitives::errors::LowessError;
use crate::primitives::sorting::sort_by_x;

// ============================================================================
// Batch LOWESS Builder
// ============================================================================

/// Builder for the batch LOWESS processor.
#[derive(Debug, Clone)]
pub struct BatchLowessBuilder<T: Float> {
    /// Span fraction `f`.
    pub fraction: T,

    /// Number of estimation passes.
    pub iterations: usize,

    /// Worker count.
    pub workers: usize,

    /// Include residuals in the result.
    pub return_residuals: bool,

    /// Include final robustness weights in the result.
    pub return_robustness_weights: bool,

    /// Error recorded during builder configuration, reported at `build()`.
    pub deferred_error: Option<LowessError>,
}

impl<T: Float> BatchLowessBuilder<T> {
    /// Build the batch processor.
    ///
    /// # Returns
    ///
    /// A configured `BatchLowess` processor ready to fit data.
    ///
    /// # Errors
    ///
    /// Returns `LowessError` if:
    /// * A builder setter was called more than once
    /// * Fraction is outside (0, 1]
    /// * Iterations or workers is zero
    pub fn build(self) -> Result<BatchLowess<T>, LowessError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        validate_params(self.fraction, self.iterations, self.workers)?;

        Ok(BatchLowess { config: self })
    }
}

// ============================================================================
// Batch LOWESS Processor
// ============================================================================

/// Batch LOWESS processor with parallel support.
#[derive(Debug, Clone)]
pub struct BatchLowess<T: Float> {
    config: BatchLowessBuilder<T>,
}

impl<T: Float + Debug + Send + Sync> BatchLowess<T> {
    /// Perform LOWESS smoothing on the provided data.
    ///
    /// # Parameters
    ///
    /// * `x` - Independent variable values, in any order
    /// * `y` - Dependent variable values (must have same length as x)
    ///
    /// # Returns
    ///
    /// `LowessResult` containing:
    /// * The input x-values and smoothed y-values, in input order
    /// * Residuals (if requested)
    /// * Final robustness weights (if requested)
    /// * The fraction, iterations and workers used
    ///
    /// # Errors
    ///
    /// Returns `LowessError` if:
    /// * Input arrays have different lengths
    /// * Inputs are empty
    /// * An ndarray input has more than one non-unit axis
    /// * Inputs contain NaN or infinity
    /// * The worker pool cannot be created
    pub fn fit<I1, I2>(&self, x: &I1, y: &I2) -> Result<LowessResult<T>, LowessError>
    where
        I1: LowessInput<T> + ?Sized,
        I2: LowessInput<T> + ?Sized,
    {
        let x_values = x.as_lowess_values("x")?;
        let y_values = y.as_lowess_values("y")?;
        let x: &[T] = &x_values;
        let y: &[T] = &y_values;
        validate_inputs(x, y)?;

        let sorted = sort_by_x(x, y);

        let executor = LowessExecutor::new(
            self.config.fraction,
            self.config.iterations,
            self.config.workers,
        );
        let output = executor.run(&sorted.x, &sorted.y)?;
        debug!(
            "batch fit finished: {} points, {} iterations",
            x.len(),
            output.iterations
        );

        Ok(LowessResult {
            x: x.to_vec(),
            y: sorted.unsort(&output.y),
            residuals: self
                .config
                .return_residuals
                .then(|| sorted.unsort(&output.residuals)),
            robustness_weights: self
                .config
                .return_robustness_weights
                .then(|| sorted.unsort(&output.robustness_weights)),
            fraction_used: self.config.fraction,
            iterations_used: output.iterations,
            workers_used: output.workers,
        })
    }
}
