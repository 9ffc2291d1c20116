//! High-level API for parallel LOWESS smoothing.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing API: the fluent
//! [`LowessBuilder`], the adapter selection markers, and the one-call
//! [`smooth`] function.
//!
//! ## Key concepts
//!
//! ### Builder Pattern
//! ```text
//! Lowess::<f64>::new()
//!     .fraction(0.5)
//!     .iterations(3)
//!     .workers(4)
//!     .adapter(Batch)
//!     .build()?
//!     .fit(&x, &y)?
//! ```
//!
//! Each parameter may be set once; setting it twice is reported as
//! `LowessError::DuplicateParameter` at `build()`.
//!
//! ### Adapter Selection
//! Only the **Batch** adapter exists: complete datasets held in memory.
//!
//! ## Visibility
//!
//! This module is the primary public API for the crate.

use std::fmt::Debug;
use std::result;

use num_traits::Float;

use crate::adapters::batch::BatchLowessBuilder;
use crate::input::LowessInput;

pub use crate::engine::output::LowessResult;
pub use crate::primitives::errors::LowessError;

// ============================================================================
// Type Aliases
// ============================================================================

/// Result type alias for LOWESS operations.
pub type Result<T> = result::Result<T, LowessError>;

// ============================================================================
// Defaults
// ============================================================================

/// Default span fraction.
pub const DEFAULT_FRACTION: f64 = 2.0 / 3.0;

/// Default number of estimation passes.
pub const DEFAULT_ITERATIONS: usize = 3;

/// Default worker count.
pub const DEFAULT_WORKERS: usize = 2;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for LOWESS smoothing.
///
/// Unset parameters fall back to the defaults when converted into an
/// adapter builder.
#[derive(Debug, Clone)]
pub struct LowessBuilder<T> {
    /// Span fraction `f` in (0, 1].
    pub fraction: Option<T>,

    /// Number of estimation passes (>= 1).
    pub iterations: Option<usize>,

    /// Worker count (>= 1).
    pub workers: Option<usize>,

    /// Parallel execution switch; `false` forces a single worker.
    pub parallel: Option<bool>,

    /// Include residuals in the result.
    pub return_residuals: bool,

    /// Include final robustness weights in the result.
    pub return_robustness_weights: bool,

    /// First parameter that was configured twice.
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for LowessBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> LowessBuilder<T> {
    /// Create a builder with every parameter unset.
    pub fn new() -> Self {
        Self {
            fraction: None,
            iterations: None,
            workers: None,
            parallel: None,
            return_residuals: false,
            return_robustness_weights: false,
            duplicate_param: None,
        }
    }

    /// Select the execution adapter.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: LowessAdapter<T>,
    {
        A::convert(self)
    }

    /// Set the span fraction (default 2/3).
    pub fn fraction(mut self, fraction: T) -> Self {
        if self.fraction.is_some() {
            self.duplicate_param = Some("fraction");
        }
        self.fraction = Some(fraction);
        self
    }

    /// Set the number of estimation passes (default 3).
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Set the worker count (default 2).
    pub fn workers(mut self, workers: usize) -> Self {
        if self.workers.is_some() {
            self.duplicate_param = Some("workers");
        }
        self.workers = Some(workers);
        self
    }

    /// Enable or disable parallel execution (default enabled).
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    /// Include residuals in the result.
    pub fn return_residuals(mut self) -> Self {
        self.return_residuals = true;
        self
    }

    /// Include final robustness weights in the result.
    pub fn return_robustness_weights(mut self) -> Self {
        self.return_robustness_weights = true;
        self
    }
}

// ============================================================================
// Adapter Conversion
// ============================================================================

/// Conversion from the generic builder into an execution builder.
pub trait LowessAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`LowessBuilder`] into a specialized execution builder.
    fn convert(builder: LowessBuilder<T>) -> Self::Output;
}

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

/// Marker type for batch adapter selection.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> LowessAdapter<T> for Batch {
    type Output = BatchLowessBuilder<T>;

    fn convert(builder: LowessBuilder<T>) -> Self::Output {
        let fraction = builder
            .fraction
            .unwrap_or_else(|| T::from(DEFAULT_FRACTION).unwrap_or_else(T::one));
        let parallel = builder.parallel.unwrap_or(true);
        let workers = if parallel {
            builder.workers.unwrap_or(DEFAULT_WORKERS)
        } else {
            1
        };

        BatchLowessBuilder {
            fraction,
            iterations: builder.iterations.unwrap_or(DEFAULT_ITERATIONS),
            workers,
            return_residuals: builder.return_residuals,
            return_robustness_weights: builder.return_robustness_weights,
            deferred_error: builder
                .duplicate_param
                .map(|parameter| LowessError::DuplicateParameter { parameter }),
        }
    }
}

// ============================================================================
// One-call API
// ============================================================================

/// Smooth `y` against `x` and return the smoothed values in input order.
///
/// # Parameters
///
/// * `x` - Independent variable values, in any order
/// * `y` - Dependent variable values (must have same length as x)
/// * `fraction` - Share of points inside each bandwidth, in (0, 1]
/// * `iterations` - Estimation passes, the first one unweighted (>= 1)
/// * `workers` - Threads in the per-call worker pool (>= 1)
///
/// # Returns
///
/// The smoothed y-values, one per input point, in the order of `x`.
///
/// # Errors
///
/// Invalid input (length mismatch, empty, not one-dimensional, non-finite)
/// and invalid parameters are reported as `Err`, never as a panic.
///
/// # Example
///
/// ```
/// use parLowess::smooth;
///
/// let x: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let fitted = smooth(&x, &y, 1.0, 1, 1).unwrap();
/// assert!((fitted[2] - 3.0).abs() < 1e-9);
/// ```
pub fn smooth<T, I1, I2>(
    x: &I1,
    y: &I2,
    fraction: T,
    iterations: usize,
    workers: usize,
) -> Result<Vec<T>>
where
    T: Float + Debug + Send + Sync,
    I1: LowessInput<T> + ?Sized,
    I2: LowessInput<T> + ?Sized,
{
    let model = LowessBuilder::new()
        .fraction(fraction)
        .iterations(iterations)
        .workers(workers)
        .adapter(Batch)
        .build()?;

    Ok(model.fit(x, y)?.into_smoothed())
}
