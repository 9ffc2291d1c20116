//! # parLowess — Parallel Robust LOWESS Smoothing
//!
//! A LOWESS smoother with per-point adaptive bandwidths, iterative
//! robustness reweighting and a scoped worker pool built on rayon. Inputs
//! may be slices, vectors or ndarray arrays.
//!
//! ## What is LOWESS?
//!
//! LOWESS (Locally Weighted Scatterplot Smoothing) fits, at every point, a
//! weighted straight line through the neighboring points and takes the
//! line's value at that point as the smoothed estimate. Neighbors are
//! weighted by the tricube of their scaled distance; after each pass,
//! points with large residuals are downweighted with the bisquare
//! (biweight) function and the fits are repeated.
//!
//! **How this crate computes a fit:**
//!
//! 1. Sort the data by x, remembering the permutation.
//! 2. For each point, the bandwidth `h[i]` is the distance to its r-th
//!    nearest neighbor, `r = ceil(f * n)` (parallel).
//! 3. A two-pointer scan turns bandwidths into index spans.
//! 4. Each point gets a weighted linear fit over its span (parallel).
//! 5. Residuals give a scale `s = median(|r|)` and new weights
//!    `(1 - (r / 6s)^2)^2`; steps 4-5 repeat for the configured iterations.
//! 6. Results are returned in the caller's original order.
//!
//! ## Quick Start
//!
//! ```rust
//! use parLowess::prelude::*;
//!
//! let x: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let y: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! let model = Lowess::new()
//!     .fraction(1.0)      // Every fit spans the whole data set
//!     .iterations(1)      // Single, unweighted pass
//!     .workers(1)         // Sequential
//!     .adapter(Batch)
//!     .build()
//!     .unwrap();
//!
//! let result = model.fit(&x, &y).unwrap();
//! for (fitted, expected) in result.y.iter().zip(&y) {
//!     assert!((fitted - expected).abs() < 1e-9);
//! }
//! ```
//!
//! ### One-call API
//!
//! ```rust
//! use parLowess::smooth;
//!
//! let x: [f64; 5] = [3.0, 1.0, 2.0, 5.0, 4.0];
//! let y: [f64; 5] = [3.0, 1.0, 2.0, 5.0, 4.0];
//!
//! // Output follows the input order, not the sorted order
//! let fitted = smooth(&x, &y, 1.0, 3, 2).unwrap();
//! assert!((fitted[0] - 3.0).abs() < 1e-9);
//!
//! // Invalid input is an error value, never a panic
//! assert!(smooth(&[1.0, 2.0], &[1.0], 1.0, 3, 2).is_err());
//! ```
//!
//! ### ndarray Usage
//!
//! ```rust
//! use parLowess::prelude::*;
//! use ndarray::{Array1, Array2};
//!
//! let x: Array1<f64> = Array1::linspace(0.0, 9.0, 10);
//! let y: Array2<f64> = Array2::from_shape_fn((1, 10), |(_, j)| 2.0 * j as f64);
//!
//! // A (1, n) array is effectively one-dimensional
//! let result = Lowess::new().adapter(Batch).build().unwrap().fit(&x, &y).unwrap();
//! assert_eq!(result.y.len(), 10);
//!
//! // A (2, 5) array is not
//! let bad: Array2<f64> = Array2::zeros((2, 5));
//! let err = Lowess::new().adapter(Batch).build().unwrap().fit(&x, &bad);
//! assert!(matches!(err, Err(LowessError::NotOneDimensional { .. })));
//! ```
//!
//! ## Parameters
//!
//! | Parameter                     | Default | Range      | Description                                   |
//! |-------------------------------|---------|------------|-----------------------------------------------|
//! | **fraction**                  | 2/3     | (0, 1]     | Share of points within each bandwidth         |
//! | **iterations**                | 3       | >= 1       | Estimation passes, the first one unweighted   |
//! | **workers**                   | 2       | >= 1       | Threads in the per-call worker pool           |
//! | **parallel**                  | true    | true/false | `false` forces a single worker                |
//! | **return_residuals**          | false   | true/false | Include final residuals in output             |
//! | **return_robustness_weights** | false   | true/false | Include final robustness weights in output    |
//!
//! ## Parallel Execution
//!
//! A rayon pool with `workers` threads is created at the start of every
//! `fit` call and dropped when the call returns. Bandwidths are computed
//! in one parallel map; each iteration runs one more parallel map for the
//! local fits, followed by the residual/weight update on the calling
//! thread. The worker count never changes the numerical result.
//!
//! ## Numerical Edge Cases
//!
//! * A span with fewer than two distinct `(x, weight)` pairs, or a singular
//!   local fit, keeps the point's previous estimate (its y-value before the
//!   first pass).
//! * If the median absolute residual is zero the mean absolute residual is
//!   used; if that is zero too, all robustness weights become zero.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result`], an alias for
//! `std::result::Result<T, LowessError>`. See [`LowessError`] for the
//! variants.
//!
//! ## Dependencies
//!
//! - `rayon` - Worker pool and parallel maps
//! - `ndarray` - Array support
//! - `num-traits` - Numeric traits
//! - `log` - Diagnostic logging
//!
//! ## References
//!
//! - Cleveland, W. S. (1979). "Robust Locally Weighted Regression and Smoothing Scatterplots"

#![allow(non_snake_case)]
#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - errors, sorting, span bounds.
mod primitives;

// Layer 2: Math - kernels, bandwidths, residual scale.
mod math;

// Layer 3: Algorithms - local regression and robustness weights.
mod algorithms;

// Layer 4: Engine - worker pool, executor, validation, output.
mod engine;

// Layer 5: Adapters - batch execution.
mod adapters;

// High-level fluent API for LOWESS smoothing.
mod api;

// Input abstraction for ndarray/slice compatibility.
mod input;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use crate::adapters::batch::{BatchLowess, BatchLowessBuilder};
pub use crate::api::{
    smooth, Adapter, LowessAdapter, LowessBuilder as Lowess, LowessError, LowessResult, Result,
    DEFAULT_FRACTION, DEFAULT_ITERATIONS, DEFAULT_WORKERS,
};
pub use crate::input::LowessInput;

// ============================================================================
// Prelude
// ============================================================================

/// Standard parLowess prelude.
///
/// ```
/// use parLowess::prelude::*;
/// ```
///
/// This imports:
/// - `Lowess` - The main builder
/// - `Batch` - Adapter marker
/// - `LowessResult`, `LowessError`, `Result` - Result types
/// - `smooth` - One-call API
pub mod prelude {
    pub use crate::api::{
        smooth, Adapter::Batch, LowessBuilder as Lowess, LowessError, LowessResult, Result,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// Only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
#[cfg(feature = "dev")]
pub mod internals {
    /// Errors, sorting and span bounds.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Kernels, bandwidths and scale estimation.
    pub mod math {
        pub use crate::math::*;
    }
    /// Local regression and robustness weights.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Worker pool and executor.
    pub mod engine {
        pub use crate::engine::*;
    }
}
