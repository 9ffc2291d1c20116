//! Error types for LOWESS operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while smoothing:
//! input validation, parameter constraints, and worker pool setup.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Soft failure**: Invalid input is reported as a value, never as a panic.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty arrays, mismatched lengths, non-1-D shapes, non-finite values.
//! 2. **Parameter validation**: Invalid fraction, iteration count, or worker count.
//! 3. **Execution**: Failure to build the scoped worker pool.
//!
//! Numerical degeneracy (singular local fits, collapsed residual scale) is
//! not an error and never surfaces here.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for LOWESS operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LowessError {
    /// Input arrays are empty.
    EmptyInput,

    /// `x` and `y` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `x` array.
        x_len: usize,
        /// Number of elements in the `y` array.
        y_len: usize,
    },

    /// An array input has more than one axis with length greater than one.
    NotOneDimensional {
        /// Which argument was rejected (`"x"` or `"y"`).
        name: &'static str,
        /// Shape of the rejected array.
        shape: Vec<usize>,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Span computation requires x sorted in ascending order.
    UnsortedInput {
        /// First index `i` where `x[i] > x[i + 1]`.
        index: usize,
    },

    /// Smoothing fraction must be in the range (0, 1].
    InvalidFraction(f64),

    /// At least one iteration (the initial fit) is required.
    InvalidIterations(usize),

    /// At least one worker is required.
    InvalidWorkers(usize),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// The scoped worker pool could not be created.
    ThreadPool(String),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for LowessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::NotOneDimensional { name, shape } => {
                write!(
                    f,
                    "Input '{name}' with shape {shape:?} is not one-dimensional"
                )
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::UnsortedInput { index } => {
                write!(f, "x must be sorted ascending (violated at index {index})")
            }
            Self::InvalidFraction(frac) => {
                write!(f, "Invalid fraction: {frac} (must be > 0 and <= 1)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be >= 1)")
            }
            Self::InvalidWorkers(workers) => {
                write!(f, "Invalid workers: {workers} (must be >= 1)")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::ThreadPool(msg) => write!(f, "Failed to build worker pool: {msg}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for LowessError {}
