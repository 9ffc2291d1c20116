//! Input and parameter validation.
//!
//! Parameters are checked once at `build()`. Inputs are checked at `fit()`,
//! after they have been flattened to one-dimensional slices.

use num_traits::Float;

use crate::primitives::errors::LowessError;

/// Validate smoothing parameters.
pub fn validate_params<T: Float>(
    fraction: T,
    iterations: usize,
    workers: usize,
) -> Result<(), LowessError> {
    if !(fraction > T::zero() && fraction <= T::one()) {
        return Err(LowessError::InvalidFraction(
            fraction.to_f64().unwrap_or(f64::NAN),
        ));
    }
    if iterations == 0 {
        return Err(LowessError::InvalidIterations(iterations));
    }
    if workers == 0 {
        return Err(LowessError::InvalidWorkers(workers));
    }
    Ok(())
}

/// Validate paired input slices.
pub fn validate_inputs<T: Float>(x: &[T], y: &[T]) -> Result<(), LowessError> {
    if x.len() != y.len() {
        return Err(LowessError::MismatchedInputs {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(LowessError::EmptyInput);
    }

    check_finite(x, "x")?;
    check_finite(y, "y")
}

fn check_finite<T: Float>(values: &[T], name: &str) -> Result<(), LowessError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(LowessError::InvalidNumericValue(format!(
            "{name}[{i}] is not finite"
        ))),
        None => Ok(()),
    }
}
