//! Input abstraction for LOWESS inputs.
//!
//! This module defines the `LowessInput` trait which allows the `fit` method
//! to accept standard slices, vectors and ndarray arrays interchangeably.
//!
//! Arrays of any dimensionality are accepted as long as they are effectively
//! one-dimensional: at most one axis may be longer than one. Shapes such as
//! `(1, n)` or `(n, 1, 1)` are flattened; `(2, 3)` is rejected.

use std::borrow::Cow;

use ndarray::{ArrayBase, Data, Dimension};
use num_traits::Float;

use crate::primitives::errors::LowessError;

/// Trait for types that can be used as input for LOWESS smoothing.
pub trait LowessInput<T: Float> {
    /// Flatten the input to a one-dimensional sequence.
    ///
    /// `name` identifies the argument in error messages.
    ///
    /// # Errors
    ///
    /// * `LowessError::NotOneDimensional` - More than one axis has length > 1.
    fn as_lowess_values(&self, name: &'static str) -> Result<Cow<'_, [T]>, LowessError>;
}

impl<T: Float> LowessInput<T> for [T] {
    fn as_lowess_values(&self, _name: &'static str) -> Result<Cow<'_, [T]>, LowessError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: Float> LowessInput<T> for Vec<T> {
    fn as_lowess_values(&self, _name: &'static str) -> Result<Cow<'_, [T]>, LowessError> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<T: Float, const N: usize> LowessInput<T> for [T; N] {
    fn as_lowess_values(&self, _name: &'static str) -> Result<Cow<'_, [T]>, LowessError> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<T: Float, S, D> LowessInput<T> for ArrayBase<S, D>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    fn as_lowess_values(&self, name: &'static str) -> Result<Cow<'_, [T]>, LowessError> {
        let non_unit_axes = self.shape().iter().filter(|&&len| len > 1).count();
        if non_unit_axes > 1 {
            return Err(LowessError::NotOneDimensional {
                name,
                shape: self.shape().to_vec(),
            });
        }

        // With a single non-unit axis logical order is the only order
        match self.as_slice() {
            Some(slice) => Ok(Cow::Borrowed(slice)),
            None => Ok(Cow::Owned(self.iter().copied().collect())),
        }
    }
}
