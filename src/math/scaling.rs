//! Residual scale estimation.
//!
//! ## Purpose
//!
//! Computes the scale `s` that normalizes residuals before the biweight
//! transform. The primary estimate is the median absolute residual.
//!
//! ## Fallback chain
//!
//! 1. `s = median(|r|)`
//! 2. if `s == 0`: `s = mean(|r|)`
//! 3. if still `0`: no scale exists and the caller zeroes every weight
//!
//! The median is computed in O(n) average time with quickselect.

use std::cmp::Ordering::Equal;

use num_traits::Float;

/// Outcome of scale estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResidualScale<T> {
    /// Median absolute residual (positive).
    Median(T),

    /// Mean absolute residual, used when the median collapsed to zero.
    Mean(T),

    /// All residuals are exactly zero.
    Collapsed,
}

impl<T: Float> ResidualScale<T> {
    /// Estimate the scale of `residuals`, using `scratch` (same length) as
    /// working storage.
    pub fn estimate(residuals: &[T], scratch: &mut [T]) -> Self {
        if residuals.is_empty() {
            return Self::Collapsed;
        }

        for (s, &r) in scratch.iter_mut().zip(residuals) {
            *s = r.abs();
        }

        let median = median_inplace(scratch);
        if median != T::zero() {
            return Self::Median(median);
        }

        let n = T::from(residuals.len()).unwrap_or_else(T::one);
        let mean = residuals.iter().fold(T::zero(), |acc, &r| acc + r.abs()) / n;
        if mean != T::zero() {
            Self::Mean(mean)
        } else {
            Self::Collapsed
        }
    }

    /// The scale value, or `None` when collapsed.
    pub fn value(&self) -> Option<T> {
        match *self {
            Self::Median(s) | Self::Mean(s) => Some(s),
            Self::Collapsed => None,
        }
    }
}

/// Median of `vals` computed in place with quickselect.
///
/// Even lengths average the two middle values.
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return upper;
    }

    // After selection the lower half holds the smaller values; take its max
    let lower = vals[..mid]
        .iter()
        .copied()
        .fold(T::neg_infinity(), T::max);
    (lower + upper) / (T::one() + T::one())
}
