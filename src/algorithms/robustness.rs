//! Robustness weight computation for outlier downweighting.
//!
//! ## Purpose
//!
//! After each fitting pass, residuals are turned into per-point weights in
//! `[0, 1]` that downweight outliers in the next pass (Cleveland, 1979).
//!
//! ## Key concepts
//!
//! * **Bisquare**: `delta_i = (1 - u_i^2)^2` with `u_i = clamp(r_i / (6 s), -1, 1)`.
//! * **Scale**: `s` comes from [`ResidualScale`], which falls back from the
//!   median to the mean absolute residual.
//! * **Collapse**: when every residual is exactly zero all weights become
//!   zero, so later passes keep their previous estimates.
//!
//! ## Invariants
//!
//! * Robustness weights are in [0, 1].
//! * `residuals`, `weights` and `scratch` share one length.

use num_traits::Float;

use crate::math::kernel::biweight;
use crate::math::scaling::ResidualScale;

/// Bisquare tuning constant applied to the residual scale.
pub const BISQUARE_C: f64 = 6.0;

/// Compute residuals `y - yest` into `out`.
#[inline]
pub fn compute_residuals<T: Float>(y: &[T], yest: &[T], out: &mut [T]) {
    for ((r, &yi), &ei) in out.iter_mut().zip(y).zip(yest) {
        *r = yi - ei;
    }
}

/// Overwrite `weights` with bisquare robustness weights for `residuals`.
///
/// Returns the scale estimate that was used.
pub fn update_robustness_weights<T: Float>(
    residuals: &[T],
    weights: &mut [T],
    scratch: &mut [T],
) -> ResidualScale<T> {
    let scale = ResidualScale::estimate(residuals, scratch);

    match scale.value() {
        Some(s) => {
            let c = T::from(BISQUARE_C).unwrap_or_else(T::one);
            let cmad = c * s;
            for (w, &r) in weights.iter_mut().zip(residuals) {
                *w = biweight(r / cmad);
            }
        }
        None => weights.fill(T::zero()),
    }

    scale
}
