//! Kernel functions for distance and robustness weighting.
//!
//! ## Key concepts
//!
//! * **Tricube**: `(1 - |u|^3)^3` for `|u| <= 1`, else 0. Used for distance
//!   weights inside a span, with `u = |x_j - x_i| / h_i`.
//! * **Biweight**: `(1 - u^2)^2` for `|u| <= 1`, else 0. Used for robustness
//!   weights, with `u = residual / (6 * s)`.
//!
//! Both inputs are clamped to `[-1, 1]` before transformation, so both
//! kernels return values in `[0, 1]`.

use num_traits::Float;

/// Tricube transform of a scaled distance.
#[inline]
pub fn tricube<T: Float>(u: T) -> T {
    let u = u.abs().min(T::one());
    let tmp = T::one() - u * u * u;
    tmp * tmp * tmp
}

/// Biweight (bisquare) transform of a scaled residual.
#[inline]
pub fn biweight<T: Float>(u: T) -> T {
    let u = u.max(-T::one()).min(T::one());
    let tmp = T::one() - u * u;
    tmp * tmp
}

/// Tricube distance weight of a point at `distance` from the focal point
/// with bandwidth `h`.
///
/// A zero bandwidth keeps only points that coincide with the focal point.
#[inline]
pub fn distance_weight<T: Float>(distance: T, h: T) -> T {
    if h > T::zero() {
        tricube(distance / h)
    } else if distance == T::zero() {
        T::one()
    } else {
        T::zero()
    }
}
