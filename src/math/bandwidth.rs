//! Adaptive bandwidth selection.
//!
//! ## Purpose
//!
//! Each point gets its own smoothing radius: the distance from that point to
//! its r-th nearest neighbor along the x axis, with r = ceil(f * n).
//!
//! ## Design notes
//!
//! * Uses quickselect (`select_nth_unstable_by`) instead of a full sort.
//! * The caller provides a scratch buffer so a worker can reuse one
//!   allocation across many points.
//! * Every index is independent, so the computation maps cleanly over a
//!   worker pool.
//!
//! ## Invariants
//!
//! * Returned bandwidths are non-negative.
//! * The order-statistic index never exceeds `n - 1`.

use std::cmp::Ordering;

use num_traits::Float;

/// Number of neighbors spanned by fraction `f` of `n` points: `ceil(f * n)`.
#[inline]
pub fn neighbor_count<T: Float>(n: usize, fraction: T) -> usize {
    let n_t = T::from(n).unwrap_or_else(T::max_value);
    (fraction * n_t).ceil().to_usize().unwrap_or(n)
}

/// Distance from `x[i]` to its `r`-th nearest neighbor (zero-based, so the
/// point itself counts as the nearest at distance 0).
///
/// `scratch` must have the same length as `x`; its contents are overwritten.
#[inline]
pub fn bandwidth_at<T: Float>(x: &[T], i: usize, r: usize, scratch: &mut [T]) -> T {
    debug_assert_eq!(x.len(), scratch.len(), "bandwidth_at: scratch length");
    let n = x.len();
    if n == 0 {
        return T::zero();
    }

    let xi = x[i];
    for (d, &xj) in scratch.iter_mut().zip(x) {
        *d = (xj - xi).abs();
    }

    let k = r.min(n - 1);
    let (_, kth, _) =
        scratch.select_nth_unstable_by(k, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    *kth
}
