//! Local weighted linear regression.
//!
//! ## Purpose
//!
//! For a single sorted point `i`, fits a weighted straight line over the
//! points of its span and evaluates the line at `x[i]`. Weights are the
//! tricube distance weight times the current robustness weight.
//!
//! ## Design notes
//!
//! * All shared inputs travel in an immutable [`IterationContext`], built
//!   once per phase and borrowed by every worker.
//! * Sums are accumulated on `x - x[i]`, so the fitted intercept is the
//!   estimate itself.
//! * No allocation per point.
//!
//! ## Degenerate fits
//!
//! A fit is skipped and the previous estimate is returned when:
//! * at most one distinct `(x, delta)` pair with nonzero `delta` remains, or
//! * the weighted normal equations are singular.

use num_traits::Float;

use crate::math::kernel::distance_weight;
use crate::primitives::span::SpanBounds;

/// Robustness weights at or below this magnitude count as zero.
const ZERO_WEIGHT_TOL: f64 = 1e-8;

// ============================================================================
// Iteration Context
// ============================================================================

/// Read-only state shared by every worker during one estimation phase.
#[derive(Debug, Clone, Copy)]
pub struct IterationContext<'a, T> {
    /// Sorted x-values.
    pub x: &'a [T],

    /// y-values in sorted-x order.
    pub y: &'a [T],

    /// Per-point bandwidths.
    pub h: &'a [T],

    /// Per-point span bounds.
    pub spans: &'a SpanBounds,

    /// Robustness weights from the previous iteration.
    pub delta: &'a [T],

    /// Estimates from the previous iteration (y itself before the first).
    pub previous: &'a [T],
}

impl<T: Float> IterationContext<'_, T> {
    /// Robust local estimate at sorted index `i`.
    pub fn estimate(&self, i: usize) -> T {
        let (start, stop) = self.spans.bounds(i);
        let x_span = &self.x[start..=stop];
        let y_span = &self.y[start..=stop];
        let delta_span = &self.delta[start..=stop];

        if !has_informative_pairs(x_span, delta_span) {
            return self.previous[i];
        }

        let x_i = self.x[i];
        let h_i = self.h[i];

        let mut sums = WlsSums::default();
        for ((&xj, &yj), &dj) in x_span.iter().zip(y_span).zip(delta_span) {
            let w = dj * distance_weight((xj - x_i).abs(), h_i);
            sums.push(xj - x_i, yj, w);
        }

        sums.solve_at_origin().unwrap_or(self.previous[i])
    }
}

// ============================================================================
// Weighted Least Squares
// ============================================================================

/// Running sums of the 2x2 weighted normal equations.
#[derive(Debug, Clone, Copy)]
struct WlsSums<T> {
    w: T,
    wu: T,
    wy: T,
    wuu: T,
    wuy: T,
}

impl<T: Float> Default for WlsSums<T> {
    fn default() -> Self {
        Self {
            w: T::zero(),
            wu: T::zero(),
            wy: T::zero(),
            wuu: T::zero(),
            wuy: T::zero(),
        }
    }
}

impl<T: Float> WlsSums<T> {
    #[inline]
    fn push(&mut self, u: T, y: T, w: T) {
        let wu = w * u;
        self.w = self.w + w;
        self.wu = self.wu + wu;
        self.wy = self.wy + w * y;
        self.wuu = self.wuu + wu * u;
        self.wuy = self.wuy + wu * y;
    }

    /// Solve for intercept and slope and evaluate the line at `u = 0`.
    ///
    /// Returns `None` when the system is singular.
    #[inline]
    fn solve_at_origin(&self) -> Option<T> {
        if self.w <= T::zero() {
            return None;
        }

        let u_mean = self.wu / self.w;
        let y_mean = self.wy / self.w;
        let variance = self.wuu - self.wu * u_mean;

        if variance <= T::epsilon() * self.wuu {
            return None;
        }

        let covariance = self.wuy - self.wu * y_mean;
        let slope = covariance / variance;
        Some(y_mean - slope * u_mean)
    }
}

/// Whether the span still holds at least two distinct `(x, delta)` pairs
/// with nonzero robustness weight.
fn has_informative_pairs<T: Float>(x_span: &[T], delta_span: &[T]) -> bool {
    let tol = T::from(ZERO_WEIGHT_TOL).unwrap_or_else(T::epsilon);
    let mut first: Option<(T, T)> = None;

    for (&xj, &dj) in x_span.iter().zip(delta_span) {
        if dj.abs() <= tol {
            continue;
        }
        match first {
            None => first = Some((xj, dj)),
            Some((x0, d0)) if xj != x0 || dj != d0 => return true,
            Some(_) => {}
        }
    }

    false
}
