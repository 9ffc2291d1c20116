//! Span index finding for per-point neighborhoods.
//!
//! Converts each point's bandwidth into an inclusive index range over the
//! sorted x-values using a single forward scan with two pointers.
//!
//! The boundaries are deliberately asymmetric: the lower pointer skips
//! points at distance `>= h[i]`, the upper pointer pulls in points at
//! distance `< h[i]`. Changing either comparison changes which tied points
//! enter a fit.

use num_traits::Float;

use crate::primitives::errors::LowessError;

/// Inclusive span bounds `[start[i], stop[i]]` for every sorted point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanBounds {
    /// Lower inclusive bound per point.
    pub start: Vec<usize>,

    /// Upper inclusive bound per point.
    pub stop: Vec<usize>,
}

impl SpanBounds {
    /// Compute span bounds from sorted `x`, bandwidths `h` and the default
    /// span width `r` (in points).
    pub fn compute<T: Float>(x: &[T], h: &[T], r: usize) -> Result<Self, LowessError> {
        if let Some(index) = x.windows(2).position(|w| w[0] > w[1]) {
            return Err(LowessError::UnsortedInput { index });
        }
        debug_assert_eq!(x.len(), h.len(), "SpanBounds::compute: length mismatch");

        let n = x.len();
        let mut starts = Vec::with_capacity(n);
        let mut stops = Vec::with_capacity(n);

        let mut start = 0usize;
        let mut stop = r.min(n);

        for (i, (&xi, &hi)) in x.iter().zip(h).enumerate() {
            while start < i && (xi - x[start]).abs() >= hi {
                start += 1;
            }

            // Keep the span nonempty when h[i] collapses to zero
            stop = stop.max(i + 1);
            while stop < n && (xi - x[stop]).abs() < hi {
                stop += 1;
            }

            starts.push(start);
            stops.push(stop - 1);
        }

        Ok(Self {
            start: starts,
            stop: stops,
        })
    }

    /// Inclusive `(start, stop)` pair for point `i`.
    #[inline]
    pub fn bounds(&self, i: usize) -> (usize, usize) {
        (self.start[i], self.stop[i])
    }
}
