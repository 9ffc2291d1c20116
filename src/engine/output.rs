//! Output types for LOWESS smoothing.
//!
//! ## Purpose
//!
//! [`LowessResult`] packages the smoothed values together with the optional
//! per-point outputs and the parameters that produced them. Every vector is
//! in the caller's original input order.

use std::fmt::{Debug, Display, Formatter, Result};

use num_traits::Float;

// ============================================================================
// Result Structure
// ============================================================================

/// LOWESS output in original input order.
#[derive(Debug, Clone, PartialEq)]
pub struct LowessResult<T> {
    /// x-values (independent variable), as supplied.
    pub x: Vec<T>,

    /// Smoothed y-values.
    pub y: Vec<T>,

    /// Residuals from the final pass (`y_i - y_hat_i`).
    pub residuals: Option<Vec<T>>,

    /// Robustness weights derived from the final pass.
    pub robustness_weights: Option<Vec<T>>,

    /// Smoothing fraction used for the fit.
    pub fraction_used: T,

    /// Number of estimation passes performed.
    pub iterations_used: usize,

    /// Number of workers that executed the per-point maps.
    pub workers_used: usize,
}

impl<T: Float> LowessResult<T> {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the result holds no points.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Consume the result, keeping only the smoothed values.
    pub fn into_smoothed(self) -> Vec<T> {
        self.y
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for LowessResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.x.len())?;
        writeln!(f, "  Fraction:    {}", self.fraction_used)?;
        writeln!(f, "  Iterations:  {}", self.iterations_used)?;
        writeln!(f, "  Workers:     {}", self.workers_used)?;
        writeln!(f)?;

        writeln!(f, "Smoothed Data:")?;

        let has_resid = self.residuals.is_some();
        let has_weights = self.robustness_weights.is_some();

        write!(f, "{:>8} {:>12}", "X", "Y_smooth")?;
        if has_resid {
            write!(f, " {:>12}", "Residual")?;
        }
        if has_weights {
            write!(f, " {:>10}", "Rob_Weight")?;
        }
        writeln!(f)?;

        let line_width = 21 + if has_resid { 13 } else { 0 } + if has_weights { 11 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Show first 10 and last 10 rows if more than 20 points
        let n = self.x.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8.2} {:>12.6}", self.x[idx], self.y[idx])?;
            if let Some(resid) = &self.residuals {
                write!(f, " {:>12.6}", resid[idx])?;
            }
            if let Some(weights) = &self.robustness_weights {
                write!(f, " {:>10.4}", weights[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
