//! Layer 3: Algorithms
//!
//! Local weighted regression and robustness reweighting.

/// Weighted local linear regression over a span.
pub mod regression;

/// Residual-based robustness weights.
pub mod robustness;
