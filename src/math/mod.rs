//! Layer 2: Math
//!
//! Kernel functions, adaptive bandwidths, and residual scale estimation.

/// Per-point adaptive bandwidths via order-statistic selection.
pub mod bandwidth;

/// Tricube distance kernel and biweight robustness kernel.
pub mod kernel;

/// Residual scale estimation with median/mean fallback.
pub mod scaling;
