//! Layer 1: Primitives
//!
//! Error types, sorting with permutation bookkeeping, and span bounds.

/// Error types for LOWESS operations.
pub mod errors;

/// Sorting by x with forward and inverse permutations.
pub mod sorting;

/// Two-pointer span index finder.
pub mod span;
