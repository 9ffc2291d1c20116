//! Layer 4: Engine
//!
//! Validation, the scoped worker pool, the iteration driver, and result types.

/// Iteration driver over sorted data.
pub mod executor;

/// Result packaging.
pub mod output;

/// Scoped worker pool.
pub mod pool;

/// Input and parameter validation.
pub mod validator;
