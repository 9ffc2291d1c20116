//! Layer 5: Adapters
//!
//! Execution adapters. Only the in-memory batch adapter is provided.

/// Batch (in-memory) adapter.
pub mod batch;
