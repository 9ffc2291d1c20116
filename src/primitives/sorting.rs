//! Sorting utilities for LOWESS input data.
//!
//! ## Purpose
//!
//! This module sorts input data by x-coordinates and maps results back to
//! the caller's original order.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting so equal x-values keep their input order.
//! * **Inverse only**: The forward permutation is consumed while gathering y;
//!   only its inverse is kept for unsorting.
//!
//! ## Key concepts
//!
//! ### Sort-Process-Unsort Pattern
//! 1. **Sort**: Input data is sorted by x-coordinates, creating an index mapping.
//! 2. **Process**: The engine operates on the sorted sequence.
//! 3. **Unsort**: Results are gathered back through the inverse permutation.
//!
//! ## Invariants
//!
//! * Sorted x-values are non-decreasing.
//! * `inverse` is a permutation of `0..n`.

use std::cmp::Ordering;

use num_traits::Float;

// ============================================================================
// Data Structures
// ============================================================================

/// Result of sorting input data by x-coordinates.
#[derive(Debug, Clone)]
pub struct SortedData<T> {
    /// Sorted x-coordinates.
    pub x: Vec<T>,

    /// Y-coordinates reordered to match sorted x-coordinates.
    pub y: Vec<T>,

    /// Inverse mapping where `inverse[original_pos] = sorted_pos`.
    pub inverse: Vec<usize>,
}

impl<T: Float> SortedData<T> {
    /// Restore a sorted-order vector to the original input order.
    pub fn unsort(&self, sorted_values: &[T]) -> Vec<T> {
        unsort(sorted_values, &self.inverse)
    }
}

// ============================================================================
// Sorting Functions
// ============================================================================

/// Sort input data by x-coordinates in ascending order.
///
/// Already-sorted input takes a fast path with identity permutations.
pub fn sort_by_x<T: Float>(x: &[T], y: &[T]) -> SortedData<T> {
    let n = x.len();

    if x.windows(2).all(|w| w[0] <= w[1]) {
        return SortedData {
            x: x.to_vec(),
            y: y.to_vec(),
            inverse: (0..n).collect(),
        };
    }

    // Only x and the index travel through the sort; y is gathered afterwards
    let mut pairs: Vec<(T, usize)> = x.iter().enumerate().map(|(i, &xi)| (xi, i)).collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let indices: Vec<usize> = pairs.iter().map(|p| p.1).collect();
    let mut inverse = vec![0; n];
    for (sorted_pos, &orig_pos) in indices.iter().enumerate() {
        inverse[orig_pos] = sorted_pos;
    }

    SortedData {
        x: pairs.iter().map(|p| p.0).collect(),
        y: indices.iter().map(|&i| y[i]).collect(),
        inverse,
    }
}

/// Gather sorted values back into original order through the inverse permutation.
#[inline]
pub fn unsort<T: Float>(sorted_values: &[T], inverse: &[usize]) -> Vec<T> {
    inverse.iter().map(|&pos| sorted_values[pos]).collect()
}
