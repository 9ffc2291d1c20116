#![cfg(feature = "dev")]
//! Tests for the internal building blocks.
//!
//! ## Test Organization
//!
//! 1. **Sorting** - Permutations and unsorting
//! 2. **Bandwidths** - Order-statistic selection
//! 3. **Spans** - Two-pointer bounds and tie handling
//! 4. **Kernels and Scale** - Tricube, biweight, median/mean fallback
//! 5. **Regression** - Local fits and degenerate spans
//! 6. **Worker Pool** - Sizing, ordered maps and task failure
//! 7. **Executor** - End-to-end over sorted data

use std::panic::{self, AssertUnwindSafe};

use approx::assert_abs_diff_eq;

use parLowess::internals::algorithms::regression::IterationContext;
use parLowess::internals::algorithms::robustness::{
    compute_residuals, update_robustness_weights,
};
use parLowess::internals::engine::executor::LowessExecutor;
use parLowess::internals::engine::pool::WorkerPool;
use parLowess::internals::math::bandwidth::{bandwidth_at, neighbor_count};
use parLowess::internals::math::kernel::{biweight, distance_weight, tricube};
use parLowess::internals::math::scaling::{median_inplace, ResidualScale};
use parLowess::internals::primitives::errors::LowessError;
use parLowess::internals::primitives::sorting::{sort_by_x, unsort};
use parLowess::internals::primitives::span::SpanBounds;

fn bandwidths(x: &[f64], r: usize) -> Vec<f64> {
    let mut scratch = vec![0.0; x.len()];
    (0..x.len())
        .map(|i| bandwidth_at(x, i, r, &mut scratch))
        .collect()
}

// ============================================================================
// Sorting Tests
// ============================================================================

/// Sorting reorders both coordinates and unsorting restores the input.
#[test]
fn test_sort_permutations() {
    let x = vec![3.0, 1.0, 4.0, 2.0];
    let y = vec![30.0, 10.0, 40.0, 20.0];

    let sorted = sort_by_x(&x, &y);

    assert_eq!(sorted.x, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(sorted.y, vec![10.0, 20.0, 30.0, 40.0]);
    assert_eq!(sorted.inverse, vec![2, 0, 3, 1]);
    assert_eq!(sorted.unsort(&sorted.y), y);
}

/// Equal x-values keep their input order.
#[test]
fn test_sort_stable_ties() {
    let x = vec![2.0, 1.0, 2.0, 1.0];
    let y = vec![0.0, 1.0, 2.0, 3.0];

    let sorted = sort_by_x(&x, &y);

    assert_eq!(sorted.inverse, vec![2, 0, 3, 1]);
    assert_eq!(sorted.y, vec![1.0, 3.0, 0.0, 2.0]);
}

/// Already-sorted data takes the identity permutation.
#[test]
fn test_sort_presorted() {
    let x = vec![1.0, 1.0, 2.0];
    let sorted = sort_by_x(&x, &x);
    assert_eq!(sorted.inverse, vec![0, 1, 2]);
    assert_eq!(unsort(&[7.0, 8.0, 9.0], &sorted.inverse), vec![7.0, 8.0, 9.0]);
}

// ============================================================================
// Bandwidth Tests
// ============================================================================

/// Neighbor count rounds up.
#[test]
fn test_neighbor_count() {
    assert_eq!(neighbor_count(5, 1.0), 5);
    assert_eq!(neighbor_count(6, 2.0 / 3.0), 4);
    assert_eq!(neighbor_count(10, 0.25), 3);
    assert_eq!(neighbor_count(1, 2.0 / 3.0), 1);
}

/// The point itself is the zeroth neighbor.
#[test]
fn test_bandwidth_nearest_other() {
    let x = vec![1.0, 2.0, 4.0, 8.0];
    assert_eq!(bandwidths(&x, 1), vec![1.0, 1.0, 2.0, 4.0]);
}

/// Full span selects the farthest point instead of overrunning.
#[test]
fn test_bandwidth_full_span() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(bandwidths(&x, 5), vec![4.0, 3.0, 2.0, 3.0, 4.0]);
    assert_eq!(bandwidths(&x, 50), vec![4.0, 3.0, 2.0, 3.0, 4.0]);
}

/// Duplicates can collapse a bandwidth to zero.
#[test]
fn test_bandwidth_duplicates() {
    let x = vec![1.0, 1.0, 1.0, 5.0];
    assert_eq!(bandwidths(&x, 1), vec![0.0, 0.0, 0.0, 4.0]);
}

// ============================================================================
// Span Tests
// ============================================================================

/// Span bounds for evenly spaced data with a full span.
#[test]
fn test_span_full() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let h = bandwidths(&x, 5);

    let spans = SpanBounds::compute(&x, &h, 5).unwrap();

    // Points at exactly h are excluded from the low side only
    assert_eq!(spans.start, vec![0, 0, 1, 1, 1]);
    assert_eq!(spans.stop, vec![4, 4, 4, 4, 4]);
}

/// Ties at the bandwidth boundary follow the asymmetric rule.
#[test]
fn test_span_ties() {
    let x = vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
    let r = neighbor_count(6, 2.0 / 3.0);
    let h = bandwidths(&x, r);
    assert_eq!(h, vec![2.0, 2.0, 1.0, 1.0, 2.0, 2.0]);

    let spans = SpanBounds::compute(&x, &h, r).unwrap();

    assert_eq!(spans.start, vec![0, 0, 2, 2, 2, 2]);
    assert_eq!(spans.stop, vec![3, 3, 3, 3, 5, 5]);
}

/// Zero bandwidths still yield nonempty spans containing the point.
#[test]
fn test_span_zero_bandwidth() {
    let x = vec![1.0, 1.0, 1.0, 5.0];
    let h = bandwidths(&x, 1);

    let spans = SpanBounds::compute(&x, &h, 1).unwrap();

    for i in 0..x.len() {
        let (start, stop) = spans.bounds(i);
        assert!(start <= i && i <= stop);
    }
}

/// Bounds are monotone and ordered on irregular data.
#[test]
fn test_span_monotone() {
    let x: Vec<f64> = (0..200)
        .map(|i| {
            let t = i as f64;
            t + 0.8 * (t * 0.37).sin()
        })
        .collect();
    let mut x = x;
    x.sort_by(|a, b| a.partial_cmp(b).unwrap());

    for fraction in [0.05, 0.2, 2.0 / 3.0, 1.0] {
        let r = neighbor_count(x.len(), fraction);
        let h = bandwidths(&x, r);
        let spans = SpanBounds::compute(&x, &h, r).unwrap();

        assert_eq!(spans.len(), x.len());
        for i in 0..x.len() {
            assert!(spans.start[i] <= spans.stop[i]);
            assert!(spans.stop[i] < x.len());
            if i > 0 {
                assert!(spans.start[i] >= spans.start[i - 1]);
                assert!(spans.stop[i] >= spans.stop[i - 1]);
            }
        }
    }
}

/// Unsorted x is rejected.
#[test]
fn test_span_unsorted() {
    let x = vec![1.0, 3.0, 2.0];
    let h = vec![1.0; 3];
    assert_eq!(
        SpanBounds::compute(&x, &h, 2),
        Err(LowessError::UnsortedInput { index: 1 })
    );
}

// ============================================================================
// Kernel and Scale Tests
// ============================================================================

/// Kernel values at known points.
#[test]
fn test_kernels() {
    assert_abs_diff_eq!(tricube(0.0), 1.0);
    assert_abs_diff_eq!(tricube(0.5), (1.0f64 - 0.125).powi(3), epsilon = 1e-15);
    assert_abs_diff_eq!(tricube(1.0), 0.0);
    assert_abs_diff_eq!(tricube(3.0), 0.0);

    assert_abs_diff_eq!(biweight(0.0), 1.0);
    assert_abs_diff_eq!(biweight(-0.5), 0.5625, epsilon = 1e-15);
    assert_abs_diff_eq!(biweight(2.0), 0.0);

    assert_abs_diff_eq!(distance_weight(0.0, 0.0), 1.0);
    assert_abs_diff_eq!(distance_weight(1.0, 0.0), 0.0);
    assert_abs_diff_eq!(distance_weight(2.0, 2.0), 0.0);
}

/// Median for odd and even lengths.
#[test]
fn test_median() {
    assert_eq!(median_inplace(&mut [3.0, 1.0, 2.0]), 2.0);
    assert_eq!(median_inplace(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
    assert_eq!(median_inplace::<f64>(&mut []), 0.0);
}

/// Scale estimation falls back from median to mean to collapse.
#[test]
fn test_scale_fallback() {
    let mut scratch = vec![0.0; 5];

    assert_eq!(
        ResidualScale::estimate(&[1.0, -2.0, 3.0, -4.0, 5.0], &mut scratch),
        ResidualScale::Median(3.0)
    );

    match ResidualScale::estimate(&[0.0, 0.0, 0.0, 1.0, -2.0], &mut scratch) {
        ResidualScale::Mean(s) => assert_abs_diff_eq!(s, 0.6, epsilon = 1e-15),
        other => panic!("expected mean fallback, got {other:?}"),
    }

    assert_eq!(
        ResidualScale::estimate(&[0.0; 5], &mut scratch),
        ResidualScale::Collapsed
    );
}

/// Robustness weights follow the bisquare of residual / 6s.
#[test]
fn test_robustness_weights() {
    let residuals = vec![1.0, -1.0, 1.0, -1.0, 100.0];
    let mut weights = vec![1.0; 5];
    let mut scratch = vec![0.0; 5];

    let scale = update_robustness_weights(&residuals, &mut weights, &mut scratch);

    assert_eq!(scale, ResidualScale::Median(1.0));
    let expected = (1.0f64 - 1.0 / 36.0).powi(2);
    for &w in &weights[..4] {
        assert_abs_diff_eq!(w, expected, epsilon = 1e-15);
    }
    assert_eq!(weights[4], 0.0);
}

/// Collapsed residuals zero every weight.
#[test]
fn test_robustness_weights_collapse() {
    let y = vec![2.0, 2.0, 2.0];
    let mut residuals = vec![9.0; 3];
    compute_residuals(&y, &y, &mut residuals);
    assert_eq!(residuals, vec![0.0; 3]);

    let mut weights = vec![1.0; 3];
    let mut scratch = vec![0.0; 3];
    let scale = update_robustness_weights(&residuals, &mut weights, &mut scratch);

    assert_eq!(scale, ResidualScale::Collapsed);
    assert_eq!(weights, vec![0.0; 3]);
}

// ============================================================================
// Regression Tests
// ============================================================================

/// A collinear span is fitted exactly, even with uneven robustness weights.
#[test]
fn test_regression_collinear() {
    let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let y: Vec<f64> = x.iter().map(|&v| 1e6 + 3.0 * v).collect();
    let r = 5;
    let h = bandwidths(&x, r);
    let spans = SpanBounds::compute(&x, &h, r).unwrap();
    let delta = vec![0.2, 1.0, 0.0, 0.7, 1.0];
    let previous = vec![0.0; 5];

    let ctx = IterationContext {
        x: &x,
        y: &y,
        h: &h,
        spans: &spans,
        delta: &delta,
        previous: &previous,
    };

    for i in 0..x.len() {
        assert_abs_diff_eq!(ctx.estimate(i), y[i], epsilon = 1e-6);
    }
}

/// Spans without two informative pairs keep the previous estimate.
#[test]
fn test_regression_degenerate_span() {
    let x = vec![0.0, 1.0, 2.0, 3.0];
    let y = vec![5.0, 6.0, 7.0, 8.0];
    let r = 4;
    let h = bandwidths(&x, r);
    let spans = SpanBounds::compute(&x, &h, r).unwrap();
    let previous = vec![-1.0, -2.0, -3.0, -4.0];

    // All weights zero
    let zero = vec![0.0; 4];
    let ctx = IterationContext {
        x: &x,
        y: &y,
        h: &h,
        spans: &spans,
        delta: &zero,
        previous: &previous,
    };
    for i in 0..x.len() {
        assert_eq!(ctx.estimate(i), previous[i]);
    }

    // A single surviving point
    let single = vec![0.0, 0.0, 1.0, 0.0];
    let ctx = IterationContext {
        delta: &single,
        ..ctx
    };
    assert_eq!(ctx.estimate(1), previous[1]);
}

/// Surviving points that all share one x make the fit singular.
#[test]
fn test_regression_singular_fit() {
    let x = vec![1.0, 1.0, 1.0, 2.0];
    let y = vec![1.0, 2.0, 3.0, 4.0];
    let r = 4;
    let h = bandwidths(&x, r);
    let spans = SpanBounds::compute(&x, &h, r).unwrap();
    let delta = vec![0.5, 1.0, 0.25, 0.0];
    let previous = vec![9.0; 4];

    let ctx = IterationContext {
        x: &x,
        y: &y,
        h: &h,
        spans: &spans,
        delta: &delta,
        previous: &previous,
    };

    assert_eq!(ctx.estimate(0), 9.0);
}

// ============================================================================
// Worker Pool Tests
// ============================================================================

/// Pool sizing follows the worker count.
#[test]
fn test_pool_sizes() {
    assert_eq!(WorkerPool::new(0).err(), Some(LowessError::InvalidWorkers(0)));
    assert_eq!(WorkerPool::new(1).unwrap().workers(), 1);
    assert_eq!(WorkerPool::new(3).unwrap().workers(), 3);
}

/// Maps return results in index order regardless of scheduling.
#[test]
fn test_pool_map_order() {
    for workers in [1, 2, 5] {
        let pool = WorkerPool::new(workers).unwrap();
        let out = pool.map_indexed(
            1000,
            || 0usize,
            |calls, i| {
                *calls += 1;
                i * i
            },
        );
        let expected: Vec<usize> = (0..1000).map(|i| i * i).collect();
        assert_eq!(out, expected);
    }
}

/// A failing task fails the whole map and leaves nothing behind.
#[test]
fn test_pool_task_panic() {
    for workers in [1, 4] {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let pool = WorkerPool::new(workers).unwrap();
            pool.map_indexed(
                200,
                || (),
                |_, i| {
                    if i == 137 {
                        panic!("task {i} failed");
                    }
                    i
                },
            )
        }));
        assert!(outcome.is_err(), "workers = {workers}");

        // Later calls on the same thread get a fresh pool
        let pool = WorkerPool::new(workers).unwrap();
        assert_eq!(pool.map_indexed(3, || (), |_, i| i + 1), vec![1, 2, 3]);

        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let out = LowessExecutor::new(1.0, 1, workers).run(&x, &x).unwrap();
        for (fitted, expected) in out.y.iter().zip(&x) {
            assert_abs_diff_eq!(*fitted, *expected, epsilon = 1e-9);
        }
    }
}

// ============================================================================
// Executor Tests
// ============================================================================

/// The executor exposes bandwidths and spans of the run.
#[test]
fn test_executor_outputs() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let y = vec![1.0, 2.0, 3.0, 4.0, 100.0];

    let out = LowessExecutor::new(1.0, 3, 2).run(&x, &y).unwrap();

    assert_eq!(out.bandwidths, vec![4.0, 3.0, 2.0, 3.0, 4.0]);
    assert_eq!(out.spans.start, vec![0, 0, 1, 1, 1]);
    assert_eq!(out.iterations, 3);
    assert_eq!(out.workers, 2);
    assert_eq!(out.robustness_weights[4], 0.0);
    for i in 0..5 {
        assert_abs_diff_eq!(out.y[i], x[i], epsilon = 1e-6);
        assert_abs_diff_eq!(out.residuals[i], y[i] - out.y[i], epsilon = 1e-12);
    }
}

/// The executor rejects unsorted x.
#[test]
fn test_executor_unsorted() {
    let result = LowessExecutor::new(1.0, 1, 1).run(&[2.0, 1.0], &[0.0, 0.0]);
    assert_eq!(result, Err(LowessError::UnsortedInput { index: 0 }));
}
