//! Comprehensive tests for Axis nearest-index lookup.

use raster_common::axis::Axis;
use raster_common::extent::Extent;
use raster_common::grid_index::GridIndex;

fn axis(values: &[f64]) -> Axis {
    Axis::new(values.to_vec()).unwrap()
}

// ============================================================================
// Nearest-index property: minimal absolute distance, ties to lower index
// ============================================================================

#[test]
fn test_nearest_minimizes_distance_on_uniform_axis() {
    let a = axis(&[0.0, 1.0, 2.0, 3.0]);
    for step in 0..=60 {
        let q = -1.5 + step as f64 * 0.1;
        let i = a.nearest(q);
        let d = (a.coord(i) - q).abs();
        for j in 0..a.len() {
            assert!(
                d <= (a.coord(j) - q).abs() + 1e-12,
                "query {} resolved to index {} but {} is closer",
                q,
                i,
                j
            );
        }
    }
}

#[test]
fn test_nearest_minimizes_distance_on_irregular_axis() {
    let a = axis(&[-3.0, -0.5, 0.1, 4.0, 4.5, 100.0]);
    for q in [-10.0, -3.0, -1.75, 0.0, 2.05, 4.25, 52.25, 1000.0] {
        let i = a.nearest(q);
        let d = (a.coord(i) - q).abs();
        for j in 0..a.len() {
            assert!(d <= (a.coord(j) - q).abs() + 1e-12);
        }
    }
}

#[test]
fn test_nearest_exact_ties_resolve_to_lower_index() {
    let a = axis(&[0.0, 2.0, 4.0]);
    assert_eq!(a.nearest(1.0), 0);
    assert_eq!(a.nearest(3.0), 1);
}

#[test]
fn test_nearest_exact_sample_hits_its_own_index() {
    let a = axis(&[0.0, 1.0, 2.0, 3.0]);
    for (i, q) in a.values().iter().enumerate() {
        assert_eq!(a.nearest(*q), i);
    }
}

#[test]
fn test_click_scenario_resolves_to_lower_neighbor() {
    // Click at x=2.4 on [0,1,2,3] resolves to index 2, not 3
    let a = axis(&[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(a.nearest(2.4), 2);
}

#[test]
fn test_single_sample_axis() {
    let a = axis(&[7.5]);
    assert_eq!(a.nearest(-100.0), 0);
    assert_eq!(a.nearest(7.5), 0);
    assert_eq!(a.nearest(100.0), 0);
    assert_eq!(a.index_range(0.0, 100.0), (0, 1));
}

// ============================================================================
// Index-range clamping
// ============================================================================

#[test]
fn test_index_range_never_out_of_bounds() {
    let a = axis(&[0.0, 1.0, 2.0, 3.0]);
    for (lo, hi) in [
        (-100.0, -50.0),
        (-100.0, 100.0),
        (50.0, 100.0),
        (1.2, 1.3),
        (3.0, 3.0),
    ] {
        let (start, end) = a.index_range(lo, hi);
        assert!(start < end);
        assert!(end <= a.len());
    }
}

#[test]
fn test_window_fully_outside_is_single_endpoint_pair() {
    let x = axis(&[0.0, 1.0, 2.0, 3.0]);
    let y = axis(&[0.0, 1.0]);
    let index = GridIndex::new(&x, &y);

    let above = index.window(&Extent::new(10.0, 20.0, 10.0, 20.0));
    assert_eq!((above.x_start, above.x_end), (3, 4));
    assert_eq!((above.y_start, above.y_end), (1, 2));

    let below = index.window(&Extent::new(-20.0, -10.0, -20.0, -10.0));
    assert_eq!((below.x_start, below.x_end), (0, 1));
    assert_eq!((below.y_start, below.y_end), (0, 1));
}
