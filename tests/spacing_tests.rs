use series_geom::core::spacing::{apply_spacing, compute_band};

#[test]
fn single_series_band_covers_whole_slot() {
    let band = compute_band(0, 1, 1.0);
    assert!((band.start - -0.5).abs() <= 1e-12);
    assert!((band.end - 0.5).abs() <= 1e-12);
    assert!((band.median - 0.0).abs() <= 1e-12);
    assert!((band.delta - 1.0).abs() <= 1e-12);
}

#[test]
fn two_series_bands_tile_the_slot() {
    let first = compute_band(0, 2, 1.0);
    let second = compute_band(1, 2, 1.0);

    assert!((first.start - -0.5).abs() <= 1e-12);
    assert!((first.end - 0.0).abs() <= 1e-12);
    assert!((second.start - 0.0).abs() <= 1e-12);
    assert!((second.end - 0.5).abs() <= 1e-12);
}

#[test]
fn bands_are_contiguous_for_wider_clusters() {
    let count = 5;
    let mut previous_end = -0.5;
    for index in 0..count {
        let band = compute_band(index, count, 1.0);
        assert!((band.start - previous_end).abs() <= 1e-12);
        assert!(band.end > band.start);
        previous_end = band.end;
    }
    assert!((previous_end - 0.5).abs() <= 1e-12);
}

#[test]
fn category_width_scales_the_band() {
    let band = compute_band(0, 2, 2.0);
    assert!((band.start - -1.0).abs() <= 1e-12);
    assert!((band.end - 0.0).abs() <= 1e-12);
}

#[test]
fn zero_cluster_size_degenerates_to_whole_slot() {
    let band = compute_band(0, 0, 1.0);
    assert!((band.start - -0.5).abs() <= 1e-12);
    assert!((band.end - 0.5).abs() <= 1e-12);
}

#[test]
fn spacing_zero_is_identity() {
    let (left, right) = apply_spacing(0.0, -0.5, 0.5);
    assert_eq!(left, -0.5);
    assert_eq!(right, 0.5);
}

#[test]
fn spacing_one_collapses_to_the_midpoint() {
    let (left, right) = apply_spacing(1.0, -0.4, 0.8);
    assert!((left - 0.2).abs() <= 1e-12);
    assert!((right - 0.2).abs() <= 1e-12);
}

#[test]
fn spacing_outside_unit_interval_is_a_no_op() {
    assert_eq!(apply_spacing(-0.1, 1.0, 3.0), (1.0, 3.0));
    assert_eq!(apply_spacing(1.5, 1.0, 3.0), (1.0, 3.0));
    assert_eq!(apply_spacing(f64::NAN, 1.0, 3.0), (1.0, 3.0));
}

#[test]
fn swapped_operands_shrink_the_other_side() {
    // Financial tick rendering calls apply_spacing twice with swapped
    // arguments to shrink left and right independently.
    let (open_tick, _) = apply_spacing(0.5, -0.5, 0.5);
    let (close_tick, _) = apply_spacing(0.5, 0.5, -0.5);
    assert!((open_tick - -0.25).abs() <= 1e-12);
    assert!((close_tick - 0.25).abs() <= 1e-12);
}
