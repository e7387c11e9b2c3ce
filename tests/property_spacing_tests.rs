use proptest::prelude::*;
use series_geom::core::spacing::{apply_spacing, compute_band};

proptest! {
    #[test]
    fn bands_partition_the_unit_slot(count in 1usize..16) {
        let mut covered = 0.0;
        let mut previous_end = -0.5;
        for index in 0..count {
            let band = compute_band(index, count, 1.0);
            prop_assert!((band.start - previous_end).abs() <= 1e-12);
            prop_assert!(band.delta > 0.0);
            covered += band.delta;
            previous_end = band.end;
        }
        prop_assert!((covered - 1.0).abs() <= 1e-9);
        prop_assert!((previous_end - 0.5).abs() <= 1e-9);
    }

    #[test]
    fn spacing_keeps_the_band_median(
        spacing in 0.0f64..=1.0,
        left in -10.0f64..10.0,
        width in 0.01f64..10.0
    ) {
        let right = left + width;
        let (new_left, new_right) = apply_spacing(spacing, left, right);
        prop_assert!(new_left >= left - 1e-12);
        prop_assert!(new_right <= right + 1e-12);
        let median = (left + right) / 2.0;
        let new_median = (new_left + new_right) / 2.0;
        prop_assert!((median - new_median).abs() <= 1e-9);
    }
}
