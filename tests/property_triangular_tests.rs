use proptest::prelude::*;
use series_geom::core::triangular::{TriangularMode, layout_blocks};

proptest! {
    /// Surface-mode slice areas reconstruct the input magnitudes.
    #[test]
    fn surface_conserves_total_area(
        values in prop::collection::vec(0.0f64..100.0, 1..16),
        nan_at in 0usize..16
    ) {
        let mut values = values;
        if nan_at < values.len() {
            values[nan_at] = f64::NAN;
        }
        let total: f64 = values.iter().filter(|v| !v.is_nan()).map(|v| v.abs()).sum();
        prop_assume!(total > 0.0);

        let layout = layout_blocks(&values, TriangularMode::Surface, 0.0);
        prop_assert_eq!(layout.blocks.len(), values.len());

        let mut reconstructed = 0.0;
        for block in &layout.blocks {
            let top = block.top / layout.scale;
            let height = block.height / layout.scale;
            reconstructed += (height * height + 2.0 * top * height) * total;
        }
        prop_assert!((reconstructed - total).abs() <= total * 1e-9 + 1e-9);
    }

    /// Linear mode keeps blocks ordered and inside the unit box for any
    /// valid gap ratio.
    #[test]
    fn linear_blocks_stay_ordered_and_bounded(
        values in prop::collection::vec(0.0f64..100.0, 1..16),
        gap_ratio in 0.0f64..0.9
    ) {
        let layout = layout_blocks(&values, TriangularMode::Linear, gap_ratio);
        let mut previous_bottom = 0.0;
        for block in &layout.blocks {
            prop_assert!(block.top >= previous_bottom - 1e-9);
            prop_assert!(block.height >= 0.0);
            prop_assert!(block.bottom() <= 1.0 + 1e-9);
            previous_bottom = block.bottom();
        }
    }
}
