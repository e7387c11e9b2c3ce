use series_geom::core::adornment::{
    AdornmentPosition, LabelPlacement, label_placement, place_anchors,
};
use series_geom::core::{AxisContext, NumericRange};

#[test]
fn label_placement_covers_the_eight_way_combination() {
    assert_eq!(label_placement(true, false, false), LabelPlacement::Above);
    assert_eq!(label_placement(false, false, false), LabelPlacement::Below);
    assert_eq!(label_placement(true, false, true), LabelPlacement::Below);
    assert_eq!(label_placement(false, false, true), LabelPlacement::Above);
    assert_eq!(label_placement(true, true, false), LabelPlacement::Right);
    assert_eq!(label_placement(false, true, false), LabelPlacement::Left);
    assert_eq!(label_placement(true, true, true), LabelPlacement::Left);
    assert_eq!(label_placement(false, true, true), LabelPlacement::Right);
}

#[test]
fn range_anchors_are_visually_outer_and_inner() {
    let ctx = AxisContext::default();
    // The "high" channel is numerically smaller here; anchors still go to
    // the visual extremes.
    let anchors = place_anchors(
        0,
        2.0,
        10.0,
        30.0,
        AdornmentPosition::TopAndBottom,
        false,
        &ctx,
    );
    assert_eq!(anchors.len(), 2);
    assert_eq!(anchors[0].anchor.y, 30.0);
    assert_eq!(anchors[0].placement, LabelPlacement::Above);
    assert_eq!(anchors[1].anchor.y, 10.0);
    assert_eq!(anchors[1].placement, LabelPlacement::Below);
}

#[test]
fn center_position_emits_one_midpoint_anchor() {
    let ctx = AxisContext::default();
    let anchors = place_anchors(3, 1.0, 4.0, 8.0, AdornmentPosition::Center, false, &ctx);
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].anchor.y, 6.0);
    assert_eq!(anchors[0].data_index, 3);
}

#[test]
fn single_value_range_bypasses_dual_anchors() {
    let ctx = AxisContext::default();
    // Even with TopAndBottom configured, a single-value range column emits
    // exactly one anchor at the value itself.
    let anchors = place_anchors(
        1,
        0.0,
        42.0,
        0.0,
        AdornmentPosition::TopAndBottom,
        true,
        &ctx,
    );
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].anchor.y, 42.0);
}

#[test]
fn anchors_outside_the_visible_range_are_hidden() {
    let ctx = AxisContext::default().with_visible_range(NumericRange::new(0.0, 10.0));
    let inside = place_anchors(0, 5.0, 1.0, 2.0, AdornmentPosition::Top, false, &ctx);
    let outside = place_anchors(1, 25.0, 1.0, 2.0, AdornmentPosition::Top, false, &ctx);
    assert!(inside[0].visible);
    assert!(!outside[0].visible);
}

#[test]
fn transposed_axes_rotate_anchor_placement() {
    let ctx = AxisContext::default().with_transposed(true);
    let anchors = place_anchors(
        0,
        0.0,
        9.0,
        1.0,
        AdornmentPosition::TopAndBottom,
        false,
        &ctx,
    );
    assert_eq!(anchors[0].placement, LabelPlacement::Right);
    assert_eq!(anchors[1].placement, LabelPlacement::Left);
}

#[test]
fn inversion_flips_anchor_placement_not_anchor_value() {
    let ctx = AxisContext::default().with_y_inverse(true);
    let anchors = place_anchors(0, 0.0, 9.0, 1.0, AdornmentPosition::Top, false, &ctx);
    assert_eq!(anchors[0].anchor.y, 9.0);
    assert_eq!(anchors[0].placement, LabelPlacement::Below);
}
