use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AxisContext, ChartPoint};

/// Where a series anchors its data labels relative to each segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AdornmentPosition {
    #[default]
    Top,
    Bottom,
    Center,
    TopAndBottom,
}

/// Final label direction after transposition and axis inversion are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelPlacement {
    Above,
    Below,
    Left,
    Right,
}

/// Label-anchor record mirroring a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adornment {
    pub data_index: usize,
    pub anchor: ChartPoint,
    pub placement: LabelPlacement,
    /// Auxiliary polar pair used by circular series label connectors.
    pub angle: f64,
    pub radius: f64,
    pub visible: bool,
}

impl Adornment {
    #[must_use]
    pub fn new(data_index: usize, anchor: ChartPoint, placement: LabelPlacement) -> Self {
        Self {
            data_index,
            anchor,
            placement,
            angle: 0.0,
            radius: 0.0,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_polar(mut self, angle: f64, radius: f64) -> Self {
        self.angle = angle;
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Resolves a top/bottom anchor to its final label direction.
///
/// Eight-way combination: y inversion flips the outward side, transposition
/// turns the vertical pair into a horizontal one.
#[must_use]
pub fn label_placement(is_top: bool, transposed: bool, y_inversed: bool) -> LabelPlacement {
    let outward_top = is_top != y_inversed;
    match (transposed, outward_top) {
        (false, true) => LabelPlacement::Above,
        (false, false) => LabelPlacement::Below,
        (true, true) => LabelPlacement::Right,
        (true, false) => LabelPlacement::Left,
    }
}

/// Number of adornments emitted per data point for a position mode.
///
/// TopAndBottom doubles, and doubles again when the category axis is grouped
/// (top/bottom pair for both the group-start and group-end records).
#[must_use]
pub fn anchors_per_point(position: AdornmentPosition, grouped: bool) -> usize {
    match position {
        AdornmentPosition::TopAndBottom => {
            if grouped {
                4
            } else {
                2
            }
        }
        _ => 1,
    }
}

/// Computes the label anchors for one range-like segment.
///
/// The top anchor is always the visually-outer channel (`max(high, low)`)
/// and the bottom anchor the visually-inner one, independent of which
/// channel is numerically larger. Series without an explicit high binding
/// (`is_single_value_range`) bypass the dual-anchor logic and emit exactly
/// one anchor at the value itself.
#[must_use]
pub fn place_anchors(
    data_index: usize,
    x: f64,
    high: f64,
    low: f64,
    position: AdornmentPosition,
    is_single_value_range: bool,
    ctx: &AxisContext,
) -> SmallVec<[Adornment; 2]> {
    let mut anchors: SmallVec<[Adornment; 2]> = SmallVec::new();
    let visible = ctx.visible_range.contains(x);

    if is_single_value_range {
        anchors.push(
            Adornment::new(
                data_index,
                ChartPoint::new(x, high),
                label_placement(true, ctx.is_transposed, ctx.is_y_inverse),
            )
            .with_visible(visible),
        );
        return anchors;
    }

    let outer = high.max(low);
    let inner = high.min(low);

    let mut push = |y: f64, is_top: bool| {
        anchors.push(
            Adornment::new(
                data_index,
                ChartPoint::new(x, y),
                label_placement(is_top, ctx.is_transposed, ctx.is_y_inverse),
            )
            .with_visible(visible),
        );
    };

    match position {
        AdornmentPosition::Top => push(outer, true),
        AdornmentPosition::Bottom => push(inner, false),
        AdornmentPosition::Center => push((high + low) / 2.0, true),
        AdornmentPosition::TopAndBottom => {
            push(outer, true);
            push(inner, false);
        }
    }

    anchors
}
