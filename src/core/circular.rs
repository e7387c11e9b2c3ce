use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::ChartPoint;

const QUARTER_TURN: f64 = std::f64::consts::FRAC_PI_2;
const FULL_TURN: f64 = std::f64::consts::TAU;

/// Transform applied to a slice magnitude before comparing it against the
/// group-to-others threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CircularGroupMode {
    /// Raw absolute value.
    #[default]
    Value,
    /// Percentage of the grand total, floored to two decimals.
    Percentage,
    /// Angle-equivalent sweep in radians.
    Angle,
}

/// Group-to-others configuration: slices whose transformed magnitude does not
/// exceed `threshold` collapse into one synthetic trailing aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupingPolicy {
    pub mode: CircularGroupMode,
    pub threshold: f64,
}

/// Synthetic "Others" record aggregating all below-threshold values.
///
/// Recomputed from scratch on every layout pass, never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupAggregate {
    pub total: f64,
    /// Original data index -> original value, in source order.
    pub constituents: IndexMap<usize, f64>,
}

impl GroupAggregate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }
}

/// One slice of a circular layout, angles in radians.
///
/// `data_index` is `None` for the synthetic aggregate slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSlice {
    pub data_index: Option<usize>,
    pub start_angle: f64,
    pub sweep: f64,
    pub value: f64,
}

impl ArcSlice {
    #[must_use]
    pub fn mid_angle(self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }

    #[must_use]
    pub fn end_angle(self) -> f64 {
        self.start_angle + self.sweep
    }
}

/// Normalizes a requested angular span to at most one full turn, preserving
/// direction. Returns radians.
#[must_use]
pub fn normalize_span(start_deg: f64, end_deg: f64) -> f64 {
    let mut span = end_deg - start_deg;
    if span.abs() > 360.0 {
        span %= 360.0;
    }
    span.to_radians()
}

/// Accumulates arc slices for `values` over the requested angular span.
///
/// NaN values yield zero-sweep slices that keep their index slot; a zero
/// grand total degenerates every sweep to zero instead of dividing. When a
/// grouping policy is active, below-threshold values collapse into a single
/// trailing aggregate slice and the aggregate record is returned alongside.
#[must_use]
pub fn layout_slices(
    values: &[f64],
    start_deg: f64,
    end_deg: f64,
    grouping: Option<GroupingPolicy>,
) -> (Vec<ArcSlice>, Option<GroupAggregate>) {
    let span = normalize_span(start_deg, end_deg);
    let start = start_deg.to_radians();

    let pre_group_total: f64 = values.iter().filter(|v| !v.is_nan()).map(|v| v.abs()).sum();

    let mut kept: Vec<(Option<usize>, f64)> = Vec::with_capacity(values.len());
    let mut aggregate = GroupAggregate::default();
    for (i, &value) in values.iter().enumerate() {
        if value.is_nan() {
            kept.push((Some(i), f64::NAN));
            continue;
        }
        let grouped = grouping.is_some_and(|policy| {
            grouped_magnitude(value, pre_group_total, span, policy.mode) <= policy.threshold
        });
        if grouped {
            aggregate.total += value.abs();
            aggregate.constituents.insert(i, value);
        } else {
            kept.push((Some(i), value));
        }
    }
    if !aggregate.is_empty() {
        kept.push((None, aggregate.total));
    }

    let grand_total: f64 = kept
        .iter()
        .filter(|(_, v)| !v.is_nan())
        .map(|(_, v)| v.abs())
        .sum();

    let mut slices = Vec::with_capacity(kept.len());
    let mut arc_start = start;
    for (data_index, value) in kept {
        let sweep = if value.is_nan() || grand_total == 0.0 {
            0.0
        } else {
            value.abs() * span / grand_total
        };
        slices.push(ArcSlice {
            data_index,
            start_angle: arc_start,
            sweep,
            value,
        });
        arc_start += sweep;
    }

    let aggregate = (!aggregate.is_empty()).then_some(aggregate);
    (slices, aggregate)
}

fn grouped_magnitude(value: f64, total: f64, span: f64, mode: CircularGroupMode) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    match mode {
        CircularGroupMode::Value => value.abs(),
        CircularGroupMode::Percentage => {
            let percent = value.abs() / total * 100.0;
            (percent * 100.0).floor() / 100.0
        }
        CircularGroupMode::Angle => value.abs() * span.abs() / total,
    }
}

/// Re-centers a partial arc within its own bounding box.
///
/// An arc spanning less than a full circle should sit visually centered in
/// the layout box rather than around the full circle's geometric center. The
/// bound is taken over the wedge's extreme points: both arc endpoints, the
/// quadrant-aligned extremes whose angles fall strictly inside the sweep,
/// and the pivot itself. The returned center is the original center mirrored
/// away from the bound's midpoint, with the offset clamped to the radius.
#[must_use]
pub fn actual_center(center: ChartPoint, radius: f64, start_deg: f64, end_deg: f64) -> ChartPoint {
    let span = normalize_span(start_deg, end_deg);
    if span.abs() >= FULL_TURN || radius <= 0.0 || !radius.is_finite() {
        return center;
    }

    let start = start_deg.to_radians();
    let (a, b) = if span >= 0.0 {
        (start, start + span)
    } else {
        (start + span, start)
    };

    let on_arc = |angle: f64| {
        ChartPoint::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    };

    let mut min_x = center.x;
    let mut max_x = center.x;
    let mut min_y = center.y;
    let mut max_y = center.y;
    let mut include = |p: ChartPoint| {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    };

    include(on_arc(a));
    include(on_arc(b));

    // Quadrant-aligned extremes strictly inside (a, b).
    let first = (a / QUARTER_TURN).ceil() as i64;
    let last = (b / QUARTER_TURN).floor() as i64;
    for k in first..=last {
        let q = k as f64 * QUARTER_TURN;
        if q > a && q < b {
            include(on_arc(q));
        }
    }

    let box_center = ChartPoint::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    let mut offset_x = center.x - box_center.x;
    let mut offset_y = center.y - box_center.y;

    let magnitude = (offset_x * offset_x + offset_y * offset_y).sqrt();
    if magnitude > radius {
        let scale = radius / magnitude;
        offset_x *= scale;
        offset_y *= scale;
    }

    ChartPoint::new(center.x + offset_x, center.y + offset_y)
}
