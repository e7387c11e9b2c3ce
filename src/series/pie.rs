use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::adornment::{Adornment, LabelPlacement};
use crate::core::circular::{self, GroupAggregate, GroupingPolicy};
use crate::core::{AxisContext, ChartPoint, XyPoint, reconcile::reconcile};
use crate::error::{LayoutError, LayoutResult};

/// Wedge geometry for one pie/doughnut slice, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSegment {
    /// Owning data index; `None` for the synthetic "Others" aggregate slice.
    pub data_index: Option<usize>,
    pub center: ChartPoint,
    pub start_angle: f64,
    pub sweep: f64,
    pub radius: f64,
    pub inner_radius: f64,
    pub value: f64,
    pub exploded: bool,
    pub visible: bool,
    pub selected: bool,
}

impl PieSegment {
    #[must_use]
    pub fn mid_angle(self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }
}

/// Pie/doughnut series geometry facade.
///
/// Lays out wedges in the unit box around a re-centered pivot (partial arcs
/// recenter within their own bounding box), with optional group-to-others
/// aggregation, per-point legend toggling, and slice explode.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSeries {
    points: Vec<XyPoint>,
    segments: Vec<PieSegment>,
    adornments: Vec<Adornment>,
    center: ChartPoint,
    radius: f64,
    inner_coefficient: f64,
    start_angle_deg: f64,
    end_angle_deg: f64,
    grouping: Option<GroupingPolicy>,
    group_aggregate: Option<GroupAggregate>,
    hidden_points: IndexSet<usize>,
    exploded_index: Option<usize>,
    explode_all: bool,
    explode_offset: f64,
    selected_index: Option<usize>,
    dirty: bool,
}

impl Default for PieSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl PieSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            adornments: Vec::new(),
            center: ChartPoint::new(0.5, 0.5),
            radius: 0.4,
            inner_coefficient: 0.0,
            start_angle_deg: 0.0,
            end_angle_deg: 360.0,
            grouping: None,
            group_aggregate: None,
            hidden_points: IndexSet::new(),
            exploded_index: None,
            explode_all: false,
            explode_offset: 0.1,
            selected_index: None,
            dirty: true,
        }
    }

    pub fn set_points(&mut self, points: Vec<XyPoint>) {
        debug!(count = points.len(), "set pie points");
        self.points = points;
        self.hidden_points.retain(|&i| i < self.points.len());
        self.dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[XyPoint] {
        &self.points
    }

    pub fn set_center(&mut self, center: ChartPoint) -> LayoutResult<()> {
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(LayoutError::InvalidConfig(
                "pie center must be finite".to_owned(),
            ));
        }
        self.center = center;
        self.dirty = true;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) -> LayoutResult<()> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "pie radius must be finite and > 0".to_owned(),
            ));
        }
        self.radius = radius;
        self.dirty = true;
        Ok(())
    }

    /// Inner-radius fraction of the outer radius; 0 renders a full pie.
    pub fn set_inner_coefficient(&mut self, coefficient: f64) -> LayoutResult<()> {
        if !(0.0..1.0).contains(&coefficient) {
            return Err(LayoutError::InvalidConfig(
                "doughnut inner coefficient must be in [0, 1)".to_owned(),
            ));
        }
        self.inner_coefficient = coefficient;
        self.dirty = true;
        Ok(())
    }

    pub fn set_angle_range(&mut self, start_deg: f64, end_deg: f64) -> LayoutResult<()> {
        if !start_deg.is_finite() || !end_deg.is_finite() {
            return Err(LayoutError::InvalidConfig(
                "pie angles must be finite".to_owned(),
            ));
        }
        self.start_angle_deg = start_deg;
        self.end_angle_deg = end_deg;
        self.dirty = true;
        Ok(())
    }

    pub fn set_grouping(&mut self, grouping: Option<GroupingPolicy>) -> LayoutResult<()> {
        if let Some(policy) = grouping {
            if !policy.threshold.is_finite() || policy.threshold < 0.0 {
                return Err(LayoutError::InvalidConfig(
                    "group-to threshold must be finite and >= 0".to_owned(),
                ));
            }
        }
        self.grouping = grouping;
        self.dirty = true;
        Ok(())
    }

    /// Aggregate record from the latest layout pass, when grouping collapsed
    /// anything.
    #[must_use]
    pub fn group_aggregate(&self) -> Option<&GroupAggregate> {
        self.group_aggregate.as_ref()
    }

    /// Legend toggle for a single point; out-of-range indices are ignored.
    pub fn set_point_visibility(&mut self, index: usize, point_visible: bool) {
        if index >= self.points.len() {
            warn!(index, "ignoring visibility toggle past data boundary");
            return;
        }
        let changed = if point_visible {
            self.hidden_points.shift_remove(&index)
        } else {
            self.hidden_points.insert(index)
        };
        if changed {
            self.dirty = true;
        }
    }

    #[must_use]
    pub fn is_point_visible(&self, index: usize) -> bool {
        !self.hidden_points.contains(&index)
    }

    pub fn set_exploded_index(&mut self, index: Option<usize>) {
        self.exploded_index = index;
        self.dirty = true;
    }

    pub fn set_explode_all(&mut self, explode_all: bool) {
        self.explode_all = explode_all;
        self.dirty = true;
    }

    pub fn set_explode_offset(&mut self, offset: f64) -> LayoutResult<()> {
        if !offset.is_finite() || offset < 0.0 {
            return Err(LayoutError::InvalidConfig(
                "explode offset must be finite and >= 0".to_owned(),
            ));
        }
        self.explode_offset = offset;
        self.dirty = true;
        Ok(())
    }

    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected_index = index.filter(|&i| i < self.points.len());
        for segment in &mut self.segments {
            segment.selected = segment.data_index.is_some()
                && segment.data_index == self.selected_index;
        }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub fn segments(&self) -> &[PieSegment] {
        &self.segments
    }

    #[must_use]
    pub fn adornments(&self) -> &[Adornment] {
        &self.adornments
    }

    pub fn layout(&mut self, _ctx: &AxisContext) -> LayoutResult<()> {
        // Hidden points keep their slot with zero sweep, so they are fed as
        // NaN (never grouped, never swept) and restored on the segment.
        let values: Vec<f64> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if self.hidden_points.contains(&i) {
                    f64::NAN
                } else {
                    p.y
                }
            })
            .collect();

        let (slices, aggregate) = circular::layout_slices(
            &values,
            self.start_angle_deg,
            self.end_angle_deg,
            self.grouping,
        );
        self.group_aggregate = aggregate;

        let pivot = circular::actual_center(
            self.center,
            self.radius,
            self.start_angle_deg,
            self.end_angle_deg,
        );
        let inner_radius = self.radius * self.inner_coefficient;
        let label_radius = (self.radius + inner_radius) / 2.0;

        let count = slices.len();
        let selected = self.selected_index;
        let exploded_index = self.exploded_index;
        let explode_all = self.explode_all;
        let explode_offset = self.explode_offset;
        let radius = self.radius;
        let hidden = &self.hidden_points;

        let build = |i: usize| -> PieSegment {
            let slice = slices[i];
            let exploded = explode_all || (slice.data_index.is_some() && slice.data_index == exploded_index);
            let mid = slice.mid_angle();
            let center = if exploded {
                ChartPoint::new(
                    pivot.x + explode_offset * mid.cos(),
                    pivot.y + explode_offset * mid.sin(),
                )
            } else {
                pivot
            };
            let point_hidden = slice.data_index.is_some_and(|d| hidden.contains(&d));
            PieSegment {
                data_index: slice.data_index,
                center,
                start_angle: slice.start_angle,
                sweep: slice.sweep,
                radius,
                inner_radius,
                value: slice.value,
                exploded,
                visible: !point_hidden && !slice.value.is_nan(),
                selected: slice.data_index.is_some() && slice.data_index == selected,
            }
        };

        reconcile(
            &mut self.segments,
            count,
            |i| build(i),
            |segment, i| *segment = build(i),
        );

        // Adornment anchors sit on the label radius at each slice midline;
        // the connector side follows which half of the circle the label is on.
        let segments = &self.segments;
        reconcile(
            &mut self.adornments,
            count,
            |i| Self::slice_adornment(&segments[i], label_radius, i),
            |adornment, i| *adornment = Self::slice_adornment(&segments[i], label_radius, i),
        );

        self.dirty = false;
        trace!(count, "pie layout pass");
        Ok(())
    }

    fn slice_adornment(segment: &PieSegment, label_radius: f64, slot: usize) -> Adornment {
        let mid = segment.mid_angle();
        let anchor = ChartPoint::new(
            segment.center.x + label_radius * mid.cos(),
            segment.center.y + label_radius * mid.sin(),
        );
        let placement = if mid.cos() >= 0.0 {
            LabelPlacement::Right
        } else {
            LabelPlacement::Left
        };
        Adornment::new(segment.data_index.unwrap_or(slot), anchor, placement)
            .with_polar(mid, label_radius)
            .with_visible(segment.visible && segment.sweep != 0.0)
    }

    /// Angle/radius containment hit test in the slice's own exploded frame.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        self.segments
            .iter()
            .find(|segment| segment.visible && slice_contains(segment, point))
            .and_then(|segment| segment.data_index)
    }
}

fn slice_contains(segment: &PieSegment, point: ChartPoint) -> bool {
    let dx = point.x - segment.center.x;
    let dy = point.y - segment.center.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance < segment.inner_radius || distance > segment.radius {
        return false;
    }

    let sweep = segment.sweep;
    if sweep == 0.0 {
        return false;
    }
    let angle = dy.atan2(dx);
    let mut delta = angle - segment.start_angle;
    delta = delta.rem_euclid(std::f64::consts::TAU);
    if sweep >= 0.0 {
        delta <= sweep
    } else {
        delta - std::f64::consts::TAU >= sweep
    }
}
