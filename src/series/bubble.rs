use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::adornment::{Adornment, AdornmentPosition};
use crate::core::{
    AxisContext, BubblePoint, ChartPoint, EmptyPointMode, SideBySideInfo, empty_points,
    reconcile::reconcile,
};
use crate::error::{LayoutError, LayoutResult};
use crate::series::populate_range_adornments;

/// Ellipse geometry for one bubble, in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleSegment {
    pub data_index: usize,
    pub center: ChartPoint,
    pub radius_x: f64,
    pub radius_y: f64,
    pub visible: bool,
    pub selected: bool,
}

/// Bubble series geometry facade.
///
/// Bubble radii interpolate between the configured minimum and maximum
/// proportionally to each point's size share of the largest magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSeries {
    points: Vec<BubblePoint>,
    segments: Vec<BubbleSegment>,
    adornments: Vec<Adornment>,
    min_radius: f64,
    max_radius: f64,
    empty_point_mode: EmptyPointMode,
    adornment_position: AdornmentPosition,
    selected_index: Option<usize>,
    dirty: bool,
}

impl Default for BubbleSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl BubbleSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            adornments: Vec::new(),
            min_radius: 0.1,
            max_radius: 0.4,
            empty_point_mode: EmptyPointMode::Gap,
            adornment_position: AdornmentPosition::Top,
            selected_index: None,
            dirty: true,
        }
    }

    pub fn set_points(&mut self, points: Vec<BubblePoint>) {
        debug!(count = points.len(), "set bubble points");
        self.points = points;
        self.dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[BubblePoint] {
        &self.points
    }

    pub fn set_radius_range(&mut self, min_radius: f64, max_radius: f64) -> LayoutResult<()> {
        if !min_radius.is_finite()
            || !max_radius.is_finite()
            || min_radius < 0.0
            || max_radius < min_radius
        {
            return Err(LayoutError::InvalidConfig(
                "bubble radius range must be finite with 0 <= min <= max".to_owned(),
            ));
        }
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self.dirty = true;
        Ok(())
    }

    pub fn set_empty_point_mode(&mut self, mode: EmptyPointMode) {
        self.empty_point_mode = mode;
        self.dirty = true;
    }

    pub fn set_adornment_position(&mut self, position: AdornmentPosition) {
        self.adornment_position = position;
        self.dirty = true;
    }

    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected_index = index.filter(|&i| i < self.points.len());
        for segment in &mut self.segments {
            segment.selected = Some(segment.data_index) == self.selected_index;
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
    pub fn segments(&self) -> &[BubbleSegment] {
        &self.segments
    }

    #[must_use]
    pub fn adornments(&self) -> &[Adornment] {
        &self.adornments
    }

    pub fn layout(&mut self, ctx: &AxisContext) -> LayoutResult<()> {
        let count = self.points.len();

        let xs: Vec<f64> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| ctx.x_position(i, p.x))
            .collect();
        let mut ys: Vec<f64> = self.points.iter().map(|p| p.y).collect();
        if self.empty_point_mode != EmptyPointMode::Gap {
            empty_points::revalidate(&mut ys, self.empty_point_mode);
        }

        let max_size = self
            .points
            .iter()
            .map(|p| p.size.abs())
            .filter(|s| s.is_finite())
            .fold(0.0_f64, f64::max);

        let (min_radius, max_radius) = (self.min_radius, self.max_radius);
        let radius_of = |size: f64| {
            if max_size == 0.0 || !size.is_finite() {
                min_radius
            } else {
                min_radius + (max_radius - min_radius) * size.abs() / max_size
            }
        };

        let selected = self.selected_index;
        let points = &self.points;
        reconcile(
            &mut self.segments,
            count,
            |i| {
                let radius = radius_of(points[i].size);
                BubbleSegment {
                    data_index: i,
                    center: ChartPoint::new(xs[i], ys[i]),
                    radius_x: radius,
                    radius_y: radius,
                    visible: !ys[i].is_nan(),
                    selected: selected == Some(i),
                }
            },
            |segment, i| {
                let radius = radius_of(points[i].size);
                segment.data_index = i;
                segment.center = ChartPoint::new(xs[i], ys[i]);
                segment.radius_x = radius;
                segment.radius_y = radius;
                segment.visible = !ys[i].is_nan();
                segment.selected = selected == Some(i);
            },
        );

        populate_range_adornments(
            &mut self.adornments,
            count,
            self.adornment_position,
            true,
            ctx,
            SideBySideInfo::new(0.0, 0.0),
            |i| (xs[i], ys[i], ys[i]),
        );

        self.dirty = false;
        trace!(count, "bubble layout pass");
        Ok(())
    }

    /// Ellipse-containment hit test.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        self.segments.iter().find_map(|segment| {
            if !segment.visible || segment.radius_x <= 0.0 || segment.radius_y <= 0.0 {
                return None;
            }
            let nx = (point.x - segment.center.x) / segment.radius_x;
            let ny = (point.y - segment.center.y) / segment.radius_y;
            (nx * nx + ny * ny <= 1.0).then_some(segment.data_index)
        })
    }
}
