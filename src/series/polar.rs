use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::adornment::{Adornment, LabelPlacement};
use crate::core::{
    AxisContext, ChartPoint, EmptyPointMode, XyPoint, empty_points, reconcile::reconcile,
};
use crate::error::{LayoutError, LayoutResult};

const TAU: f64 = std::f64::consts::TAU;

/// How a polar/radar run is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PolarDrawKind {
    #[default]
    Line,
    Area,
}

/// One contiguous visible run of the polar polyline.
///
/// Empty points break the path, so the series emits one segment per run
/// rather than one per data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarSegment {
    pub run_start: usize,
    pub points: Vec<ChartPoint>,
    pub draw_kind: PolarDrawKind,
    /// `true` when a single run covers the whole series and the loop closes
    /// back on its first point.
    pub closed: bool,
    pub visible: bool,
}

/// Polar/radar series geometry facade.
///
/// Data points are distributed evenly around the pivot; the radial extent is
/// each point's share of the largest magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarSeries {
    points: Vec<XyPoint>,
    segments: Vec<PolarSegment>,
    adornments: Vec<Adornment>,
    center: ChartPoint,
    radius: f64,
    draw_kind: PolarDrawKind,
    close_loop: bool,
    empty_point_mode: EmptyPointMode,
    dirty: bool,
}

impl Default for PolarSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            adornments: Vec::new(),
            center: ChartPoint::new(0.5, 0.5),
            radius: 0.4,
            draw_kind: PolarDrawKind::Line,
            close_loop: true,
            empty_point_mode: EmptyPointMode::Gap,
            dirty: true,
        }
    }

    pub fn set_points(&mut self, points: Vec<XyPoint>) {
        debug!(count = points.len(), "set polar points");
        self.points = points;
        self.dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[XyPoint] {
        &self.points
    }

    pub fn set_center(&mut self, center: ChartPoint) -> LayoutResult<()> {
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(LayoutError::InvalidConfig(
                "polar center must be finite".to_owned(),
            ));
        }
        self.center = center;
        self.dirty = true;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) -> LayoutResult<()> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "polar radius must be finite and > 0".to_owned(),
            ));
        }
        self.radius = radius;
        self.dirty = true;
        Ok(())
    }

    pub fn set_draw_kind(&mut self, draw_kind: PolarDrawKind) {
        self.draw_kind = draw_kind;
        self.dirty = true;
    }

    pub fn set_close_loop(&mut self, close_loop: bool) {
        self.close_loop = close_loop;
        self.dirty = true;
    }

    pub fn set_empty_point_mode(&mut self, mode: EmptyPointMode) {
        self.empty_point_mode = mode;
        self.dirty = true;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub fn segments(&self) -> &[PolarSegment] {
        &self.segments
    }

    #[must_use]
    pub fn adornments(&self) -> &[Adornment] {
        &self.adornments
    }

    /// Angle of data index `i`: its even share of the full turn.
    #[must_use]
    pub fn angle_of(&self, i: usize) -> f64 {
        if self.points.is_empty() {
            0.0
        } else {
            TAU * i as f64 / self.points.len() as f64
        }
    }

    pub fn layout(&mut self, ctx: &AxisContext) -> LayoutResult<()> {
        let count = self.points.len();

        let mut ys: Vec<f64> = self.points.iter().map(|p| p.y).collect();
        if self.empty_point_mode != EmptyPointMode::Gap {
            empty_points::revalidate(&mut ys, self.empty_point_mode);
        }

        let max_magnitude = ys
            .iter()
            .filter(|y| y.is_finite())
            .map(|y| y.abs())
            .fold(0.0_f64, f64::max);

        let positions: Vec<ChartPoint> = (0..count)
            .map(|i| {
                let angle = self.angle_of(i);
                let r = if max_magnitude == 0.0 {
                    0.0
                } else {
                    self.radius * ys[i].abs() / max_magnitude
                };
                ChartPoint::new(
                    self.center.x + r * angle.cos(),
                    self.center.y + r * angle.sin(),
                )
            })
            .collect();

        let runs = empty_points::visible_runs(&ys);
        let run_count = runs.len();
        let draw_kind = self.draw_kind;
        let close_loop = self.close_loop;

        let build = |i: usize| -> PolarSegment {
            let run = runs[i].clone();
            PolarSegment {
                run_start: run.start,
                points: positions[run.clone()].to_vec(),
                draw_kind,
                closed: close_loop && run_count == 1 && run.len() == count,
                visible: true,
            }
        };
        reconcile(
            &mut self.segments,
            run_count,
            |i| build(i),
            |segment, i| *segment = build(i),
        );

        let radius = self.radius;
        let angle_of = |i: usize| {
            if count == 0 {
                0.0
            } else {
                TAU * i as f64 / count as f64
            }
        };
        let visible_range = ctx.visible_range;
        let points = &self.points;
        reconcile(
            &mut self.adornments,
            count,
            |i| {
                Adornment::new(i, positions[i], LabelPlacement::Above)
                    .with_polar(angle_of(i), radius)
                    .with_visible(!ys[i].is_nan() && visible_range.contains(points[i].x))
            },
            |adornment, i| {
                *adornment = Adornment::new(i, positions[i], LabelPlacement::Above)
                    .with_polar(angle_of(i), radius)
                    .with_visible(!ys[i].is_nan() && visible_range.contains(points[i].x));
            },
        );

        self.dirty = false;
        trace!(count, runs = run_count, "polar layout pass");
        Ok(())
    }

    /// Polar radian-to-coefficient inversion: the query angle picks the
    /// nearest angular slot, provided the point lies inside the chart circle.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        let count = self.points.len();
        if count == 0 {
            return None;
        }

        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        if (dx * dx + dy * dy).sqrt() > self.radius {
            return None;
        }

        let coefficient = dy.atan2(dx).rem_euclid(TAU) / TAU;
        let index = (coefficient * count as f64).round() as usize % count;
        Some(index)
    }
}
