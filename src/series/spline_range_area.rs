use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::adornment::{Adornment, AdornmentPosition};
use crate::core::spline::{self, ControlPointSet, SplineType};
use crate::core::{
    AxisContext, ChartPoint, EmptyPointMode, RangePoint, SideBySideInfo, empty_points,
    reconcile::reconcile,
};
use crate::error::LayoutResult;
use crate::series::populate_range_adornments;

/// One contiguous visible run of the spline range area.
///
/// Control-point sets align with the gaps between adjacent run points: entry
/// `i` curves from run point `i` to `i + 1`, on both the high and the low
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineRangeAreaSegment {
    pub run_start: usize,
    pub xs: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub high_controls: ControlPointSet,
    pub low_controls: ControlPointSet,
    pub visible: bool,
}

impl SplineRangeAreaSegment {
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Spline range area series geometry facade.
///
/// Empty points break the band into runs; every run gets freshly computed
/// control points for its high and low boundaries (the interpolators are not
/// incremental).
#[derive(Debug, Clone, PartialEq)]
pub struct SplineRangeAreaSeries {
    points: Vec<RangePoint>,
    segments: Vec<SplineRangeAreaSegment>,
    adornments: Vec<Adornment>,
    spline_type: SplineType,
    empty_point_mode: EmptyPointMode,
    adornment_position: AdornmentPosition,
    dirty: bool,
}

impl Default for SplineRangeAreaSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl SplineRangeAreaSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            adornments: Vec::new(),
            spline_type: SplineType::Natural,
            empty_point_mode: EmptyPointMode::Gap,
            adornment_position: AdornmentPosition::TopAndBottom,
            dirty: true,
        }
    }

    pub fn set_points(&mut self, points: Vec<RangePoint>) {
        debug!(count = points.len(), "set spline range area points");
        self.points = points;
        self.dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[RangePoint] {
        &self.points
    }

    pub fn set_spline_type(&mut self, spline_type: SplineType) {
        self.spline_type = spline_type;
        self.dirty = true;
    }

    pub fn set_empty_point_mode(&mut self, mode: EmptyPointMode) {
        self.empty_point_mode = mode;
        self.dirty = true;
    }

    pub fn set_adornment_position(&mut self, position: AdornmentPosition) {
        self.adornment_position = position;
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
    pub fn segments(&self) -> &[SplineRangeAreaSegment] {
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
        let mut highs: Vec<f64> = self.points.iter().map(|p| p.high).collect();
        let mut lows: Vec<f64> = self.points.iter().map(|p| p.low).collect();
        if self.empty_point_mode != EmptyPointMode::Gap {
            empty_points::revalidate(&mut highs, self.empty_point_mode);
            empty_points::revalidate(&mut lows, self.empty_point_mode);
        }

        // A point is part of a run only when both channels are numeric.
        let combined: Vec<f64> = highs
            .iter()
            .zip(&lows)
            .map(|(h, l)| if h.is_nan() || l.is_nan() { f64::NAN } else { *h })
            .collect();
        let runs = empty_points::visible_runs(&combined);
        let run_count = runs.len();

        let spline_type = self.spline_type;
        let build = |i: usize| -> SplineRangeAreaSegment {
            let run = runs[i].clone();
            let run_xs = xs[run.clone()].to_vec();
            let run_highs = highs[run.clone()].to_vec();
            let run_lows = lows[run.clone()].to_vec();
            SplineRangeAreaSegment {
                run_start: run.start,
                high_controls: spline::compute(spline_type, &run_xs, &run_highs),
                low_controls: spline::compute(spline_type, &run_xs, &run_lows),
                xs: run_xs,
                highs: run_highs,
                lows: run_lows,
                visible: true,
            }
        };

        reconcile(
            &mut self.segments,
            run_count,
            |i| build(i),
            |segment, i| *segment = build(i),
        );

        populate_range_adornments(
            &mut self.adornments,
            count,
            self.adornment_position,
            false,
            ctx,
            SideBySideInfo::new(0.0, 0.0),
            |i| (xs[i], highs[i], lows[i]),
        );

        self.dirty = false;
        trace!(count, runs = run_count, "spline range area layout pass");
        Ok(())
    }

    /// Hit test against the vertical band of the x-nearest run point.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        let nearest = self
            .segments
            .iter()
            .filter(|segment| segment.visible)
            .flat_map(|segment| {
                segment
                    .xs
                    .iter()
                    .enumerate()
                    .map(move |(offset, &x)| (segment, offset, x))
            })
            .min_by_key(|(_, _, x)| OrderedFloat((x - point.x).abs()))?;

        let (segment, offset, _) = nearest;
        let high = segment.highs[offset];
        let low = segment.lows[offset];
        let top = high.max(low);
        let bottom = high.min(low);
        (point.y >= bottom && point.y <= top).then_some(segment.run_start + offset)
    }
}
