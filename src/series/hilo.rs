use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::adornment::{Adornment, AdornmentPosition};
use crate::core::{
    AxisContext, ChartPoint, EmptyPointMode, OhlcPoint, RangePoint, SideBySideInfo, empty_points,
    reconcile::reconcile, spacing,
};
use crate::error::{LayoutError, LayoutResult};
use crate::series::populate_range_adornments;

/// Vertical high/low stroke for one data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiLoSegment {
    pub data_index: usize,
    pub x: f64,
    pub high: f64,
    pub low: f64,
    pub visible: bool,
    pub selected: bool,
}

/// HiLo series geometry facade.
#[derive(Debug, Clone, PartialEq)]
pub struct HiLoSeries {
    points: Vec<RangePoint>,
    segments: Vec<HiLoSegment>,
    adornments: Vec<Adornment>,
    cluster_index: usize,
    cluster_count: usize,
    empty_point_mode: EmptyPointMode,
    adornment_position: AdornmentPosition,
    selected_index: Option<usize>,
    dirty: bool,
}

impl Default for HiLoSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl HiLoSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            adornments: Vec::new(),
            cluster_index: 0,
            cluster_count: 1,
            empty_point_mode: EmptyPointMode::Gap,
            adornment_position: AdornmentPosition::TopAndBottom,
            selected_index: None,
            dirty: true,
        }
    }

    pub fn set_points(&mut self, points: Vec<RangePoint>) {
        debug!(count = points.len(), "set hilo points");
        self.points = points;
        self.dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[RangePoint] {
        &self.points
    }

    pub fn set_cluster(&mut self, index: usize, count: usize) -> LayoutResult<()> {
        if count == 0 || index >= count {
            return Err(LayoutError::InvalidConfig(format!(
                "cluster index {index} out of range for cluster of {count}"
            )));
        }
        self.cluster_index = index;
        self.cluster_count = count;
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
    pub fn segments(&self) -> &[HiLoSegment] {
        &self.segments
    }

    #[must_use]
    pub fn adornments(&self) -> &[Adornment] {
        &self.adornments
    }

    #[must_use]
    pub fn band(&self) -> SideBySideInfo {
        spacing::compute_band(self.cluster_index, self.cluster_count, 1.0)
    }

    pub fn layout(&mut self, ctx: &AxisContext) -> LayoutResult<()> {
        let count = self.points.len();
        let band = self.band();

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

        let selected = self.selected_index;
        reconcile(
            &mut self.segments,
            count,
            |i| HiLoSegment {
                data_index: i,
                x: xs[i] + band.median,
                high: highs[i],
                low: lows[i],
                visible: !highs[i].is_nan() && !lows[i].is_nan(),
                selected: selected == Some(i),
            },
            |segment, i| {
                segment.data_index = i;
                segment.x = xs[i] + band.median;
                segment.high = highs[i];
                segment.low = lows[i];
                segment.visible = !highs[i].is_nan() && !lows[i].is_nan();
                segment.selected = selected == Some(i);
            },
        );

        populate_range_adornments(
            &mut self.adornments,
            count,
            self.adornment_position,
            false,
            ctx,
            band,
            |i| (xs[i], highs[i], lows[i]),
        );

        self.dirty = false;
        trace!(count, "hilo layout pass");
        Ok(())
    }

    /// Rectangle-interval hit test over the series band width.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        let half_width = self.band().delta.abs() / 2.0;
        self.segments.iter().find_map(|segment| {
            if !segment.visible {
                return None;
            }
            let top = segment.high.max(segment.low);
            let bottom = segment.high.min(segment.low);
            let inside = (point.x - segment.x).abs() <= half_width
                && point.y >= bottom
                && point.y <= top;
            inside.then_some(segment.data_index)
        })
    }
}

/// HiLo stroke plus open/close ticks for one data point.
///
/// The open tick points left from the stroke, the close tick right; their
/// extents come from two spacing applications with swapped operands so each
/// side shrinks independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiLoOpenCloseSegment {
    pub data_index: usize,
    pub center_x: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
    pub open_tick_x: f64,
    pub close_tick_x: f64,
    pub visible: bool,
    pub selected: bool,
}

/// HiLoOpenClose series geometry facade.
#[derive(Debug, Clone, PartialEq)]
pub struct HiLoOpenCloseSeries {
    points: Vec<OhlcPoint>,
    segments: Vec<HiLoOpenCloseSegment>,
    adornments: Vec<Adornment>,
    tick_spacing: f64,
    cluster_index: usize,
    cluster_count: usize,
    empty_point_mode: EmptyPointMode,
    adornment_position: AdornmentPosition,
    selected_index: Option<usize>,
    dirty: bool,
}

impl Default for HiLoOpenCloseSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl HiLoOpenCloseSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            adornments: Vec::new(),
            tick_spacing: 0.0,
            cluster_index: 0,
            cluster_count: 1,
            empty_point_mode: EmptyPointMode::Gap,
            adornment_position: AdornmentPosition::TopAndBottom,
            selected_index: None,
            dirty: true,
        }
    }

    pub fn set_points(&mut self, points: Vec<OhlcPoint>) {
        debug!(count = points.len(), "set hilo open/close points");
        self.points = points;
        self.dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[OhlcPoint] {
        &self.points
    }

    pub fn set_tick_spacing(&mut self, spacing: f64) -> LayoutResult<()> {
        if spacing.is_nan() {
            return Err(LayoutError::InvalidConfig(
                "tick spacing must be a number".to_owned(),
            ));
        }
        self.tick_spacing = spacing;
        self.dirty = true;
        Ok(())
    }

    pub fn set_cluster(&mut self, index: usize, count: usize) -> LayoutResult<()> {
        if count == 0 || index >= count {
            return Err(LayoutError::InvalidConfig(format!(
                "cluster index {index} out of range for cluster of {count}"
            )));
        }
        self.cluster_index = index;
        self.cluster_count = count;
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
    pub fn segments(&self) -> &[HiLoOpenCloseSegment] {
        &self.segments
    }

    #[must_use]
    pub fn adornments(&self) -> &[Adornment] {
        &self.adornments
    }

    #[must_use]
    pub fn band(&self) -> SideBySideInfo {
        spacing::compute_band(self.cluster_index, self.cluster_count, 1.0)
    }

    pub fn layout(&mut self, ctx: &AxisContext) -> LayoutResult<()> {
        let count = self.points.len();
        let band = self.band();

        // Independent shrink per side: the second call swaps the operands so
        // the close tick keeps its own extent.
        let (open_tick, _) = spacing::apply_spacing(self.tick_spacing, band.start, band.end);
        let (close_tick, _) = spacing::apply_spacing(self.tick_spacing, band.end, band.start);

        let xs: Vec<f64> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| ctx.x_position(i, p.x))
            .collect();
        let mut opens: Vec<f64> = self.points.iter().map(|p| p.open).collect();
        let mut highs: Vec<f64> = self.points.iter().map(|p| p.high).collect();
        let mut lows: Vec<f64> = self.points.iter().map(|p| p.low).collect();
        let mut closes: Vec<f64> = self.points.iter().map(|p| p.close).collect();
        if self.empty_point_mode != EmptyPointMode::Gap {
            empty_points::revalidate(&mut opens, self.empty_point_mode);
            empty_points::revalidate(&mut highs, self.empty_point_mode);
            empty_points::revalidate(&mut lows, self.empty_point_mode);
            empty_points::revalidate(&mut closes, self.empty_point_mode);
        }

        let selected = self.selected_index;
        reconcile(
            &mut self.segments,
            count,
            |i| HiLoOpenCloseSegment {
                data_index: i,
                center_x: xs[i] + band.median,
                high: highs[i],
                low: lows[i],
                open: opens[i],
                close: closes[i],
                open_tick_x: xs[i] + open_tick,
                close_tick_x: xs[i] + close_tick,
                visible: !highs[i].is_nan() && !lows[i].is_nan(),
                selected: selected == Some(i),
            },
            |segment, i| {
                segment.data_index = i;
                segment.center_x = xs[i] + band.median;
                segment.high = highs[i];
                segment.low = lows[i];
                segment.open = opens[i];
                segment.close = closes[i];
                segment.open_tick_x = xs[i] + open_tick;
                segment.close_tick_x = xs[i] + close_tick;
                segment.visible = !highs[i].is_nan() && !lows[i].is_nan();
                segment.selected = selected == Some(i);
            },
        );

        populate_range_adornments(
            &mut self.adornments,
            count,
            self.adornment_position,
            false,
            ctx,
            band,
            |i| (xs[i], highs[i], lows[i]),
        );

        self.dirty = false;
        trace!(count, "hilo open/close layout pass");
        Ok(())
    }

    /// Rectangle-interval hit test over the tick-to-tick width.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        self.segments.iter().find_map(|segment| {
            if !segment.visible {
                return None;
            }
            let left = segment.open_tick_x.min(segment.close_tick_x);
            let right = segment.open_tick_x.max(segment.close_tick_x);
            let top = segment.high.max(segment.low);
            let bottom = segment.high.min(segment.low);
            let inside =
                point.x >= left && point.x <= right && point.y >= bottom && point.y <= top;
            inside.then_some(segment.data_index)
        })
    }
}
