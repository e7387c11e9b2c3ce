use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::adornment::{Adornment, AdornmentPosition};
use crate::core::{
    AxisContext, ChartPoint, EmptyPointMode, OhlcPoint, SideBySideInfo, empty_points,
    reconcile::reconcile, spacing,
};
use crate::error::{LayoutError, LayoutResult};
use crate::series::populate_range_adornments;

/// How a candle decides its bullish/bearish fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FinancialComparisonMode {
    /// Compare open against close of the same sample.
    #[default]
    None,
    /// Compare close against the previous sample's close; the first sample
    /// falls back to its own open/close.
    PreviousClose,
}

/// Geometry for one candle, in data space.
///
/// The body rectangle spans `(body_left, open)` to `(body_right, close)`;
/// the wick runs from `low` to `high` through `center_x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleSegment {
    pub data_index: usize,
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub is_bull: bool,
    pub visible: bool,
    pub selected: bool,
}

impl CandleSegment {
    /// Body rectangle corners: `(x + left, open)` and `(x + right, close)`.
    #[must_use]
    pub fn body_corners(self) -> (ChartPoint, ChartPoint) {
        (
            ChartPoint::new(self.body_left, self.open),
            ChartPoint::new(self.body_right, self.close),
        )
    }
}

/// Candle series geometry facade.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    points: Vec<OhlcPoint>,
    segments: Vec<CandleSegment>,
    adornments: Vec<Adornment>,
    spacing: f64,
    cluster_index: usize,
    cluster_count: usize,
    comparison_mode: FinancialComparisonMode,
    empty_point_mode: EmptyPointMode,
    adornment_position: AdornmentPosition,
    selected_index: Option<usize>,
    dirty: bool,
}

impl Default for CandleSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            adornments: Vec::new(),
            spacing: 0.0,
            cluster_index: 0,
            cluster_count: 1,
            comparison_mode: FinancialComparisonMode::None,
            empty_point_mode: EmptyPointMode::Gap,
            adornment_position: AdornmentPosition::Top,
            selected_index: None,
            dirty: true,
        }
    }

    /// Replaces the bound samples.
    pub fn set_points(&mut self, points: Vec<OhlcPoint>) {
        debug!(count = points.len(), "set candle points");
        self.points = points;
        self.dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[OhlcPoint] {
        &self.points
    }

    /// Sets the band-shrink ratio. Values outside `[0, 1]` are kept but have
    /// no effect on the band, matching the spacing no-op contract.
    pub fn set_spacing(&mut self, spacing: f64) -> LayoutResult<()> {
        if spacing.is_nan() {
            return Err(LayoutError::InvalidConfig(
                "spacing must be a number".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&spacing) {
            warn!(spacing, "spacing outside [0, 1] leaves the band unchanged");
        }
        self.spacing = spacing;
        self.dirty = true;
        Ok(())
    }

    /// Declares this series' slot within a side-by-side cluster.
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

    pub fn set_comparison_mode(&mut self, mode: FinancialComparisonMode) {
        self.comparison_mode = mode;
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

    /// Moves the selection; out-of-range indices clear it rather than fail.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected_index = index.filter(|&i| i < self.points.len());
        for segment in &mut self.segments {
            segment.selected = Some(segment.data_index) == self.selected_index;
        }
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub fn segments(&self) -> &[CandleSegment] {
        &self.segments
    }

    #[must_use]
    pub fn adornments(&self) -> &[Adornment] {
        &self.adornments
    }

    /// Side-by-side band after spacing is applied.
    #[must_use]
    pub fn band(&self) -> SideBySideInfo {
        let base = spacing::compute_band(self.cluster_index, self.cluster_count, 1.0);
        let (left, right) = spacing::apply_spacing(self.spacing, base.start, base.end);
        SideBySideInfo::new(left, right)
    }

    /// Recomputes segments and adornments from the bound samples.
    pub fn layout(&mut self, ctx: &AxisContext) -> LayoutResult<()> {
        let count = self.points.len();
        let band = self.band();

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

        let comparison = self.comparison_mode;
        let selected = self.selected_index;
        let project = |i: usize| -> CandleSegment {
            let (open, high, low, close) = (opens[i], highs[i], lows[i], closes[i]);
            let is_bull = match comparison {
                FinancialComparisonMode::None => open < close,
                FinancialComparisonMode::PreviousClose => {
                    if i == 0 || closes[i - 1].is_nan() {
                        open < close
                    } else {
                        close >= closes[i - 1]
                    }
                }
            };
            let has_gap =
                open.is_nan() || high.is_nan() || low.is_nan() || close.is_nan();
            CandleSegment {
                data_index: i,
                center_x: xs[i] + band.median,
                body_left: xs[i] + band.start,
                body_right: xs[i] + band.end,
                open,
                close,
                high,
                low,
                is_bull,
                visible: !has_gap,
                selected: selected == Some(i),
            }
        };

        #[cfg(feature = "parallel-projection")]
        let desired: Vec<CandleSegment> = (0..count).into_par_iter().map(project).collect();

        #[cfg(not(feature = "parallel-projection"))]
        let desired: Vec<CandleSegment> = (0..count).map(project).collect();

        reconcile(
            &mut self.segments,
            count,
            |i| desired[i],
            |segment, i| *segment = desired[i],
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
        trace!(count, "candle layout pass");
        Ok(())
    }

    /// Rectangle-interval hit test over the candle's body width and full
    /// high/low extent.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        self.segments.iter().find_map(|segment| {
            if !segment.visible {
                return None;
            }
            let top = segment.high.max(segment.low);
            let bottom = segment.high.min(segment.low);
            let inside = point.x >= segment.body_left
                && point.x <= segment.body_right
                && point.y >= bottom
                && point.y <= top;
            inside.then_some(segment.data_index)
        })
    }
}
