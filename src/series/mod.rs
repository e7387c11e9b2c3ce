pub mod bubble;
pub mod candle;
pub mod funnel;
pub mod hilo;
pub mod pie;
pub mod polar;
pub mod pyramid;
pub mod spline_range_area;

pub use bubble::{BubbleSegment, BubbleSeries};
pub use candle::{CandleSegment, CandleSeries, FinancialComparisonMode};
pub use funnel::{FunnelSegment, FunnelSeries};
pub use hilo::{HiLoOpenCloseSegment, HiLoOpenCloseSeries, HiLoSegment, HiLoSeries};
pub use pie::{PieSegment, PieSeries};
pub use polar::{PolarDrawKind, PolarSegment, PolarSeries};
pub use pyramid::{PyramidSegment, PyramidSeries};
pub use spline_range_area::{SplineRangeAreaSegment, SplineRangeAreaSeries};

use crate::core::adornment::{self, Adornment, AdornmentPosition};
use crate::core::{AxisContext, ChartPoint, SideBySideInfo, reconcile::reconcile};
use crate::error::LayoutResult;

/// Tagged variant selecting one series geometry facade.
///
/// Shared capabilities (spacing, empty-point handling, reconciliation) live
/// in `core` and are invoked by each facade; there is no base-class state.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKind {
    Candle(CandleSeries),
    HiLo(HiLoSeries),
    HiLoOpenClose(HiLoOpenCloseSeries),
    Bubble(BubbleSeries),
    Pie(PieSeries),
    Funnel(FunnelSeries),
    Pyramid(PyramidSeries),
    Polar(PolarSeries),
    SplineRangeArea(SplineRangeAreaSeries),
}

impl SeriesKind {
    /// Recomputes the facade's geometry when it is dirty.
    pub fn layout(&mut self, ctx: &AxisContext) -> LayoutResult<()> {
        match self {
            SeriesKind::Candle(series) => series.layout(ctx),
            SeriesKind::HiLo(series) => series.layout(ctx),
            SeriesKind::HiLoOpenClose(series) => series.layout(ctx),
            SeriesKind::Bubble(series) => series.layout(ctx),
            SeriesKind::Pie(series) => series.layout(ctx),
            SeriesKind::Funnel(series) => series.layout(ctx),
            SeriesKind::Pyramid(series) => series.layout(ctx),
            SeriesKind::Polar(series) => series.layout(ctx),
            SeriesKind::SplineRangeArea(series) => series.layout(ctx),
        }
    }

    /// Reverse lookup from a geometric point to the owning data index.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        match self {
            SeriesKind::Candle(series) => series.data_point_index(point),
            SeriesKind::HiLo(series) => series.data_point_index(point),
            SeriesKind::HiLoOpenClose(series) => series.data_point_index(point),
            SeriesKind::Bubble(series) => series.data_point_index(point),
            SeriesKind::Pie(series) => series.data_point_index(point),
            SeriesKind::Funnel(series) => series.data_point_index(point),
            SeriesKind::Pyramid(series) => series.data_point_index(point),
            SeriesKind::Polar(series) => series.data_point_index(point),
            SeriesKind::SplineRangeArea(series) => series.data_point_index(point),
        }
    }

    /// Pushes a selection into the facade. Run-based series (polar, spline
    /// range area) carry no per-segment selection flag and ignore this.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        match self {
            SeriesKind::Candle(series) => series.set_selected_index(index),
            SeriesKind::HiLo(series) => series.set_selected_index(index),
            SeriesKind::HiLoOpenClose(series) => series.set_selected_index(index),
            SeriesKind::Bubble(series) => series.set_selected_index(index),
            SeriesKind::Pie(series) => series.set_selected_index(index),
            SeriesKind::Funnel(series) => series.set_selected_index(index),
            SeriesKind::Pyramid(series) => series.set_selected_index(index),
            SeriesKind::Polar(_) | SeriesKind::SplineRangeArea(_) => {}
        }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        match self {
            SeriesKind::Candle(series) => series.is_dirty(),
            SeriesKind::HiLo(series) => series.is_dirty(),
            SeriesKind::HiLoOpenClose(series) => series.is_dirty(),
            SeriesKind::Bubble(series) => series.is_dirty(),
            SeriesKind::Pie(series) => series.is_dirty(),
            SeriesKind::Funnel(series) => series.is_dirty(),
            SeriesKind::Pyramid(series) => series.is_dirty(),
            SeriesKind::Polar(series) => series.is_dirty(),
            SeriesKind::SplineRangeArea(series) => series.is_dirty(),
        }
    }

    #[must_use]
    pub fn adornments(&self) -> &[Adornment] {
        match self {
            SeriesKind::Candle(series) => series.adornments(),
            SeriesKind::HiLo(series) => series.adornments(),
            SeriesKind::HiLoOpenClose(series) => series.adornments(),
            SeriesKind::Bubble(series) => series.adornments(),
            SeriesKind::Pie(series) => series.adornments(),
            SeriesKind::Funnel(series) => series.adornments(),
            SeriesKind::Pyramid(series) => series.adornments(),
            SeriesKind::Polar(series) => series.adornments(),
            SeriesKind::SplineRangeArea(series) => series.adornments(),
        }
    }
}

/// Populates a range-style adornment collection in lockstep with segments.
///
/// `channel` resolves `(x, high, low)` for a data index. The per-point
/// multiplier follows the position mode: one anchor, a top/bottom pair, or
/// the pair duplicated at the group-start and group-end edges of the band
/// when the category axis is grouped. The shared routine takes capability
/// flags, never series identity.
pub(crate) fn populate_range_adornments(
    adornments: &mut Vec<Adornment>,
    count: usize,
    position: AdornmentPosition,
    is_single_value_range: bool,
    ctx: &AxisContext,
    band: SideBySideInfo,
    mut channel: impl FnMut(usize) -> (f64, f64, f64),
) {
    let per_point = adornment::anchors_per_point(position, ctx.is_indexed);

    let mut desired: Vec<Adornment> = Vec::with_capacity(count * per_point);
    for i in 0..count {
        let (x, high, low) = channel(i);
        if per_point == 4 {
            for edge in [band.start, band.end] {
                desired.extend(adornment::place_anchors(
                    i,
                    x + edge,
                    high,
                    low,
                    position,
                    is_single_value_range,
                    ctx,
                ));
            }
        } else {
            desired.extend(adornment::place_anchors(
                i,
                x + band.median,
                high,
                low,
                position,
                is_single_value_range,
                ctx,
            ));
        }
    }

    let new_count = desired.len();
    reconcile(
        adornments,
        new_count,
        |i| desired[i],
        |slot, i| *slot = desired[i],
    );
}
