//! JSON scene snapshots for differential and regression tooling.

use serde::Serialize;

use crate::core::Adornment;
use crate::error::LayoutResult;
use crate::series::SeriesKind;

/// Serialized view of one series' finished geometry.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSnapshot {
    pub kind: &'static str,
    pub segment_count: usize,
    pub segments: serde_json::Value,
    pub adornments: Vec<Adornment>,
}

/// Full-scene snapshot of every series' segment and adornment collections.
///
/// Intended for differential testing: two snapshots of the same data and
/// configuration must serialize identically.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub series: Vec<SeriesSnapshot>,
}

impl SceneSnapshot {
    pub fn capture(series: &[SeriesKind]) -> LayoutResult<Self> {
        let mut snapshots = Vec::with_capacity(series.len());
        for kind in series {
            snapshots.push(snapshot_one(kind)?);
        }
        Ok(Self { series: snapshots })
    }

    pub fn to_json_string(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn snapshot_one(kind: &SeriesKind) -> LayoutResult<SeriesSnapshot> {
    let (name, segment_count, segments) = match kind {
        SeriesKind::Candle(series) => (
            "candle",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
        SeriesKind::HiLo(series) => (
            "hilo",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
        SeriesKind::HiLoOpenClose(series) => (
            "hilo_open_close",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
        SeriesKind::Bubble(series) => (
            "bubble",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
        SeriesKind::Pie(series) => (
            "pie",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
        SeriesKind::Funnel(series) => (
            "funnel",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
        SeriesKind::Pyramid(series) => (
            "pyramid",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
        SeriesKind::Polar(series) => (
            "polar",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
        SeriesKind::SplineRangeArea(series) => (
            "spline_range_area",
            series.segments().len(),
            serde_json::to_value(series.segments())?,
        ),
    };

    Ok(SeriesSnapshot {
        kind: name,
        segment_count,
        segments,
        adornments: kind.adornments().to_vec(),
    })
}
