use serde::{Deserialize, Serialize};

/// Horizontal band a clustered series occupies within one category slot.
///
/// Bands for the `count` series of one cluster tile `[-width/2, +width/2]`
/// around the category position with no gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideBySideInfo {
    pub start: f64,
    pub end: f64,
    pub median: f64,
    pub delta: f64,
}

impl SideBySideInfo {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            median: (start + end) / 2.0,
            delta: end - start,
        }
    }

    /// Band for a single un-clustered series: the full category slot.
    #[must_use]
    pub fn whole_slot() -> Self {
        Self::new(-0.5, 0.5)
    }
}

/// Computes the side-by-side band for one series of a cluster.
///
/// `series_index` is the series' position within the cluster, `series_count`
/// the cluster size, and `category_width` the total width of one category
/// slot in x units (1.0 for an ordinary category axis).
///
/// A zero cluster size degenerates to the whole slot rather than dividing
/// by zero.
#[must_use]
pub fn compute_band(series_index: usize, series_count: usize, category_width: f64) -> SideBySideInfo {
    if series_count == 0 {
        return SideBySideInfo::whole_slot();
    }

    let per_series = category_width / series_count as f64;
    let start = category_width * -0.5 + series_index as f64 * per_series;
    SideBySideInfo::new(start, start + per_series)
}

/// Shrinks a band symmetrically by `spacing * (right - left) / 2` from each side.
///
/// A spacing ratio outside `[0, 1]` is a configuration contradiction and is
/// ignored, returning the inputs unchanged. NaN inputs propagate; callers
/// pre-filter.
#[must_use]
pub fn apply_spacing(spacing: f64, left: f64, right: f64) -> (f64, f64) {
    if !(0.0..=1.0).contains(&spacing) {
        return (left, right);
    }

    let shrink = spacing * (right - left) / 2.0;
    (left + shrink, right - shrink)
}
