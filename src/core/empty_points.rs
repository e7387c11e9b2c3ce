use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Substitution policy for missing (NaN) values in a channel.
///
/// The policy itself is an external configuration choice; this module only
/// applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmptyPointMode {
    /// Leave the gap; path-building series break at the missing point.
    #[default]
    Gap,
    /// Substitute zero.
    Zero,
    /// Substitute the average of the numeric neighbors, clamped at the data
    /// boundary.
    Average,
}

/// Returns `true` when the channel contains at least one missing value.
#[must_use]
pub fn has_gaps(values: &[f64]) -> bool {
    values.iter().any(|v| v.is_nan())
}

/// Indices of missing values, in order.
#[must_use]
pub fn empty_indices(values: &[f64]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_nan())
        .map(|(i, _)| i)
        .collect()
}

/// Applies the substitution policy to every missing value, in place.
pub fn revalidate(values: &mut [f64], mode: EmptyPointMode) {
    let indices = empty_indices(values);
    revalidate_at(values, &indices, mode);
}

/// Applies the substitution policy at specific indices, in place.
///
/// Out-of-range indices are skipped, never fatal. Average substitution reads
/// neighbors sequentially, so an earlier substituted value feeds the next
/// gap of a run; boundary elements fall back to half the single neighbor.
pub fn revalidate_at(values: &mut [f64], indices: &[usize], mode: EmptyPointMode) {
    for &i in indices {
        if i >= values.len() {
            continue;
        }
        match mode {
            EmptyPointMode::Gap => {}
            EmptyPointMode::Zero => values[i] = 0.0,
            EmptyPointMode::Average => {
                let prev = (i > 0).then(|| nan_as_zero(values[i - 1]));
                let next = (i + 1 < values.len()).then(|| nan_as_zero(values[i + 1]));
                values[i] = match (prev, next) {
                    (Some(p), Some(n)) => (p + n) / 2.0,
                    (Some(p), None) => p / 2.0,
                    (None, Some(n)) => n / 2.0,
                    (None, None) => 0.0,
                };
            }
        }
    }
}

fn nan_as_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// Contiguous runs of non-missing values.
///
/// The spline/area family emits one segment per run instead of one per
/// point, so its reconciliation count comes from here.
#[must_use]
pub fn visible_runs(values: &[f64]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, value) in values.iter().enumerate() {
        if value.is_nan() {
            if let Some(start) = run_start.take() {
                runs.push(start..i);
            }
        } else if run_start.is_none() {
            run_start = Some(i);
        }
    }
    if let Some(start) = run_start {
        runs.push(start..values.len());
    }
    runs
}
