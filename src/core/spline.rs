use serde::{Deserialize, Serialize};

use crate::core::ChartPoint;

/// Interpolation algorithm used by the spline series family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum SplineType {
    /// Tridiagonal natural cubic spline with zero endpoint curvature.
    #[default]
    Natural,
    /// Natural cubic spline with endpoint rows clamped to explicit slopes.
    Clamped { start_slope: f64, end_slope: f64 },
    /// Fritsch-Carlson style slope limiting; never overshoots locally
    /// monotonic data.
    Monotonic,
    /// Half-span tangents around each point.
    Cardinal,
}

/// Bezier control points for each gap between adjacent data points.
///
/// `starts[i]` / `ends[i]` are the control pair for the curve segment from
/// point `i` to point `i + 1`. The set is discarded and fully recomputed on
/// every layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlPointSet {
    pub starts: Vec<ChartPoint>,
    pub ends: Vec<ChartPoint>,
}

impl ControlPointSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            starts: Vec::with_capacity(capacity),
            ends: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn push_pair(&mut self, start: ChartPoint, end: ChartPoint) {
        self.starts.push(start);
        self.ends.push(end);
    }
}

/// Computes the control-point set for `spline` over parallel x/y sequences.
///
/// Inputs shorter than two points yield an empty set. Non-finite intermediate
/// slopes and zero-length intervals degrade to zero coefficients instead of
/// propagating division artifacts.
#[must_use]
pub fn compute(spline: SplineType, xs: &[f64], ys: &[f64]) -> ControlPointSet {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return ControlPointSet::default();
    }
    let xs = &xs[..n];
    let ys = &ys[..n];

    match spline {
        SplineType::Natural => natural_control_points(xs, ys, None),
        SplineType::Clamped {
            start_slope,
            end_slope,
        } => natural_control_points(xs, ys, Some((start_slope, end_slope))),
        SplineType::Monotonic => monotonic_control_points(xs, ys),
        SplineType::Cardinal => cardinal_control_points(xs, ys),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Second derivatives of the cubic spline through `(xs, ys)`.
///
/// Thomas-algorithm forward sweep and back substitution. `clamped` selects
/// the endpoint rows: `None` pins the endpoint curvature to zero, otherwise
/// the rows are derived from the supplied endpoint slopes.
#[must_use]
pub fn natural_spline_coefficients(xs: &[f64], ys: &[f64], clamped: Option<(f64, f64)>) -> Vec<f64> {
    let n = xs.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut ys2 = vec![0.0; n];
    let mut u = vec![0.0; n];

    if let Some((start_slope, _)) = clamped {
        let dx = xs[1] - xs[0];
        let secant = finite_or_zero((ys[1] - ys[0]) / dx);
        ys2[0] = -0.5;
        u[0] = finite_or_zero((3.0 / dx) * (secant - start_slope));
    }

    for i in 1..n - 1 {
        let span = xs[i + 1] - xs[i - 1];
        let sig = finite_or_zero((xs[i] - xs[i - 1]) / span);
        let p = sig * ys2[i - 1] + 2.0;
        ys2[i] = finite_or_zero((sig - 1.0) / p);

        let dd = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
            - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = finite_or_zero((6.0 * finite_or_zero(dd) / span - sig * u[i - 1]) / p);
    }

    let (qn, un) = match clamped {
        None => (0.0, 0.0),
        Some((_, end_slope)) => {
            let dx = xs[n - 1] - xs[n - 2];
            let secant = finite_or_zero((ys[n - 1] - ys[n - 2]) / dx);
            (0.5, finite_or_zero((3.0 / dx) * (end_slope - secant)))
        }
    };
    ys2[n - 1] = finite_or_zero((un - qn * u[n - 2]) / (qn * ys2[n - 2] + 1.0));

    for k in (0..n - 1).rev() {
        ys2[k] = finite_or_zero(ys2[k] * ys2[k + 1] + u[k]);
    }

    ys2
}

fn natural_control_points(xs: &[f64], ys: &[f64], clamped: Option<(f64, f64)>) -> ControlPointSet {
    let coefficients = natural_spline_coefficients(xs, ys, clamped);
    let mut set = ControlPointSet::with_capacity(xs.len() - 1);
    for i in 0..xs.len() - 1 {
        let (start, end) = bezier_control_points(
            ChartPoint::new(xs[i], ys[i]),
            ChartPoint::new(xs[i + 1], ys[i + 1]),
            coefficients[i],
            coefficients[i + 1],
        );
        set.push_pair(start, end);
    }
    set
}

/// Converts one cubic-spline interval to its Bezier control pair.
///
/// `ys1` / `ys2` are the spline's second derivatives at the interval ends.
#[must_use]
pub fn bezier_control_points(
    p1: ChartPoint,
    p2: ChartPoint,
    ys1: f64,
    ys2: f64,
) -> (ChartPoint, ChartPoint) {
    let dx2 = (p2.x - p1.x).powi(2) / 3.0;

    let start = ChartPoint::new(
        (2.0 * p1.x + p2.x) / 3.0,
        (2.0 * p1.y + p2.y - dx2 * (ys1 + ys2 / 2.0)) / 3.0,
    );
    let end = ChartPoint::new(
        (p1.x + 2.0 * p2.x) / 3.0,
        (p1.y + 2.0 * p2.y - dx2 * (ys1 / 2.0 + ys2)) / 3.0,
    );
    (start, end)
}

/// Per-point tangent coefficients for the monotonic spline.
///
/// Interior points with opposite-sign (or zero) adjacent slopes are forced
/// flat, which is what prevents overshoot between monotonic samples.
#[must_use]
pub fn monotonic_coefficients(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut dx = Vec::with_capacity(n - 1);
    let mut slopes = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let d = xs[i + 1] - xs[i];
        dx.push(d);
        slopes.push(finite_or_zero((ys[i + 1] - ys[i]) / d));
    }

    let mut coefficients = vec![0.0; n];
    coefficients[0] = slopes[0];
    coefficients[n - 1] = slopes[n - 2];
    for i in 1..n - 1 {
        let (m1, m2) = (slopes[i - 1], slopes[i]);
        if m1 * m2 <= 0.0 {
            continue;
        }
        let (d1, d2) = (dx[i - 1], dx[i]);
        coefficients[i] = finite_or_zero(
            3.0 * (d1 + d2) / ((d1 + 2.0 * d2) / m1 + (2.0 * d1 + d2) / m2),
        );
    }
    coefficients
}

fn monotonic_control_points(xs: &[f64], ys: &[f64]) -> ControlPointSet {
    let coefficients = monotonic_coefficients(xs, ys);
    let mut set = ControlPointSet::with_capacity(xs.len() - 1);
    for i in 0..xs.len() - 1 {
        let third = finite_or_zero((xs[i + 1] - xs[i]) / 3.0);
        set.push_pair(
            ChartPoint::new(xs[i] + third, ys[i] + coefficients[i] * third),
            ChartPoint::new(xs[i + 1] - third, ys[i + 1] - coefficients[i + 1] * third),
        );
    }
    set
}

fn cardinal_control_points(xs: &[f64], ys: &[f64]) -> ControlPointSet {
    let n = xs.len();
    let mut tangents_x = Vec::with_capacity(n);
    let mut tangents_y = Vec::with_capacity(n);
    for i in 0..n {
        let (tx, ty) = if i == 0 {
            (xs[1] - xs[0], ys[1] - ys[0])
        } else if i == n - 1 {
            (xs[n - 1] - xs[n - 2], ys[n - 1] - ys[n - 2])
        } else {
            (0.5 * (xs[i + 1] - xs[i - 1]), 0.5 * (ys[i + 1] - ys[i - 1]))
        };
        tangents_x.push(finite_or_zero(tx));
        tangents_y.push(finite_or_zero(ty));
    }

    let mut set = ControlPointSet::with_capacity(n - 1);
    for i in 0..n - 1 {
        set.push_pair(
            ChartPoint::new(xs[i] + tangents_x[i] / 3.0, ys[i] + tangents_y[i] / 3.0),
            ChartPoint::new(
                xs[i + 1] - tangents_x[i + 1] / 3.0,
                ys[i + 1] - tangents_y[i + 1] / 3.0,
            ),
        );
    }
    set
}
