use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::NumericRange;
use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{LayoutError, LayoutResult};

/// Point in series data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: ChartPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Single-value sample consumed by pie, funnel, pyramid, polar, and spline series.
///
/// `y` may be NaN to flag an empty point; `x` must always be finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

impl XyPoint {
    pub fn new(x: f64, y: f64) -> LayoutResult<Self> {
        if !x.is_finite() {
            return Err(LayoutError::InvalidData(
                "point x must be finite".to_owned(),
            ));
        }
        Ok(Self { x, y })
    }

    /// Empty-point sample: position is kept, value channel carries NaN.
    pub fn empty(x: f64) -> LayoutResult<Self> {
        Self::new(x, f64::NAN)
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> LayoutResult<Self> {
        Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(value, "value")?,
        )
    }

    #[must_use]
    pub fn is_empty_point(self) -> bool {
        self.y.is_nan()
    }
}

/// High/low sample consumed by HiLo and range series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePoint {
    pub x: f64,
    pub high: f64,
    pub low: f64,
}

impl RangePoint {
    pub fn new(x: f64, high: f64, low: f64) -> LayoutResult<Self> {
        if !x.is_finite() {
            return Err(LayoutError::InvalidData(
                "point x must be finite".to_owned(),
            ));
        }
        Ok(Self { x, high, low })
    }

    #[must_use]
    pub fn is_empty_point(self) -> bool {
        self.high.is_nan() || self.low.is_nan()
    }
}

/// Canonical OHLC sample consumed by candle and HiLoOpenClose series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    pub x: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcPoint {
    /// Builds a validated OHLC sample from raw floating values.
    ///
    /// Invariants (checked only when every channel is numeric, so empty
    /// points can still flow through as NaN):
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(x: f64, open: f64, high: f64, low: f64, close: f64) -> LayoutResult<Self> {
        if !x.is_finite() {
            return Err(LayoutError::InvalidData(
                "point x must be finite".to_owned(),
            ));
        }

        let all_numeric =
            open.is_finite() && high.is_finite() && low.is_finite() && close.is_finite();
        if all_numeric {
            if low > high {
                return Err(LayoutError::InvalidData(
                    "ohlc low must be <= high".to_owned(),
                ));
            }
            if open < low || open > high || close < low || close > high {
                return Err(LayoutError::InvalidData(
                    "ohlc open/close must be within low/high range".to_owned(),
                ));
            }
        }

        Ok(Self {
            x,
            open,
            high,
            low,
            close,
        })
    }

    /// Empty-point sample: position is kept, every value channel carries NaN.
    pub fn empty(x: f64) -> LayoutResult<Self> {
        Self::new(x, f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    /// Converts strongly-typed temporal/decimal input into a validated OHLC sample.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> LayoutResult<Self> {
        Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Returns `true` when close is greater than or equal to open.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }

    #[must_use]
    pub fn is_empty_point(self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }
}

/// X/Y/size sample consumed by bubble series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl BubblePoint {
    pub fn new(x: f64, y: f64, size: f64) -> LayoutResult<Self> {
        if !x.is_finite() {
            return Err(LayoutError::InvalidData(
                "point x must be finite".to_owned(),
            ));
        }
        Ok(Self { x, y, size })
    }

    #[must_use]
    pub fn is_empty_point(self) -> bool {
        self.y.is_nan()
    }
}

/// Axis state handed to the facades by the (external) axis/category service.
///
/// The core never computes axis transforms itself; it only consumes resolved
/// x positions, the category-indexing flag, the visible range used for
/// viewport-limited adornment population, and the orientation flag pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisContext {
    /// When `true`, the x axis is a grouped/indexed category axis and every
    /// data point occupies its ordinal slot `0..count`.
    pub is_indexed: bool,
    /// Visible x window; adornments outside it are not populated.
    pub visible_range: NumericRange,
    pub is_transposed: bool,
    pub is_y_inverse: bool,
}

impl Default for AxisContext {
    fn default() -> Self {
        Self {
            is_indexed: false,
            visible_range: NumericRange::full(),
            is_transposed: false,
            is_y_inverse: false,
        }
    }
}

impl AxisContext {
    #[must_use]
    pub fn indexed() -> Self {
        Self {
            is_indexed: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_visible_range(mut self, range: NumericRange) -> Self {
        self.visible_range = range;
        self
    }

    #[must_use]
    pub fn with_transposed(mut self, transposed: bool) -> Self {
        self.is_transposed = transposed;
        self
    }

    #[must_use]
    pub fn with_y_inverse(mut self, inverse: bool) -> Self {
        self.is_y_inverse = inverse;
        self
    }

    /// Resolves the effective x position for data index `i`.
    #[must_use]
    pub fn x_position(&self, i: usize, raw_x: f64) -> f64 {
        if self.is_indexed { i as f64 } else { raw_x }
    }
}
