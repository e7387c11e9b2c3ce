use serde::{Deserialize, Serialize};

/// Inclusive numeric range used for axis windows and value extents.
///
/// The empty range is represented with an inverted sentinel pair so that
/// `union` can start from `empty()` without special-casing the first value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub start: f64,
    pub end: f64,
}

impl NumericRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Range containing no values.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            start: f64::MAX,
            end: f64::MIN,
        }
    }

    /// Range containing every finite value.
    #[must_use]
    pub fn full() -> Self {
        Self {
            start: f64::MIN,
            end: f64::MAX,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start > self.end
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.end - self.start
        }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }

    /// Smallest range covering both operands.
    #[must_use]
    pub fn union(self, other: NumericRange) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Grows the range to include `value`; NaN values are ignored.
    #[must_use]
    pub fn union_value(self, value: f64) -> Self {
        if value.is_nan() {
            return self;
        }
        if self.is_empty() {
            return Self {
                start: value,
                end: value,
            };
        }
        Self {
            start: self.start.min(value),
            end: self.end.max(value),
        }
    }

    #[must_use]
    pub fn intersects(self, other: NumericRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start <= other.end && other.start <= self.end
    }
}
