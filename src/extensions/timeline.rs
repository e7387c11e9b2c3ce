//! Keyframe helpers that animate finished geometry.
//!
//! The timeline is purely arithmetic: `t` in `[0, 1]` comes from whatever
//! playback layer the host application uses. Layout computation never
//! consults it; interpolators here only derive animated variants of already
//! laid-out segments.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::series::{CandleSegment, FunnelSegment, PieSegment, PyramidSegment};

/// Per-index staggered progress over a normalized timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationTimeline {
    /// Fraction of the timeline spread across point start offsets; 0 plays
    /// every point in unison.
    stagger: f64,
}

impl Default for AnimationTimeline {
    fn default() -> Self {
        Self { stagger: 0.0 }
    }
}

impl AnimationTimeline {
    pub fn new(stagger: f64) -> LayoutResult<Self> {
        if !(0.0..1.0).contains(&stagger) {
            return Err(LayoutError::InvalidConfig(
                "stagger must be in [0, 1)".to_owned(),
            ));
        }
        Ok(Self { stagger })
    }

    /// Progress of point `index` of `count` at timeline position `t`.
    ///
    /// Every point finishes by `t = 1`; later indices start later when a
    /// stagger is configured.
    #[must_use]
    pub fn progress(&self, t: f64, index: usize, count: usize) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if count < 2 || self.stagger == 0.0 {
            return t;
        }
        let start = self.stagger * index as f64 / (count - 1) as f64;
        ((t - start) / (1.0 - self.stagger)).clamp(0.0, 1.0)
    }
}

/// Candle grow-from-median keyframe: body and wick scale out from their
/// respective midpoints.
#[must_use]
pub fn animate_candle(segment: &CandleSegment, progress: f64) -> CandleSegment {
    let p = progress.clamp(0.0, 1.0);
    let body_mid = (segment.open + segment.close) / 2.0;
    let wick_mid = (segment.high + segment.low) / 2.0;
    CandleSegment {
        open: body_mid + (segment.open - body_mid) * p,
        close: body_mid + (segment.close - body_mid) * p,
        high: wick_mid + (segment.high - wick_mid) * p,
        low: wick_mid + (segment.low - wick_mid) * p,
        ..*segment
    }
}

/// Circular sweep keyframe: the slice opens from its start angle.
#[must_use]
pub fn animate_slice(segment: &PieSegment, progress: f64) -> PieSegment {
    let p = progress.clamp(0.0, 1.0);
    PieSegment {
        sweep: segment.sweep * p,
        ..*segment
    }
}

/// Funnel block keyframe: height scales down from the block top.
#[must_use]
pub fn animate_funnel_block(segment: &FunnelSegment, progress: f64) -> FunnelSegment {
    let p = progress.clamp(0.0, 1.0);
    FunnelSegment {
        bottom_y: segment.top_y + segment.height() * p,
        ..*segment
    }
}

/// Pyramid block keyframe: height scales down from the block top.
#[must_use]
pub fn animate_pyramid_block(segment: &PyramidSegment, progress: f64) -> PyramidSegment {
    let p = progress.clamp(0.0, 1.0);
    PyramidSegment {
        bottom_y: segment.top_y + segment.height() * p,
        ..*segment
    }
}
