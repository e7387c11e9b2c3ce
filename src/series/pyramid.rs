use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::adornment::{Adornment, LabelPlacement};
use crate::core::triangular::{self, TriangularMode};
use crate::core::{AxisContext, ChartPoint, XyPoint, reconcile::reconcile};
use crate::error::{LayoutError, LayoutResult};

/// Trapezoid geometry for one pyramid block in the unit layout box.
///
/// The apex sits at the top of the box, so block width grows linearly with
/// the vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PyramidSegment {
    pub data_index: usize,
    pub top_y: f64,
    pub bottom_y: f64,
    pub top_width: f64,
    pub bottom_width: f64,
    pub center_x: f64,
    pub value: f64,
    pub exploded: bool,
    pub visible: bool,
    pub selected: bool,
}

impl PyramidSegment {
    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom_y - self.top_y
    }
}

/// Pyramid series geometry facade.
///
/// Linear mode distributes block heights by value share; surface mode solves
/// the equal-area quadratic so each block's slice area matches its share.
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidSeries {
    points: Vec<XyPoint>,
    segments: Vec<PyramidSegment>,
    adornments: Vec<Adornment>,
    mode: TriangularMode,
    gap_ratio: f64,
    hidden_points: IndexSet<usize>,
    exploded_index: Option<usize>,
    explode_offset: f64,
    selected_index: Option<usize>,
    layout_scale: f64,
    dirty: bool,
}

impl Default for PyramidSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl PyramidSeries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            adornments: Vec::new(),
            mode: TriangularMode::Linear,
            gap_ratio: 0.0,
            hidden_points: IndexSet::new(),
            exploded_index: None,
            explode_offset: 0.05,
            selected_index: None,
            layout_scale: 1.0,
            dirty: true,
        }
    }

    pub fn set_points(&mut self, points: Vec<XyPoint>) {
        debug!(count = points.len(), "set pyramid points");
        self.points = points;
        self.hidden_points.retain(|&i| i < self.points.len());
        self.dirty = true;
    }

    #[must_use]
    pub fn points(&self) -> &[XyPoint] {
        &self.points
    }

    pub fn set_mode(&mut self, mode: TriangularMode) {
        self.mode = mode;
        self.dirty = true;
    }

    pub fn set_gap_ratio(&mut self, gap_ratio: f64) -> LayoutResult<()> {
        if gap_ratio.is_nan() {
            return Err(LayoutError::InvalidConfig(
                "gap ratio must be a number".to_owned(),
            ));
        }
        if !(0.0..1.0).contains(&gap_ratio) {
            warn!(gap_ratio, "gap ratio outside [0, 1) falls back to zero gaps");
        }
        self.gap_ratio = gap_ratio;
        self.dirty = true;
        Ok(())
    }

    pub fn set_point_visibility(&mut self, index: usize, point_visible: bool) {
        if index >= self.points.len() {
            warn!(index, "ignoring visibility toggle past data boundary");
            return;
        }
        let changed = if point_visible {
            self.hidden_points.shift_remove(&index)
        } else {
            self.hidden_points.insert(index)
        };
        if changed {
            self.dirty = true;
        }
    }

    #[must_use]
    pub fn is_point_visible(&self, index: usize) -> bool {
        !self.hidden_points.contains(&index)
    }

    pub fn set_exploded_index(&mut self, index: Option<usize>) {
        self.exploded_index = index;
        self.dirty = true;
    }

    pub fn set_explode_offset(&mut self, offset: f64) -> LayoutResult<()> {
        if !offset.is_finite() || offset < 0.0 {
            return Err(LayoutError::InvalidConfig(
                "explode offset must be finite and >= 0".to_owned(),
            ));
        }
        self.explode_offset = offset;
        self.dirty = true;
        Ok(())
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
    pub fn segments(&self) -> &[PyramidSegment] {
        &self.segments
    }

    #[must_use]
    pub fn adornments(&self) -> &[Adornment] {
        &self.adornments
    }

    /// Surface-accumulator normalization coefficient of the latest pass.
    #[must_use]
    pub fn layout_scale(&self) -> f64 {
        self.layout_scale
    }

    pub fn layout(&mut self, _ctx: &AxisContext) -> LayoutResult<()> {
        let values: Vec<f64> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if self.hidden_points.contains(&i) {
                    f64::NAN
                } else {
                    p.y
                }
            })
            .collect();

        let layout = triangular::layout_blocks(&values, self.mode, self.gap_ratio);
        self.layout_scale = layout.scale;

        let count = layout.blocks.len();
        let selected = self.selected_index;
        let exploded_index = self.exploded_index;
        let explode_offset = self.explode_offset;
        let points = &self.points;

        let build = |i: usize| -> PyramidSegment {
            let block = layout.blocks[i];
            let exploded = exploded_index == Some(i);
            let suppressed = block.height == 0.0 || block.height.is_nan();
            PyramidSegment {
                data_index: i,
                top_y: block.top,
                bottom_y: block.bottom(),
                top_width: block.top,
                bottom_width: block.bottom(),
                center_x: 0.5 + if exploded { explode_offset } else { 0.0 },
                value: points[i].y,
                exploded,
                visible: !suppressed,
                selected: selected == Some(i),
            }
        };

        reconcile(
            &mut self.segments,
            count,
            |i| build(i),
            |segment, i| *segment = build(i),
        );

        let segments = &self.segments;
        reconcile(
            &mut self.adornments,
            count,
            |i| Self::block_adornment(&segments[i]),
            |adornment, i| *adornment = Self::block_adornment(&segments[i]),
        );

        self.dirty = false;
        trace!(count, "pyramid layout pass");
        Ok(())
    }

    fn block_adornment(segment: &PyramidSegment) -> Adornment {
        let anchor = ChartPoint::new(segment.center_x, (segment.top_y + segment.bottom_y) / 2.0);
        Adornment::new(segment.data_index, anchor, LabelPlacement::Right)
            .with_visible(segment.visible)
    }

    /// Trapezoid containment hit test with the width interpolated at the
    /// query point's vertical offset.
    #[must_use]
    pub fn data_point_index(&self, point: ChartPoint) -> Option<usize> {
        self.segments.iter().find_map(|segment| {
            if !segment.visible || point.y < segment.top_y || point.y > segment.bottom_y {
                return None;
            }
            let height = segment.height();
            let t = if height > 0.0 {
                (point.y - segment.top_y) / height
            } else {
                0.0
            };
            let width = segment.top_width + (segment.bottom_width - segment.top_width) * t;
            ((point.x - segment.center_x).abs() <= width / 2.0).then_some(segment.data_index)
        })
    }
}
