use serde::{Deserialize, Serialize};

/// Height-distribution algorithm for funnel and pyramid stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TriangularMode {
    /// Block height proportional to its value share ("value is height").
    #[default]
    Linear,
    /// Equal-area slices: block height solved so the trapezoid/triangle
    /// slice area matches the value share ("value is width" / "surface").
    Surface,
}

/// One stacked block in the unit layout box, top-down.
///
/// NaN source values produce zero-height blocks that keep their index slot
/// so reconciliation still aligns by index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangularBlock {
    pub data_index: usize,
    pub top: f64,
    pub height: f64,
}

impl TriangularBlock {
    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Result of a triangular layout pass.
///
/// `scale` is the final normalization coefficient applied to the surface
/// accumulator (1.0 for the linear mode); callers reconstructing slice areas
/// divide the normalized extents back out by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TriangularLayout {
    pub blocks: Vec<TriangularBlock>,
    pub scale: f64,
}

/// Distributes `values` into stacked blocks of the unit box.
///
/// `gap_ratio` reserves a fraction of the box for inter-block gaps; an
/// out-of-range ratio is a configuration contradiction and falls back to
/// zero gaps.
#[must_use]
pub fn layout_blocks(values: &[f64], mode: TriangularMode, gap_ratio: f64) -> TriangularLayout {
    let gap_ratio = if (0.0..1.0).contains(&gap_ratio) {
        gap_ratio
    } else {
        0.0
    };

    match mode {
        TriangularMode::Linear => layout_linear(values, gap_ratio),
        TriangularMode::Surface => layout_surface(values, gap_ratio),
    }
}

fn magnitude_total(values: &[f64]) -> f64 {
    values.iter().filter(|v| !v.is_nan()).map(|v| v.abs()).sum()
}

fn gap_step(gap_ratio: f64, count: usize) -> f64 {
    if count > 1 {
        gap_ratio / (count - 1) as f64
    } else {
        0.0
    }
}

fn layout_linear(values: &[f64], gap_ratio: f64) -> TriangularLayout {
    let count = values.len();
    let total = magnitude_total(values);
    let height_scale = 1.0 / (1.0 + gap_ratio / (1.0 - gap_ratio));
    let gap = gap_step(gap_ratio, count);

    let mut blocks = Vec::with_capacity(count);
    let mut curr_y = 0.0;
    for (i, &value) in values.iter().enumerate() {
        let height = if value.is_nan() || total == 0.0 {
            0.0
        } else {
            value.abs() / total * height_scale
        };
        blocks.push(TriangularBlock {
            data_index: i,
            top: curr_y,
            height,
        });
        curr_y += height + gap;
    }

    TriangularLayout { blocks, scale: 1.0 }
}

fn layout_surface(values: &[f64], gap_ratio: f64) -> TriangularLayout {
    let count = values.len();
    let total = magnitude_total(values);
    let gap = gap_step(gap_ratio, count);

    let mut blocks = Vec::with_capacity(count);
    let mut y: f64 = 0.0;
    for (i, &value) in values.iter().enumerate() {
        if i > 0 {
            y += gap;
        }
        let surface = if value.is_nan() || total == 0.0 {
            0.0
        } else {
            value.abs() / total
        };

        // Positive root of h^2 + 2*y*h - surface = 0; a negative discriminant
        // propagates NaN so the block renders as nothing.
        let discriminant = 4.0 * y * y + 4.0 * surface;
        let root = discriminant.sqrt();
        let height = ((-2.0 * y + root) / 2.0).max((-2.0 * y - root) / 2.0);

        blocks.push(TriangularBlock {
            data_index: i,
            top: y,
            height,
        });
        y += height;
    }

    let scale = if y > 0.0 && y.is_finite() { 1.0 / y } else { 1.0 };
    for block in &mut blocks {
        block.top *= scale;
        block.height *= scale;
    }

    TriangularLayout { blocks, scale }
}
