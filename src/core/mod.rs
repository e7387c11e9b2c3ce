pub mod adornment;
pub mod circular;
pub mod empty_points;
pub mod numeric_range;
pub mod primitives;
pub mod reconcile;
pub mod spacing;
pub mod spline;
pub mod triangular;
pub mod types;

pub use adornment::{Adornment, AdornmentPosition, LabelPlacement};
pub use circular::{ArcSlice, CircularGroupMode, GroupAggregate, GroupingPolicy};
pub use empty_points::EmptyPointMode;
pub use numeric_range::NumericRange;
pub use reconcile::reconcile;
pub use spacing::SideBySideInfo;
pub use spline::{ControlPointSet, SplineType};
pub use triangular::{TriangularBlock, TriangularLayout, TriangularMode};
pub use types::{AxisContext, BubblePoint, ChartPoint, OhlcPoint, RangePoint, XyPoint};
