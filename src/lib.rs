//! series-geom: chart series segment and adornment layout engine.
//!
//! This crate turns bound data values (X/Y/High/Low/Open/Close/Size) and
//! chart configuration into renderable geometry: per-series segment lists,
//! adornment anchors, and the reconciliation discipline that keeps both in
//! sync with a data source of changing length.

pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod series;
pub mod telemetry;

pub use error::{LayoutError, LayoutResult};
pub use series::SeriesKind;
