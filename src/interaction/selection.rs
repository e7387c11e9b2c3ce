use serde::{Deserialize, Serialize};

use crate::core::ChartPoint;
use crate::series::SeriesKind;

/// Hit-test driven selection with toggle-on-repeat semantics.
///
/// The state lives outside the facades so one behavior instance can drive
/// any series kind; the facades only carry the resulting `selected` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectionState {
    selected: Option<usize>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(self) -> Option<usize> {
        self.selected
    }

    /// Feeds a hit-test result: hitting the already-selected index clears
    /// the selection, hitting another selects it, missing changes nothing.
    pub fn on_hit(&mut self, hit: Option<usize>) -> Option<usize> {
        if let Some(index) = hit {
            self.selected = if self.selected == Some(index) {
                None
            } else {
                Some(index)
            };
        }
        self.selected
    }

    /// Runs the series' own hit test at `point` and applies the toggle,
    /// pushing the updated selection into the facade.
    pub fn select_at(&mut self, series: &mut SeriesKind, point: ChartPoint) -> Option<usize> {
        let hit = series.data_point_index(point);
        let selected = self.on_hit(hit);
        series.set_selected_index(selected);
        selected
    }

    pub fn clear(&mut self, series: &mut SeriesKind) {
        self.selected = None;
        series.set_selected_index(None);
    }
}
