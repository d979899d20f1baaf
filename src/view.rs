use tracing::debug;

use crate::dataset::WasteDataset;
use crate::models::{Aggregation, Selection, WasteRecord};

/// Read-only view over the loaded dataset that answers chart queries
#[derive(Debug, Clone)]
pub struct WasteDataView {
    dataset: WasteDataset,
}

impl WasteDataView {
    pub fn new(dataset: WasteDataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &WasteDataset {
        &self.dataset
    }

    pub fn buildings(&self) -> Vec<String> {
        self.dataset.buildings()
    }

    pub fn streams(&self) -> Vec<String> {
        self.dataset.streams()
    }

    /// Records whose building and stream are both selected, in load order.
    /// An empty dimension selects nothing.
    pub fn filter_records(&self, selection: &Selection) -> Vec<&WasteRecord> {
        if selection.is_empty() {
            return Vec::new();
        }

        let rows: Vec<&WasteRecord> = self
            .dataset
            .records()
            .iter()
            .filter(|r| selection.matches(r))
            .collect();

        debug!(
            "Filtered {} of {} records for {} buildings x {} streams",
            rows.len(),
            self.dataset.len(),
            selection.buildings.len(),
            selection.streams.len()
        );
        rows
    }

    /// Total weight per (building, stream) pair in the filtered rows.
    /// Pairs without records are absent rather than zero.
    pub fn aggregate_by_building_and_stream(&self, selection: &Selection) -> Aggregation {
        let mut totals = Aggregation::new();
        for record in self.filter_records(selection) {
            *totals
                .entry((record.building.clone(), record.stream.clone()))
                .or_insert(0.0) += record.weight;
        }
        totals
    }

    /// Selection used when the dashboard first opens: the first building and the first stream
    pub fn default_selection(&self) -> Selection {
        Selection::new(
            self.dataset.buildings().into_iter().take(1),
            self.dataset.streams().into_iter().take(1),
        )
    }

    /// Every building and every stream
    pub fn full_selection(&self) -> Selection {
        Selection::new(self.dataset.buildings(), self.dataset.streams())
    }
}
