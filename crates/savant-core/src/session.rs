// Caller-owned analysis session: one dataset with its current mapping and
// weights. Every recalculation reads the same dataset; only the mapping and
// the weights change between calls.

use crate::composite::{compute_composite, CompositeWeights, InvalidWeight, WeightField};
use crate::dataset::Dataset;
use crate::mapping::ColumnMapping;
use crate::resolver::resolve_mapping;
use crate::table::{build_composite_table, build_percentile_table, CompositeTable, PercentileTable};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    mapping: ColumnMapping,
    weights: CompositeWeights,
}

impl Session {
    /// Start a session with the suggested mapping and default weights.
    pub fn new(dataset: Dataset) -> Self {
        let mapping = resolve_mapping(&dataset.headers());
        info!(
            "session started: {} columns, {} rows, {} metrics auto-mapped",
            dataset.columns().len(),
            dataset.row_count(),
            mapping.metrics.len()
        );
        Self {
            dataset,
            mapping,
            weights: CompositeWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: CompositeWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn weights(&self) -> &CompositeWeights {
        &self.weights
    }

    /// Replace the mapping, e.g. after the user edits the suggestion.
    pub fn set_mapping(&mut self, mapping: ColumnMapping) {
        self.mapping = mapping;
    }

    /// Apply raw weight overrides; rejected values keep the previous weight.
    pub fn update_weights<'a, I>(&mut self, overrides: I) -> Vec<InvalidWeight>
    where
        I: IntoIterator<Item = (WeightField, &'a str)>,
    {
        self.weights.apply_overrides(overrides)
    }

    pub fn percentile_table(&self) -> PercentileTable {
        build_percentile_table(&self.dataset, &self.mapping)
    }

    pub fn composite(&self) -> Vec<f64> {
        compute_composite(&self.dataset, &self.mapping, &self.weights)
    }

    pub fn composite_table(&self) -> CompositeTable {
        build_composite_table(&self.dataset, &self.mapping, &self.weights)
    }
}
