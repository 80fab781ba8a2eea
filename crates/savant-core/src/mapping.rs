// Column mapping: vocabulary metric (plus the player-name field) -> dataset column.

use crate::dataset::{Column, Dataset};
use crate::metrics::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Display name of the player-identity pseudo-metric.
pub const PLAYER_NAME: &str = "Player Name";

/// Assignment of vocabulary metrics to dataset columns.
///
/// A metric absent from `metrics` is unmapped. One dataset column may back
/// several metrics. Serialized with display names as keys:
///
/// ```toml
/// "Player Name" = "Batter"
/// "Max EV" = "Max Exit Velocity"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(
        rename = "Player Name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub player_name: Option<String>,
    #[serde(flatten)]
    pub metrics: BTreeMap<Metric, String>,
}

impl ColumnMapping {
    pub fn get(&self, metric: Metric) -> Option<&str> {
        self.metrics.get(&metric).map(String::as_str)
    }

    pub fn set(&mut self, metric: Metric, column: impl Into<String>) {
        self.metrics.insert(metric, column.into());
    }

    pub fn unmap(&mut self, metric: Metric) {
        self.metrics.remove(&metric);
    }

    /// Metrics with no assigned column, in vocabulary order.
    pub fn unmapped(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| !self.metrics.contains_key(m))
            .collect()
    }

    /// The dataset column backing `metric`, if mapped and present.
    ///
    /// A mapped name that the dataset does not contain counts as unmapped.
    pub fn column_for<'a>(&self, dataset: &'a Dataset, metric: Metric) -> Option<&'a Column> {
        let name = self.get(metric)?;
        let column = dataset.column(name);
        if column.is_none() {
            warn!("{metric} mapped to missing column '{name}', treating as unmapped");
        }
        column
    }

    /// The dataset column holding player names, if mapped and present.
    pub fn player_column<'a>(&self, dataset: &'a Dataset) -> Option<&'a Column> {
        let name = self.player_name.as_deref()?;
        let column = dataset.column(name);
        if column.is_none() {
            warn!("{PLAYER_NAME} mapped to missing column '{name}', using row index");
        }
        column
    }
}
