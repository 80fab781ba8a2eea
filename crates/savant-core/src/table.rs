// Result tables handed to the presentation layer.

use crate::composite::{
    cleaned_metric, composite_inputs, composite_score, CompositeWeights, COMPONENT_METRICS,
};
use crate::dataset::{Cell, Dataset};
use crate::mapping::{ColumnMapping, PLAYER_NAME};
use crate::metrics::Metric;
use crate::percentile::percentile_ranks;
use tracing::{debug, info};

/// Header of the composite score column.
pub const COMPOSITE_HEADER: &str = "Synthetic xwOBA";

/// Player identifiers, one per row.
///
/// Taken from the mapped player column; an unmapped player column, or an
/// empty cell within it, falls back to the zero-based row index.
pub fn player_names(dataset: &Dataset, mapping: &ColumnMapping) -> Vec<String> {
    let column = mapping.player_column(dataset);
    (0..dataset.row_count())
        .map(|row| {
            column
                .and_then(|c| c.cells.get(row))
                .and_then(Cell::as_text)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| row.to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Percentile table
// ---------------------------------------------------------------------------

/// Player Name plus one 1-100 percentile column per vocabulary metric.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileTable {
    players: Vec<String>,
    /// Indexed by [`Metric::index`].
    columns: Vec<Vec<Option<u8>>>,
}

/// One row of a [`PercentileTable`], ranks in vocabulary order.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileRow<'a> {
    pub player: &'a str,
    pub ranks: Vec<Option<u8>>,
}

impl PercentileTable {
    pub fn row_count(&self) -> usize {
        self.players.len()
    }

    /// `"Player Name"` followed by every metric name.
    pub fn headers() -> Vec<&'static str> {
        std::iter::once(PLAYER_NAME)
            .chain(Metric::ALL.iter().map(|m| m.name()))
            .collect()
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn column(&self, metric: Metric) -> &[Option<u8>] {
        &self.columns[metric.index()]
    }

    pub fn get(&self, row: usize, metric: Metric) -> Option<u8> {
        self.columns[metric.index()].get(row).copied().flatten()
    }

    pub fn rows(&self) -> Vec<PercentileRow<'_>> {
        self.players
            .iter()
            .enumerate()
            .map(|(row, player)| PercentileRow {
                player,
                ranks: self.columns.iter().map(|c| c[row]).collect(),
            })
            .collect()
    }
}

/// Clean and rank every vocabulary metric; unmapped metrics come out all-missing.
pub fn build_percentile_table(dataset: &Dataset, mapping: &ColumnMapping) -> PercentileTable {
    let columns: Vec<Vec<Option<u8>>> = Metric::ALL
        .iter()
        .map(|&metric| {
            let values = cleaned_metric(dataset, mapping, metric);
            let ranks = percentile_ranks(&values, metric.direction());
            debug!(
                "{metric}: {} of {} rows ranked",
                ranks.iter().filter(|r| r.is_some()).count(),
                ranks.len()
            );
            ranks
        })
        .collect();

    info!(
        "percentile table built: {} rows, {} metrics mapped",
        dataset.row_count(),
        Metric::ALL.len() - mapping.unmapped().len()
    );

    PercentileTable {
        players: player_names(dataset, mapping),
        columns,
    }
}

// ---------------------------------------------------------------------------
// Composite table
// ---------------------------------------------------------------------------

/// A composite input alongside its percentile, for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentValue {
    pub metric: Metric,
    pub raw: Option<f64>,
    pub percentile: Option<u8>,
}

/// One row of the composite view.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRow {
    pub player: String,
    pub score: f64,
    /// In [`COMPONENT_METRICS`] order.
    pub components: Vec<ComponentValue>,
}

/// Composite scores with their contributing metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeTable {
    pub weights: CompositeWeights,
    pub rows: Vec<CompositeRow>,
}

impl CompositeTable {
    /// Player Name, the score, then `<metric>` and `<metric>_pct` per component.
    pub fn headers() -> Vec<String> {
        let mut headers = vec![PLAYER_NAME.to_string(), COMPOSITE_HEADER.to_string()];
        for metric in COMPONENT_METRICS {
            headers.push(metric.name().to_string());
            headers.push(format!("{}_pct", metric.name()));
        }
        headers
    }
}

/// Score every row and attach the raw and percentile view of each component.
pub fn build_composite_table(
    dataset: &Dataset,
    mapping: &ColumnMapping,
    weights: &CompositeWeights,
) -> CompositeTable {
    let players = player_names(dataset, mapping);
    let inputs = composite_inputs(dataset, mapping);

    let components: Vec<(Metric, Vec<Option<f64>>, Vec<Option<u8>>)> = COMPONENT_METRICS
        .iter()
        .map(|&metric| {
            let raw = cleaned_metric(dataset, mapping, metric);
            let ranks = percentile_ranks(&raw, metric.direction());
            (metric, raw, ranks)
        })
        .collect();

    let rows = players
        .into_iter()
        .zip(inputs.iter())
        .enumerate()
        .map(|(row, (player, inputs))| CompositeRow {
            player,
            score: composite_score(inputs, weights),
            components: components
                .iter()
                .map(|(metric, raw, ranks)| ComponentValue {
                    metric: *metric,
                    raw: raw[row],
                    percentile: ranks[row],
                })
                .collect(),
        })
        .collect();

    CompositeTable {
        weights: *weights,
        rows,
    }
}
