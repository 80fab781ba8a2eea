// Rendering of result tables as CSV or JSON.

use crate::config::OutputConfig;
use savant_core::{CompositeTable, PercentileTable};
use serde_json::Value;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Output encoding selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

// ---------------------------------------------------------------------------
// Rendered rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Field {
    Text(String),
    Rank(u8),
    /// Cleaned raw metric value, printed as-is.
    Value(f64),
    /// Composite score, rounded to the configured precision.
    Score(f64),
    Missing,
}

impl Field {
    fn to_csv(&self, output: &OutputConfig) -> String {
        match self {
            Field::Text(s) => s.clone(),
            Field::Rank(r) => r.to_string(),
            Field::Value(v) => v.to_string(),
            Field::Score(v) => {
                let p = output.composite_precision;
                format!("{:.*}", p, round_to(*v, p))
            }
            Field::Missing => output.missing_marker.clone(),
        }
    }

    fn to_json(&self, output: &OutputConfig) -> Value {
        match self {
            Field::Text(s) => Value::from(s.as_str()),
            Field::Rank(r) => Value::from(*r),
            Field::Value(v) => Value::from(*v),
            Field::Score(v) => Value::from(round_to(*v, output.composite_precision)),
            Field::Missing => Value::Null,
        }
    }
}

fn round_to(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// A table flattened to header and cell order, ready to encode.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    headers: Vec<String>,
    rows: Vec<Vec<Field>>,
}

impl Rendered {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl From<&PercentileTable> for Rendered {
    fn from(table: &PercentileTable) -> Self {
        let rows = table
            .rows()
            .into_iter()
            .map(|row| {
                std::iter::once(Field::Text(row.player.to_string()))
                    .chain(
                        row.ranks
                            .into_iter()
                            .map(|r| r.map_or(Field::Missing, Field::Rank)),
                    )
                    .collect()
            })
            .collect();

        Self {
            headers: PercentileTable::headers()
                .into_iter()
                .map(String::from)
                .collect(),
            rows,
        }
    }
}

impl From<&CompositeTable> for Rendered {
    fn from(table: &CompositeTable) -> Self {
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let mut fields = vec![Field::Text(row.player.clone()), Field::Score(row.score)];
                for component in &row.components {
                    fields.push(component.raw.map_or(Field::Missing, Field::Value));
                    fields.push(component.percentile.map_or(Field::Missing, Field::Rank));
                }
                fields
            })
            .collect();

        Self {
            headers: CompositeTable::headers(),
            rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Encode `table` into `out` in the requested format.
pub fn write_table<W: Write>(
    table: &Rendered,
    format: OutputFormat,
    output: &OutputConfig,
    out: W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Csv => write_csv(table, output, out),
        OutputFormat::Json => write_json(table, output, out),
    }
}

fn write_csv<W: Write>(table: &Rendered, output: &OutputConfig, out: W) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|f| f.to_csv(output)))?;
    }
    writer.flush()?;
    Ok(())
}

/// JSON keeps column order with a header list and positional rows; missing
/// values are `null`.
fn write_json<W: Write>(
    table: &Rendered,
    output: &OutputConfig,
    mut out: W,
) -> Result<(), OutputError> {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| Value::Array(row.iter().map(|f| f.to_json(output)).collect()))
        .collect();
    let doc = serde_json::json!({
        "headers": table.headers,
        "rows": rows,
    });
    serde_json::to_writer_pretty(&mut out, &doc)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use savant_core::{
        build_composite_table, build_percentile_table, Cell, Column, ColumnMapping,
        CompositeWeights, Dataset, Metric,
    };

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::new("Name", vec![Cell::from("Ana"), Cell::from("Ben")]),
            Column::new("BB%", vec![Cell::from(10.0), Cell::Empty]),
            Column::new("K%", vec![Cell::from(20.0), Cell::from(25.0)]),
            Column::new("Max EV", vec![Cell::from(100.0), Cell::from(95.0)]),
            Column::new("Contact%", vec![Cell::from(80.0), Cell::from(75.0)]),
        ])
        .unwrap()
    }

    fn mapping() -> ColumnMapping {
        let mut mapping = ColumnMapping {
            player_name: Some("Name".into()),
            ..Default::default()
        };
        mapping.set(Metric::WalkPct, "BB%");
        mapping.set(Metric::StrikeoutPct, "K%");
        mapping.set(Metric::MaxExitVelocity, "Max EV");
        mapping.set(Metric::ContactPct, "Contact%");
        mapping
    }

    fn render_csv(table: &Rendered, output: &OutputConfig) -> String {
        let mut buf = Vec::new();
        write_table(table, OutputFormat::Csv, output, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn percentile_csv_uses_marker_for_missing() {
        let table = build_percentile_table(&dataset(), &mapping());
        let rendered = Rendered::from(&table);
        let text = render_csv(&rendered, &OutputConfig::default());

        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Player Name,xwOBA,"));
        assert_eq!(header.split(',').count(), 1 + Metric::ALL.len());

        let ana: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(ana[0], "Ana");
        // xwOBA is unmapped.
        assert_eq!(ana[1], "N/A");
        assert_eq!(ana[1 + Metric::WalkPct.index()], "100");

        let ben: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(ben[1 + Metric::WalkPct.index()], "N/A");
    }

    #[test]
    fn custom_marker_applied() {
        let table = build_percentile_table(&dataset(), &mapping());
        let output = OutputConfig {
            missing_marker: "-".into(),
            ..OutputConfig::default()
        };
        let text = render_csv(&Rendered::from(&table), &output);
        assert!(text.lines().nth(1).unwrap().contains(",-,"));
        assert!(!text.contains("N/A"));
    }

    #[test]
    fn composite_csv_rounds_score() {
        let table = build_composite_table(&dataset(), &mapping(), &CompositeWeights::default());
        let rendered = Rendered::from(&table);
        assert_eq!(rendered.headers()[1], "Synthetic xwOBA");
        assert_eq!(rendered.headers().len(), 2 + 2 * 4);

        let text = render_csv(&rendered, &OutputConfig::default());
        let ana: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(ana[0], "Ana");
        assert_eq!(ana[1], "0.455");
        // Raw BB% then its percentile.
        assert_eq!(ana[2], "10");
        assert_eq!(ana[3], "100");

        let ben: Vec<&str> = text.lines().nth(2).unwrap().split(',').collect();
        assert_eq!(ben[2], "N/A");
        assert_eq!(ben[3], "N/A");
    }

    #[test]
    fn composite_json_uses_null_for_missing() {
        let table = build_composite_table(&dataset(), &mapping(), &CompositeWeights::default());
        let mut buf = Vec::new();
        write_table(
            &Rendered::from(&table),
            OutputFormat::Json,
            &OutputConfig::default(),
            &mut buf,
        )
        .unwrap();

        let doc: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["headers"][0], "Player Name");
        let rows = doc["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Ana");
        assert!(approx_eq(rows[0][1].as_f64().unwrap(), 0.455, 1e-9));
        assert!(rows[1][2].is_null());
    }

    #[test]
    fn csv_and_json_scores_agree() {
        let output = OutputConfig::default();
        for v in [1.0005, 0.4555, 0.3125, -0.0005, 0.2804999] {
            let score = Field::Score(v);
            let json = score.to_json(&output).as_f64().unwrap();
            assert_eq!(score.to_csv(&output), format!("{json:.3}"), "score {v}");
        }
    }

    #[test]
    fn round_to_precision() {
        assert!(approx_eq(round_to(0.45516, 3), 0.455, 1e-12));
        assert!(approx_eq(round_to(0.45516, 0), 0.0, 1e-12));
        assert!(approx_eq(round_to(-0.1234, 2), -0.12, 1e-12));
    }
}
