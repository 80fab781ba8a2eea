// End-to-end checks of the core pipeline through the public API: resolve a
// mapping from raw headers, rank every metric, and score the composite.

use savant_core::cleaning::clean_column;
use savant_core::composite::{composite_score, CompositeInputs};
use savant_core::percentile::percentile_ranks;
use savant_core::{
    build_composite_table, build_percentile_table, compute_composite, resolve_mapping, Cell,
    Column, ColumnMapping, CompositeWeights, Dataset, Direction, Metric, PercentileTable, Session,
};

// ===========================================================================
// Helpers
// ===========================================================================

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn text(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|v| if v.is_empty() { Cell::Empty } else { Cell::from(*v) })
        .collect()
}

/// A messy export the way scouting tools actually ship them.
fn scouting_export() -> Dataset {
    Dataset::new(vec![
        Column::new(
            "Player Full Name",
            text(&["Juan Soto", "Aaron Judge", "Luis Arraez", "Joey Gallo"]),
        ),
        Column::new("Team", text(&["NYM", "NYY", "SD", "WSH"])),
        Column::new("xwOBA", text(&[".420", ".458", ".330", ".310"])),
        Column::new("Max Exit Velocity", text(&["114.6 mph", "116.8 mph", "104.1 MPH", "N/A"])),
        Column::new("Strikeout %", text(&["16.2%", "24.8%", "4.3%", "37.9%"])),
        Column::new("Walk%", text(&["21.2%", "18.9%", "4.9%", "15.0%"])),
        Column::new("Contact %", text(&["79.9", "70.1", "93.3", ""])),
        Column::new("Swing Length", text(&["7.4 ft", "8.0 ft", "6.3 ft", "8.2 ft"])),
    ])
    .unwrap()
}

// ===========================================================================
// Resolver
// ===========================================================================

#[test]
fn resolver_maps_messy_export() {
    let ds = scouting_export();
    let mapping = resolve_mapping(&ds.headers());

    assert_eq!(mapping.player_name.as_deref(), Some("Player Full Name"));
    assert_eq!(mapping.get(Metric::XwOba), Some("xwOBA"));
    assert_eq!(mapping.get(Metric::MaxExitVelocity), Some("Max Exit Velocity"));
    assert_eq!(mapping.get(Metric::StrikeoutPct), Some("Strikeout %"));
    assert_eq!(mapping.get(Metric::WalkPct), Some("Walk%"));
    assert_eq!(mapping.get(Metric::ContactPct), Some("Contact %"));
    assert_eq!(mapping.get(Metric::SwingLength), Some("Swing Length"));
}

#[test]
fn resolver_is_idempotent() {
    let ds = scouting_export();
    let first = resolve_mapping(&ds.headers());
    let second = resolve_mapping(&ds.headers());
    assert_eq!(first, second);
}

// ===========================================================================
// Percentile table
// ===========================================================================

#[test]
fn percentile_table_shape() {
    let ds = scouting_export();
    let table = build_percentile_table(&ds, &resolve_mapping(&ds.headers()));

    assert_eq!(table.row_count(), ds.row_count());
    let headers = PercentileTable::headers();
    assert_eq!(headers[0], "Player Name");
    assert_eq!(headers.len(), Metric::ALL.len() + 1);
    for row in table.rows() {
        assert_eq!(row.ranks.len(), Metric::ALL.len());
    }
}

#[test]
fn percentile_table_directions() {
    let ds = scouting_export();
    let table = build_percentile_table(&ds, &resolve_mapping(&ds.headers()));

    // Judge has the highest Max EV, Gallo's is unparseable.
    assert_eq!(
        table.column(Metric::MaxExitVelocity),
        &[Some(67), Some(100), Some(33), None]
    );
    // Arraez strikes out least.
    assert_eq!(table.get(2, Metric::StrikeoutPct), Some(100));
    assert_eq!(table.get(3, Metric::StrikeoutPct), Some(25));
    // Shortest swing ranks best.
    assert_eq!(table.get(2, Metric::SwingLength), Some(100));
    // Unmapped metrics are missing everywhere.
    assert!(table.column(Metric::OutsAboveAverage).iter().all(Option::is_none));
}

#[test]
fn unparseable_cells_are_missing_in_either_direction() {
    let cells = text(&["12", "abc", "15", ""]);
    let cleaned = clean_column(&cells);
    for direction in [Direction::HigherIsBetter, Direction::LowerIsBetter] {
        let ranks = percentile_ranks(&cleaned, direction);
        assert!(ranks[1].is_none());
        assert!(ranks[3].is_none());
        assert!(ranks[0].is_some() && ranks[2].is_some());
    }
}

#[test]
fn tied_values_rank_equally() {
    let values = [Some(0.320), Some(0.350), Some(0.320), Some(0.290), Some(0.320)];
    let ranks = percentile_ranks(&values, Direction::HigherIsBetter);
    assert_eq!(ranks[0], ranks[2]);
    assert_eq!(ranks[2], ranks[4]);
    // Sorted: .290(1) .320 .320 .320 (2,3,4 -> 3) .350(5); 3/5 -> 60.
    assert_eq!(ranks[0], Some(60));
}

#[test]
fn concrete_scenarios_one_and_two() {
    let ds = Dataset::new(vec![
        Column::new("Name", text(&["A", "B", "C", "D", "E"])),
        Column::new(
            "ExitVelocity",
            vec![100.0.into(), 90.0.into(), 80.0.into(), 70.0.into(), Cell::Empty],
        ),
        Column::new(
            "Strikeouts",
            vec![10.0.into(), 20.0.into(), 30.0.into(), 40.0.into(), 50.0.into()],
        ),
    ])
    .unwrap();
    let mut mapping = ColumnMapping {
        player_name: Some("Name".into()),
        ..Default::default()
    };
    mapping.set(Metric::MaxExitVelocity, "ExitVelocity");
    mapping.set(Metric::StrikeoutPct, "Strikeouts");

    let table = build_percentile_table(&ds, &mapping);
    assert_eq!(
        table.column(Metric::MaxExitVelocity),
        &[Some(100), Some(75), Some(50), Some(25), None]
    );
    assert_eq!(
        table.column(Metric::StrikeoutPct),
        &[Some(100), Some(80), Some(60), Some(40), Some(20)]
    );
}

// ===========================================================================
// Composite
// ===========================================================================

#[test]
fn composite_known_row() {
    let inputs = CompositeInputs {
        bb_pct: Some(10.0),
        k_pct: Some(20.0),
        max_ev: Some(100.0),
        contact_pct: Some(80.0),
    };
    let weights = CompositeWeights {
        base_woba: 0.280,
        w_bb: 0.7,
        w_k: 0.7,
        w_power: 0.25,
        w_contact: 0.2,
    };
    assert!(approx_eq(composite_score(&inputs, &weights), 0.4552, 1e-4));
}

#[test]
fn composite_is_total_without_mapped_components() {
    let ds = Dataset::new(vec![
        Column::new("Name", text(&["A", "B"])),
        Column::new("xwOBA", text(&[".400", ".300"])),
    ])
    .unwrap();
    let mapping = resolve_mapping(&ds.headers());
    let weights = CompositeWeights::default();

    let scores = compute_composite(&ds, &mapping, &weights);
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|s| approx_eq(*s, weights.base_woba, 1e-12)));
}

#[test]
fn composite_table_for_export() {
    let ds = scouting_export();
    let mapping = resolve_mapping(&ds.headers());
    let table = build_composite_table(&ds, &mapping, &CompositeWeights::default());

    assert_eq!(table.rows.len(), 4);
    let soto = &table.rows[0];
    assert_eq!(soto.player, "Juan Soto");
    let expected = 0.280 + 0.212 * 0.7 - 0.162 * 0.7
        + (114.6 - 75.0) / 35.0 * 0.25
        + (79.9 - 70.0) / 30.0 * 0.2;
    assert!(approx_eq(soto.score, expected, 1e-9));

    // Gallo: Max EV and Contact% missing, score still defined.
    let gallo = &table.rows[3];
    assert!(gallo.score.is_finite());
    assert_eq!(gallo.components[2].raw, None);
    assert_eq!(gallo.components[3].percentile, None);
}

#[test]
fn session_threads_mapping_and_weights() {
    let mut session = Session::new(scouting_export());
    let before = session.composite();
    let rejected = session.update_weights([(savant_core::WeightField::Power, "0.5")]);
    assert!(rejected.is_empty());
    let after = session.composite();
    assert!(after[1] > before[1]);
}
