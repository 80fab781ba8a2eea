// Numeric cleaning: raw cells -> finite numbers or missing.
//
// Scouting exports mix plain numbers with values like "95.4 mph", "23.1%"
// or "7.2 ft". Every cell comes out as a finite f64 or None; nothing here
// fails.

use crate::dataset::Cell;
use regex::Regex;
use std::sync::LazyLock;

/// Case-insensitive unit suffixes stripped wherever they occur.
static UNIT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mph|ft").expect("unit suffix pattern is valid"));

/// Clean one textual value: trim, drop `%`, drop `mph`/`ft`, parse.
pub fn clean_text(value: &str) -> Option<f64> {
    let trimmed = value.trim().replace('%', "");
    let stripped = UNIT_SUFFIX.replace_all(&trimmed, "");
    stripped.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Clean one cell using the per-value text rule.
pub fn clean_cell(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => Some(*n).filter(|v| v.is_finite()),
        Cell::Text(s) => clean_text(s),
        Cell::Empty => None,
    }
}

/// Clean a whole column. Output has the same length as the input.
pub fn clean_column(cells: &[Cell]) -> Vec<Option<f64>> {
    let uniformly_numeric = cells
        .iter()
        .all(|c| matches!(c, Cell::Number(_) | Cell::Empty));

    if uniformly_numeric {
        return cells
            .iter()
            .map(|c| match c {
                Cell::Number(n) if n.is_finite() => Some(*n),
                _ => None,
            })
            .collect();
    }

    cells.iter().map(clean_cell).collect()
}
