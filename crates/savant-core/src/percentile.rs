// Percentile engine: direction-aware fractional ranks scaled to 1-100.

use crate::metrics::Direction;
use std::cmp::Ordering;

/// Smallest and largest percentile a non-missing value can receive.
pub const MIN_PERCENTILE: u8 = 1;
pub const MAX_PERCENTILE: u8 = 100;

/// Percentile rank of every value in a cleaned column.
///
/// Non-missing values are ordered so that the best value comes last
/// (ascending for higher-is-better, descending for lower-is-better) and each
/// receives its 1-based fractional rank; tied values share the average of the
/// ranks they span. The rank divided by the number of non-missing values,
/// times 100, is rounded half-to-even and clamped to `[1, 100]`.
///
/// Missing and non-finite inputs yield `None`. The best value always gets 100.
pub fn percentile_ranks(values: &[Option<f64>], direction: Direction) -> Vec<Option<u8>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| x.is_finite()).map(|x| (i, x)))
        .collect();

    let mut out = vec![None; values.len()];
    if present.is_empty() {
        return out;
    }

    present.sort_by(|a, b| effective_order(a.1, b.1, direction));

    let n = present.len() as f64;
    let mut start = 0;
    while start < present.len() {
        let value = present[start].1;
        let mut end = start + 1;
        while end < present.len() && present[end].1 == value {
            end += 1;
        }
        // Ranks start+1 ..= end share their mean.
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        let pct = scale(avg_rank / n);
        for &(row, _) in &present[start..end] {
            out[row] = Some(pct);
        }
        start = end;
    }

    out
}

fn effective_order(a: f64, b: f64, direction: Direction) -> Ordering {
    match direction {
        Direction::HigherIsBetter => a.total_cmp(&b),
        Direction::LowerIsBetter => b.total_cmp(&a),
    }
}

/// Map a fractional rank in (0, 1] onto the integer 1-100 scale.
fn scale(fraction: f64) -> u8 {
    let pct = (fraction * 100.0).round_ties_even();
    pct.clamp(f64::from(MIN_PERCENTILE), f64::from(MAX_PERCENTILE)) as u8
}
