// Header resolver: best-guess mapping from dataset headers to the vocabulary.
//
// Greedy and order-sensitive by construction. Each rule below is evaluated
// top to bottom; earlier candidates beat later ones, earlier headers beat
// later headers. The resolver never fails; the worst case is an empty mapping.

use crate::mapping::ColumnMapping;
use crate::metrics::Metric;
use crate::normalize::normalize_header;
use tracing::debug;

/// Exact (normalized) player-name headers, highest priority first.
const PLAYER_NAME_CANDIDATES: &[&str] = &[
    "playerfullname",
    "battername",
    "playername",
    "batter",
    "player",
];

/// Substrings accepted for player name when no exact candidate matches.
const PLAYER_NAME_FRAGMENTS: &[&str] = &["player", "name", "batter"];

/// Exact (normalized) headers accepted for "Max EV", highest priority first.
const MAX_EV_CANDIDATES: &[&str] = &[
    "maxexitvelocity",
    "maxexitvel",
    "maxev",
    "exitvelocity",
    "exitvel",
    "ev",
];

/// A header's original text paired with its normalized form.
struct Header<'a> {
    raw: &'a str,
    norm: String,
}

/// Suggest a column mapping for the given headers.
pub fn resolve_mapping<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    let headers: Vec<Header<'_>> = headers
        .iter()
        .map(|h| Header {
            raw: h.as_ref(),
            norm: normalize_header(h.as_ref()),
        })
        .collect();

    let mut mapping = ColumnMapping {
        player_name: resolve_player_name(&headers).map(str::to_string),
        ..Default::default()
    };

    for metric in Metric::ALL {
        match resolve_metric(&headers, metric) {
            Some(raw) => {
                debug!("resolved {metric} -> '{raw}'");
                mapping.set(metric, raw);
            }
            None => debug!("no header found for {metric}"),
        }
    }

    mapping
}

fn resolve_player_name<'a>(headers: &[Header<'a>]) -> Option<&'a str> {
    first_exact_candidate(headers, PLAYER_NAME_CANDIDATES).or_else(|| {
        headers
            .iter()
            .find(|h| PLAYER_NAME_FRAGMENTS.iter().any(|f| h.norm.contains(f)))
            .map(|h| h.raw)
    })
}

/// First header exactly matching the highest-priority candidate that has any match.
fn first_exact_candidate<'a>(headers: &[Header<'a>], candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|c| headers.iter().find(|h| h.norm == *c))
        .map(|h| h.raw)
}

fn resolve_metric<'a>(headers: &[Header<'a>], metric: Metric) -> Option<&'a str> {
    if metric == Metric::MaxExitVelocity {
        if let Some(raw) = first_exact_candidate(headers, MAX_EV_CANDIDATES) {
            return Some(raw);
        }
    }

    let target = normalize_header(metric.name());

    if let Some(h) = headers.iter().find(|h| h.norm == target) {
        return Some(h.raw);
    }

    let preferred = match metric {
        Metric::StrikeoutPct => Some(normalize_header("strikeout")),
        Metric::WalkPct => Some(normalize_header("walk")),
        _ => None,
    };

    let mut first_partial = None;
    for h in headers {
        if let Some(fragment) = &preferred {
            if h.norm.contains(fragment.as_str()) {
                return Some(h.raw);
            }
        }
        // An empty normalized header is contained in every metric name.
        if h.norm.is_empty() || first_partial.is_some() {
            continue;
        }
        if h.norm.contains(target.as_str()) || target.contains(h.norm.as_str()) {
            first_partial = Some(h.raw);
        }
    }
    first_partial
}
