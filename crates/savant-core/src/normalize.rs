// Header normalization for equality and partial-match comparison.

/// Canonical form of a header or metric name: lower-cased with spaces,
/// underscores, periods and percent signs removed.
pub fn normalize_header(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '.' | '%'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when both strings normalize to the same form.
pub fn headers_equivalent(a: &str, b: &str) -> bool {
    normalize_header(a) == normalize_header(b)
}
