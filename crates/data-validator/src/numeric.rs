//! Numeric Extractor for unit-suffixed listing fields
//!
//! Handles values such as `"21.78 kmpl"`, `"1248 CC"`, `"74 bhp"` or a bare
//! `"1197"`. Anything else becomes [`ParsedScalar::Missing`].

use crate::scalar::{is_missing_marker, parse_finite, ParsedScalar};
use tracing::debug;

type Strategy = fn(&str) -> Option<f64>;

/// Tried in order; the first strategy that yields a value wins
const STRATEGIES: &[Strategy] = &[number_with_unit, bare_number];

/// `"<number> <unit>"`, exactly two whitespace-separated tokens
fn number_with_unit(raw: &str) -> Option<f64> {
    let mut tokens = raw.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(number), Some(_unit), None) => parse_finite(number),
        _ => None,
    }
}

fn bare_number(raw: &str) -> Option<f64> {
    parse_finite(raw)
}

/// Extract the leading number of a unit-suffixed field
pub fn extract(raw: &str) -> ParsedScalar {
    if is_missing_marker(raw) {
        return ParsedScalar::Missing;
    }

    match STRATEGIES.iter().find_map(|strategy| strategy(raw)) {
        Some(value) => ParsedScalar::Present(value),
        None => {
            debug!("Unparseable numeric field {:?}, treating as missing", raw);
            ParsedScalar::Missing
        }
    }
}
