//! Parsed Scalar Values

use std::fmt;

/// Literal used by listing exports for an absent value
pub const MISSING_MARKER: &str = "nan";

/// A parsed numeric field: either a finite number or explicitly missing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParsedScalar {
    /// Finite parsed value
    Present(f64),
    /// No usable value; deferred to imputation
    #[default]
    Missing,
}

impl ParsedScalar {
    /// Wrap a float, mapping NaN and infinities to `Missing`
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            ParsedScalar::Present(value)
        } else {
            ParsedScalar::Missing
        }
    }

    /// Whether the value is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, ParsedScalar::Missing)
    }

    /// The value if present
    pub fn value(&self) -> Option<f64> {
        match *self {
            ParsedScalar::Present(v) => Some(v),
            ParsedScalar::Missing => None,
        }
    }

    /// Apply `f` to a present value; missing stays missing
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            ParsedScalar::Present(v) => ParsedScalar::from_f64(f(v)),
            ParsedScalar::Missing => ParsedScalar::Missing,
        }
    }
}

impl From<Option<f64>> for ParsedScalar {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ParsedScalar::Missing, ParsedScalar::from_f64)
    }
}

impl fmt::Display for ParsedScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedScalar::Present(v) => write!(f, "{}", v),
            ParsedScalar::Missing => f.write_str(MISSING_MARKER),
        }
    }
}

/// Whether `raw` is the missing-value marker
pub fn is_missing_marker(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(MISSING_MARKER)
}

/// Parse a float, rejecting non-finite results
pub(crate) fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a number that may carry a thousands separator ("2,700" -> 2700)
///
/// Only the first two comma groups take part, matching how listing exports
/// write RPM values.
pub(crate) fn parse_grouped(text: &str) -> Option<f64> {
    let mut groups = text.split(',');
    let head = groups.next()?;
    match groups.next() {
        Some(rest) => Some(1000.0 * parse_finite(head)? + parse_finite(rest)?),
        None => parse_finite(head),
    }
}

/// `text` without its last `n` characters
pub(crate) fn drop_last_chars(text: &str, n: usize) -> &str {
    let keep = text.chars().count().saturating_sub(n);
    match text.char_indices().nth(keep) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
