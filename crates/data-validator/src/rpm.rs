//! RPM Range Resolver
//!
//! Reduces an RPM token ("2500rpm", "1500-2500", "1,750~2,750 rpm") to the
//! representative value, which is always the upper bound of a range.

use crate::scalar::{parse_grouped, ParsedScalar};

const RPM_SUFFIX: &str = "rpm";

fn strip_rpm_suffix(token: &str) -> &str {
    let token = token.trim();
    let split = token.len().saturating_sub(RPM_SUFFIX.len());
    match (token.get(..split), token.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(RPM_SUFFIX) => head,
        _ => token,
    }
}

/// Resolve an RPM token to its representative (upper) value
pub fn resolve(token: &str) -> ParsedScalar {
    let text = strip_rpm_suffix(token);
    let separator = if text.contains('~') { '~' } else { '-' };

    let selected = text.split(separator).last().unwrap_or(text);
    parse_grouped(selected.trim()).into()
}
