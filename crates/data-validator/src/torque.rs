//! Torque Parser
//!
//! Listing exports write torque in several shapes:
//!
//! - `"250Nm@ 1500-2500rpm"` (magnitude, separator, RPM)
//! - `"22.4 kgm at 1750-2750rpm"` (kgf·m, converted to N·m)
//! - `"12.7@ 2,700(kgm@ rpm)"` (units given in a trailing annotation)
//! - `"145Nm"` (magnitude only)
//!
//! Parsing is a chain of strategies. The structured strategy splits on the
//! first separator found (`@`, then `at`, then `/`). When it cannot make sense
//! of the structure, a magnitude-only fallback is tried. Nothing here fails:
//! unusable input resolves to missing values.

use crate::rpm;
use crate::scalar::{drop_last_chars, is_missing_marker, parse_finite, parse_grouped, ParsedScalar};
use tracing::debug;

/// Newton-metres per kilogram-force-metre
pub const KGM_TO_NM: f64 = 9.80665;

/// Separators in priority order
const SEPARATORS: &[&str] = &["@", "at", "/"];

/// Convert kgf·m to N·m
pub fn kgm_to_nm(value: f64) -> f64 {
    value * KGM_TO_NM
}

/// Parsed torque magnitude and the RPM it is reached at
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TorqueReading {
    /// Torque in N·m
    pub torque_nm: ParsedScalar,
    /// Representative max-torque RPM
    pub max_torque_rpm: ParsedScalar,
}

impl TorqueReading {
    /// Both values missing
    pub const MISSING: TorqueReading = TorqueReading {
        torque_nm: ParsedScalar::Missing,
        max_torque_rpm: ParsedScalar::Missing,
    };
}

/// The string does not have a shape the strategy understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unparseable;

type Strategy = fn(&str) -> Result<TorqueReading, Unparseable>;

const STRATEGIES: &[Strategy] = &[structured, magnitude_only];

fn has_kgm(text: &str) -> bool {
    text.to_ascii_lowercase().contains("kgm")
}

/// Magnitude token of the leading part: unit suffix dropped, first word kept
fn leading_magnitude(part: &str, unit_len: usize) -> Result<ParsedScalar, Unparseable> {
    let token = drop_last_chars(part, unit_len)
        .split_whitespace()
        .next()
        .ok_or(Unparseable)?;
    Ok(parse_grouped(token).into())
}

/// `"<magnitude><unit> <sep> <rpm>"`, optionally with a `"(<units> <sep> rpm)"` tail
fn structured(raw: &str) -> Result<TorqueReading, Unparseable> {
    let separator = SEPARATORS
        .iter()
        .find(|sep| raw.contains(**sep))
        .ok_or(Unparseable)?;
    let parts: Vec<&str> = raw.split(*separator).collect();

    match parts.as_slice() {
        [magnitude, rpm_part] => {
            let max_torque_rpm = rpm::resolve(rpm_part);
            let torque_nm = if has_kgm(magnitude) {
                leading_magnitude(magnitude, 3)?.map(kgm_to_nm)
            } else {
                leading_magnitude(magnitude, 2)?
            };
            Ok(TorqueReading {
                torque_nm,
                max_torque_rpm,
            })
        }
        [magnitude, rpm_and_units, _] => {
            let (rpm_part, units) = match rpm_and_units.split('(').collect::<Vec<_>>()[..] {
                [rpm_part, units] => (rpm_part, units),
                _ => return Err(Unparseable),
            };
            let value = parse_finite(magnitude).ok_or(Unparseable)?;
            let torque_nm = if has_kgm(units) { kgm_to_nm(value) } else { value };
            Ok(TorqueReading {
                torque_nm: ParsedScalar::from_f64(torque_nm),
                max_torque_rpm: rpm::resolve(rpm_part),
            })
        }
        _ => Ok(TorqueReading::MISSING),
    }
}

/// Magnitude only, e.g. `"145Nm"` or `"145 Nm"`; RPM is unknown
fn magnitude_only(raw: &str) -> Result<TorqueReading, Unparseable> {
    if !raw.contains("Nm") {
        return Err(Unparseable);
    }
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let token = match tokens.as_slice() {
        [single] => drop_last_chars(single, 2),
        [first, ..] => *first,
        [] => return Err(Unparseable),
    };
    let value = parse_finite(token).ok_or(Unparseable)?;
    Ok(TorqueReading {
        torque_nm: ParsedScalar::Present(value),
        max_torque_rpm: ParsedScalar::Missing,
    })
}

/// Parse a raw torque string into N·m and max-torque RPM
pub fn parse(raw: &str) -> TorqueReading {
    if is_missing_marker(raw) {
        return TorqueReading::MISSING;
    }

    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(raw).ok())
        .unwrap_or_else(|| {
            debug!("Unparseable torque {:?}, treating as missing", raw);
            TorqueReading::MISSING
        })
}
