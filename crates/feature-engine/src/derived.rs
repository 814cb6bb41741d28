//! Derived per-liter features

use data_validator::{fields, ParsedScalar, ValidationError};

/// Per-liter ratios of power and mileage
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedFeatures {
    /// bhp per liter of displacement
    pub power_per_liter: ParsedScalar,
    /// km/l per liter of displacement
    pub mileage_per_liter: ParsedScalar,
}

fn per_liter(value: ParsedScalar, engine_cc: f64) -> ParsedScalar {
    value.map(|v| v / engine_cc * 1000.0)
}

/// Compute per-liter features; engine displacement is in cc
///
/// Expects validated inputs. A zero displacement is still reported rather
/// than producing infinities.
pub fn compute(
    max_power: ParsedScalar,
    mileage: ParsedScalar,
    engine: ParsedScalar,
) -> Result<DerivedFeatures, ValidationError> {
    match engine {
        ParsedScalar::Missing => Ok(DerivedFeatures::default()),
        ParsedScalar::Present(cc) if cc == 0.0 => Err(ValidationError::ZeroDivision {
            field: fields::ENGINE,
        }),
        ParsedScalar::Present(cc) => Ok(DerivedFeatures {
            power_per_liter: per_liter(max_power, cc),
            mileage_per_liter: per_liter(mileage, cc),
        }),
    }
}
