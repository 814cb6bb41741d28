//! Validation Error Types

use thiserror::Error;

/// Errors during listing field validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Field text could not be read as a number at all
    #[error("{field} could not be parsed from {raw:?}")]
    InvalidFormat { field: &'static str, raw: String },

    /// Physically impossible negative magnitude
    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    /// Divisor field is zero, derived features are undefined
    #[error("{field} is zero, per-liter features are undefined")]
    ZeroDivision { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidFormat { field, .. }
            | ValidationError::NegativeValue { field, .. }
            | ValidationError::ZeroDivision { field } => field,
        }
    }
}
