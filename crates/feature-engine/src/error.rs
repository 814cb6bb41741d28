//! Feature Engine Error Types

use data_validator::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Per-record errors; one record's error never affects another record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Parsed scalar rejected by the validator
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Categorical value outside the fitted vocabulary
    #[error("Unknown category {value:?} for {field}")]
    UnknownCategory { field: &'static str, value: String },
}

impl FeatureError {
    /// Classification used by the request layer
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeatureError::Validation(err) => match err {
                ValidationError::InvalidFormat { .. } => ErrorKind::Format,
                ValidationError::NegativeValue { .. } => ErrorKind::NegativeValue,
                ValidationError::ZeroDivision { .. } => ErrorKind::ZeroDivision,
            },
            FeatureError::UnknownCategory { .. } => ErrorKind::UnknownCategory,
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            FeatureError::Validation(err) => err.field(),
            FeatureError::UnknownCategory { field, .. } => field,
        }
    }
}

/// Request-level error classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Format,
    NegativeValue,
    ZeroDivision,
    UnknownCategory,
}

impl ErrorKind {
    /// Status code reported to clients
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Format => 480,
            ErrorKind::NegativeValue => 481,
            ErrorKind::ZeroDivision => 482,
            ErrorKind::UnknownCategory => 483,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Format => "format_error",
            ErrorKind::NegativeValue => "negative_value",
            ErrorKind::ZeroDivision => "zero_division",
            ErrorKind::UnknownCategory => "unknown_category",
        }
    }
}

/// Startup errors in reference data; fatal, never reported per request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Required reference statistic absent
    #[error("Reference statistic missing for {0}")]
    MissingReference(&'static str),

    /// Reference statistic is NaN or infinite
    #[error("Reference statistic for {field} is not finite: {value}")]
    NonFiniteReference { field: &'static str, value: f64 },

    /// Vocabulary lists the same value twice for one field
    #[error("Duplicate vocabulary entry {value:?} for {field}")]
    DuplicateVocabularyEntry { field: &'static str, value: String },

    /// Fitted encoder column without categories
    #[error("Encoder column {0} has no categories")]
    EmptyCategories(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let negative = FeatureError::from(ValidationError::NegativeValue {
            field: "engine",
            value: -1.0,
        });
        assert_eq!(negative.kind().status_code(), 481);
        assert_eq!(negative.field(), "engine");

        let zero = FeatureError::from(ValidationError::ZeroDivision { field: "engine" });
        assert_eq!(zero.kind().status_code(), 482);

        let unknown = FeatureError::UnknownCategory {
            field: "fuel",
            value: "Hydrogen".to_string(),
        };
        assert_eq!(unknown.kind(), ErrorKind::UnknownCategory);
        assert_eq!(unknown.kind().status_code(), 483);
        assert_eq!(ErrorKind::Format.status_code(), 480);
    }
}
