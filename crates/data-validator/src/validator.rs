//! Data Validator for parsed listing scalars

use crate::error::ValidationError;
use crate::scalar::{is_missing_marker, ParsedScalar};
use crate::torque::TorqueReading;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Field names as reported in validation errors
pub mod fields {
    pub const KM_DRIVEN: &str = "km_driven";
    pub const MILEAGE: &str = "mileage";
    pub const ENGINE: &str = "engine";
    pub const MAX_POWER: &str = "max_power";
    pub const TORQUE: &str = "torque";
    pub const MAX_TORQUE_RPM: &str = "max_torque_rpm";
}

/// Validation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject text fields that are present but unparseable instead of
    /// leaving them to imputation
    pub strict_format: bool,
}

/// Parsed, not yet imputed, numeric fields of one listing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListingScalars {
    pub km_driven: ParsedScalar,
    pub mileage: ParsedScalar,
    pub engine: ParsedScalar,
    pub max_power: ParsedScalar,
    pub torque: TorqueReading,
}

/// Data validator for parsed listing fields
///
/// Missing values pass every check; they are the imputer's concern.
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Whether unparseable text is rejected
    pub fn is_strict(&self) -> bool {
        self.config.strict_format
    }

    /// Reject a negative present value
    pub fn validate_non_negative(
        &self,
        field: &'static str,
        value: ParsedScalar,
    ) -> Result<(), ValidationError> {
        match value {
            ParsedScalar::Present(v) if v < 0.0 => {
                Err(ValidationError::NegativeValue { field, value: v })
            }
            _ => Ok(()),
        }
    }

    /// Reject a present value of exactly zero
    pub fn validate_non_zero(
        &self,
        field: &'static str,
        value: ParsedScalar,
    ) -> Result<(), ValidationError> {
        match value {
            ParsedScalar::Present(v) if v == 0.0 => Err(ValidationError::ZeroDivision { field }),
            _ => Ok(()),
        }
    }

    /// In strict mode, reject text that was supplied but did not parse
    pub fn validate_format(
        &self,
        field: &'static str,
        raw: Option<&str>,
        parsed: ParsedScalar,
    ) -> Result<(), ValidationError> {
        if !self.config.strict_format || !parsed.is_missing() {
            return Ok(());
        }
        match raw {
            Some(text) if !is_missing_marker(text) => Err(ValidationError::InvalidFormat {
                field,
                raw: text.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Run the sign and divisor checks in their fixed order
    pub fn validate(&self, scalars: &ListingScalars) -> Result<(), ValidationError> {
        self.validate_non_negative(fields::TORQUE, scalars.torque.torque_nm)?;
        self.validate_non_negative(fields::MAX_TORQUE_RPM, scalars.torque.max_torque_rpm)?;
        self.validate_non_negative(fields::MILEAGE, scalars.mileage)?;
        self.validate_non_negative(fields::ENGINE, scalars.engine)?;
        self.validate_non_negative(fields::MAX_POWER, scalars.max_power)?;
        self.validate_non_negative(fields::KM_DRIVEN, scalars.km_driven)?;
        self.validate_non_zero(fields::ENGINE, scalars.engine)?;
        debug!("Listing scalars passed validation");
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
