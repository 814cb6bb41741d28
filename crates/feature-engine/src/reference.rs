//! Reference Statistics (training-time medians)

use crate::error::ConfigError;
use data_validator::fields;
use std::collections::HashMap;
use tracing::info;

/// Fields with a reference statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    KmDriven,
    Mileage,
    Engine,
    MaxPower,
    Torque,
    MaxTorqueRpm,
    PowerPerLiter,
    MileagePerLiter,
    Seats,
}

impl Field {
    /// Every field with a reference statistic
    pub const ALL: [Field; 10] = [
        Field::Year,
        Field::KmDriven,
        Field::Mileage,
        Field::Engine,
        Field::MaxPower,
        Field::Torque,
        Field::MaxTorqueRpm,
        Field::PowerPerLiter,
        Field::MileagePerLiter,
        Field::Seats,
    ];

    /// Numeric block layout; the scaler was fitted on exactly this order
    pub const NUMERIC_BLOCK: [Field; 9] = [
        Field::Year,
        Field::KmDriven,
        Field::Mileage,
        Field::Engine,
        Field::MaxPower,
        Field::Torque,
        Field::MaxTorqueRpm,
        Field::PowerPerLiter,
        Field::MileagePerLiter,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::KmDriven => fields::KM_DRIVEN,
            Field::Mileage => fields::MILEAGE,
            Field::Engine => fields::ENGINE,
            Field::MaxPower => fields::MAX_POWER,
            Field::Torque => fields::TORQUE,
            Field::MaxTorqueRpm => fields::MAX_TORQUE_RPM,
            Field::PowerPerLiter => "power_per_liter",
            Field::MileagePerLiter => "mileage_per_liter",
            Field::Seats => "seats",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Read-only per-field medians, complete by construction
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceStatistics {
    medians: [f64; 10],
}

impl ReferenceStatistics {
    /// Build from a name -> median map; every [`Field`] must be present and finite
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, ConfigError> {
        let mut medians = [0.0; 10];
        for field in Field::ALL {
            let value = *map
                .get(field.as_str())
                .ok_or(ConfigError::MissingReference(field.as_str()))?;
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteReference {
                    field: field.as_str(),
                    value,
                });
            }
            medians[field.index()] = value;
        }

        info!("Loaded reference statistics for {} fields", Field::ALL.len());
        Ok(Self { medians })
    }

    /// Median for a field
    pub fn median(&self, field: Field) -> f64 {
        self.medians[field.index()]
    }
}
