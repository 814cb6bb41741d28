//! Feature Vector Assembly

use crate::derived;
use crate::encoding::CategoricalEncoder;
use crate::error::FeatureError;
use crate::imputer::Imputer;
use crate::record::{CategoricalFields, RawRecord};
use crate::reference::{Field, ReferenceStatistics};
use data_validator::{
    extract, fields, parse_torque, ListingScalars, ParsedScalar, ValidationConfig, Validator,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Width of the numeric block
pub const NUMERIC_DIMENSION: usize = Field::NUMERIC_BLOCK.len();

/// Model input for one listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Imputed numeric features in [`Field::NUMERIC_BLOCK`] order
    pub numeric: [f64; NUMERIC_DIMENSION],
    /// Encoded categorical block
    pub categorical: Vec<f64>,
}

impl FeatureVector {
    /// Numeric block followed by the categorical block
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.len());
        values.extend_from_slice(&self.numeric);
        values.extend_from_slice(&self.categorical);
        values
    }

    /// Total width
    pub fn len(&self) -> usize {
        NUMERIC_DIMENSION + self.categorical.len()
    }

    /// Always false; the numeric block is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value of a named numeric feature
    pub fn numeric_value(&self, field: Field) -> Option<f64> {
        Field::NUMERIC_BLOCK
            .iter()
            .position(|f| *f == field)
            .map(|idx| self.numeric[idx])
    }
}

/// Assembler configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblerConfig {
    /// Field validation settings
    pub validation: ValidationConfig,
}

/// Turns raw listings into feature vectors
///
/// Holds only read-only shared state, so one assembler serves concurrent
/// requests without locking.
pub struct FeatureAssembler {
    validator: Validator,
    imputer: Imputer,
    encoder: Arc<dyn CategoricalEncoder>,
}

impl FeatureAssembler {
    /// Create a new assembler
    pub fn new(
        config: AssemblerConfig,
        reference: Arc<ReferenceStatistics>,
        encoder: Arc<dyn CategoricalEncoder>,
    ) -> Self {
        debug!(
            "Creating feature assembler: encoder={}, width={}, strict={}",
            encoder.strategy().as_str(),
            encoder.width(),
            config.validation.strict_format
        );
        Self {
            validator: Validator::new(config.validation),
            imputer: Imputer::new(reference),
            encoder,
        }
    }

    /// Encoder in use
    pub fn encoder(&self) -> &dyn CategoricalEncoder {
        self.encoder.as_ref()
    }

    /// Total width of every produced vector
    pub fn dimension(&self) -> usize {
        NUMERIC_DIMENSION + self.encoder.width()
    }

    /// Parse, validate, derive, impute and encode one record
    pub fn assemble(&self, record: &RawRecord) -> Result<FeatureVector, FeatureError> {
        let torque = parse_torque(record.torque.as_deref().unwrap_or_default());
        let mileage = extract(record.mileage.as_deref().unwrap_or_default());
        let engine = extract(record.engine.as_deref().unwrap_or_default());
        let max_power = extract(record.max_power.as_deref().unwrap_or_default());

        if self.validator.is_strict() {
            self.validator
                .validate_format(fields::TORQUE, record.torque.as_deref(), torque.torque_nm)?;
            self.validator
                .validate_format(fields::MILEAGE, record.mileage.as_deref(), mileage)?;
            self.validator
                .validate_format(fields::ENGINE, record.engine.as_deref(), engine)?;
            self.validator
                .validate_format(fields::MAX_POWER, record.max_power.as_deref(), max_power)?;
        }

        let km_driven = ParsedScalar::from_f64(record.km_driven);
        self.validator.validate(&ListingScalars {
            km_driven,
            mileage,
            engine,
            max_power,
            torque,
        })?;

        let derived = derived::compute(max_power, mileage, engine)?;

        let filled = self.imputer.fill(&[
            (Field::Year, ParsedScalar::from_f64(f64::from(record.year))),
            (Field::KmDriven, km_driven),
            (Field::Mileage, mileage),
            (Field::Engine, engine),
            (Field::MaxPower, max_power),
            (Field::Torque, torque.torque_nm),
            (Field::MaxTorqueRpm, torque.max_torque_rpm),
            (Field::PowerPerLiter, derived.power_per_liter),
            (Field::MileagePerLiter, derived.mileage_per_liter),
        ]);
        let mut numeric = [0.0; NUMERIC_DIMENSION];
        numeric.copy_from_slice(&filled);

        let categorical = self.encoder.encode(&CategoricalFields {
            fuel: record.fuel.clone(),
            seller_type: record.seller_type.clone(),
            transmission: record.transmission.clone(),
            owner: record.owner.clone(),
            seats: self.seat_label(record.seats),
            make: record.make().map(str::to_string),
        })?;

        Ok(FeatureVector {
            numeric,
            categorical,
        })
    }

    /// Assemble each record independently, keeping input order
    pub fn assemble_batch(
        &self,
        records: &[RawRecord],
    ) -> Vec<Result<FeatureVector, FeatureError>> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                self.assemble(record).map_err(|err| {
                    warn!("Record {} rejected: {}", idx, err);
                    err
                })
            })
            .collect()
    }

    /// Seat count as an integer label
    ///
    /// A supplied count is truncated; missing seats use the rounded median.
    fn seat_label(&self, seats: Option<f64>) -> String {
        let seats = match ParsedScalar::from(seats) {
            ParsedScalar::Present(count) => count.trunc(),
            ParsedScalar::Missing => self
                .imputer
                .fill_one(Field::Seats, ParsedScalar::Missing)
                .round(),
        };
        format!("{}", seats as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{CategoricalColumn, EncodedColumn, FittedOneHotEncoder, StaticVocabulary};
    use crate::error::ErrorKind;
    use crate::record::tests::sample as sample_record;
    use crate::reference::tests::{sample as sample_reference, sample_map as sample_reference_map};
    use data_validator::ValidationError;
    use proptest::prelude::*;

    fn assembler() -> FeatureAssembler {
        FeatureAssembler::new(
            AssemblerConfig::default(),
            Arc::new(sample_reference()),
            Arc::new(StaticVocabulary::default()),
        )
    }

    fn fitted_assembler() -> FeatureAssembler {
        let categories = |values: &[&str]| values.iter().map(|s| s.to_string()).collect();
        let encoder = FittedOneHotEncoder::new(vec![
            EncodedColumn {
                column: CategoricalColumn::Fuel,
                categories: categories(&["CNG", "Diesel", "LPG", "Petrol"]),
                drop_first: true,
            },
            EncodedColumn {
                column: CategoricalColumn::Seats,
                categories: categories(&["2", "4", "5", "7"]),
                drop_first: true,
            },
        ])
        .unwrap();
        FeatureAssembler::new(
            AssemblerConfig::default(),
            Arc::new(sample_reference()),
            Arc::new(encoder),
        )
    }

    #[test]
    fn test_assemble_complete_record() {
        let vector = assembler().assemble(&sample_record()).unwrap();

        assert_eq!(vector.numeric[0], 2014.0);
        assert_eq!(vector.numeric[1], 145_500.0);
        assert_eq!(vector.numeric[2], 23.4);
        assert_eq!(vector.numeric[3], 1248.0);
        assert_eq!(vector.numeric[4], 74.0);
        assert_eq!(vector.numeric[5], 190.0);
        assert_eq!(vector.numeric[6], 2000.0);
        assert!((vector.numeric[7] - 74.0 / 1248.0 * 1000.0).abs() < 1e-9);
        assert!((vector.numeric[8] - 23.4 / 1248.0 * 1000.0).abs() < 1e-9);

        assert_eq!(vector.categorical.len(), 18);
        assert_eq!(vector.len(), 27);
        assert_eq!(vector.to_vec().len(), 27);
    }

    #[test]
    fn test_missing_fields_are_imputed() {
        let record = RawRecord {
            mileage: None,
            engine: Some("nan".to_string()),
            torque: Some("nan".to_string()),
            ..sample_record()
        };
        let vector = assembler().assemble(&record).unwrap();

        assert_eq!(vector.numeric_value(Field::Mileage), Some(19.3));
        assert_eq!(vector.numeric_value(Field::Engine), Some(1248.0));
        assert_eq!(vector.numeric_value(Field::Torque), Some(171.0));
        assert_eq!(vector.numeric_value(Field::MaxTorqueRpm), Some(3000.0));
        // Missing engine leaves both ratios to the medians
        assert_eq!(vector.numeric_value(Field::PowerPerLiter), Some(67.2));
        assert_eq!(vector.numeric_value(Field::MileagePerLiter), Some(16.1));
    }

    #[test]
    fn test_garbage_is_imputed_when_lenient() {
        let record = RawRecord {
            max_power: Some("lots bhp".to_string()),
            ..sample_record()
        };
        let vector = assembler().assemble(&record).unwrap();
        assert_eq!(vector.numeric_value(Field::MaxPower), Some(82.0));
    }

    #[test]
    fn test_garbage_is_rejected_when_strict() {
        let strict = FeatureAssembler::new(
            AssemblerConfig {
                validation: ValidationConfig { strict_format: true },
            },
            Arc::new(sample_reference()),
            Arc::new(StaticVocabulary::default()),
        );
        let record = RawRecord {
            max_power: Some("lots bhp".to_string()),
            ..sample_record()
        };
        let err = strict.assemble(&record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.field(), "max_power");

        let record = RawRecord {
            max_power: Some("nan".to_string()),
            ..sample_record()
        };
        assert!(strict.assemble(&record).is_ok());
    }

    #[test]
    fn test_zero_engine_rejected() {
        let record = RawRecord {
            engine: Some("0 CC".to_string()),
            ..sample_record()
        };
        let err = assembler().assemble(&record).unwrap_err();
        assert_eq!(
            err,
            FeatureError::Validation(ValidationError::ZeroDivision { field: "engine" })
        );
    }

    #[test]
    fn test_negative_km_rejected() {
        let record = RawRecord {
            km_driven: -5.0,
            ..sample_record()
        };
        let err = assembler().assemble(&record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);
        assert_eq!(err.field(), "km_driven");
    }

    #[test]
    fn test_missing_seats_use_rounded_median() {
        let record = RawRecord {
            seats: None,
            ..sample_record()
        };
        let vector = assembler().assemble(&record).unwrap();
        // median 5 -> seats slot 1
        assert_eq!(vector.categorical[11], 1.0);
        assert_eq!(vector.categorical[10..18].iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_fractional_seats_truncate() {
        let record = RawRecord {
            seats: Some(6.6),
            ..sample_record()
        };
        let vector = assembler().assemble(&record).unwrap();
        // 6 seats -> slot 2
        assert_eq!(
            &vector.categorical[10..18],
            &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_fractional_median_seats_round() {
        let mut medians = sample_reference_map();
        medians.insert("seats".to_string(), 5.6);
        let assembler = FeatureAssembler::new(
            AssemblerConfig::default(),
            Arc::new(ReferenceStatistics::from_map(&medians).unwrap()),
            Arc::new(StaticVocabulary::default()),
        );
        let record = RawRecord {
            seats: None,
            ..sample_record()
        };
        let vector = assembler.assemble(&record).unwrap();
        // median 5.6 -> 6 seats -> slot 2
        assert_eq!(vector.categorical[12], 1.0);
        assert_eq!(vector.categorical[10..18].iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_fitted_unknown_category() {
        let record = RawRecord {
            fuel: "Electric".to_string(),
            ..sample_record()
        };
        let err = fitted_assembler().assemble(&record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCategory);
        assert_eq!(err.field(), "fuel");

        let vector = fitted_assembler().assemble(&sample_record()).unwrap();
        assert_eq!(vector.categorical, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_static_unknown_category_is_baseline() {
        let record = RawRecord {
            fuel: "Electric".to_string(),
            ..sample_record()
        };
        let vector = assembler().assemble(&record).unwrap();
        assert_eq!(&vector.categorical[0..3], &[0.0; 3]);
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let good = sample_record();
        let bad = RawRecord {
            engine: Some("-1248 CC".to_string()),
            ..sample_record()
        };
        let other = RawRecord {
            year: 2019,
            ..sample_record()
        };

        let results = assembler().assemble_batch(&[good.clone(), bad, other]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().numeric[0], 2014.0);
        assert_eq!(results[1].as_ref().unwrap_err().field(), "engine");
        assert_eq!(results[2].as_ref().unwrap().numeric[0], 2019.0);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &assembler().assemble(&good).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_batch_independence(n in 1usize..8, bad_seed in 0usize..8) {
            let bad_index = bad_seed % n;
            let assembler = assembler();
            let records: Vec<RawRecord> = (0..n)
                .map(|i| {
                    if i == bad_index {
                        RawRecord { engine: Some("0".to_string()), ..sample_record() }
                    } else {
                        RawRecord { year: 2000 + i as i32, ..sample_record() }
                    }
                })
                .collect();

            let results = assembler.assemble_batch(&records);
            prop_assert_eq!(results.len(), n);
            for (i, result) in results.iter().enumerate() {
                if i == bad_index {
                    prop_assert_eq!(result.as_ref().unwrap_err().kind(), ErrorKind::ZeroDivision);
                } else {
                    let alone = assembler.assemble(&records[i]).unwrap();
                    prop_assert_eq!(result.as_ref().unwrap(), &alone);
                }
            }
        }

        #[test]
        fn prop_dimension_is_fixed(
            mileage in "\\PC{0,12}",
            torque in "\\PC{0,24}",
            seats in proptest::option::of(1.0f64..20.0),
        ) {
            let assembler = assembler();
            let record = RawRecord {
                mileage: Some(mileage),
                torque: Some(torque),
                seats,
                ..sample_record()
            };
            if let Ok(vector) = assembler.assemble(&record) {
                prop_assert_eq!(vector.len(), assembler.dimension());
                prop_assert!(vector.numeric.iter().all(|v| v.is_finite()));
            }
        }
    }
}
