//! Categorical Encoding
//!
//! Two interchangeable strategies behind [`CategoricalEncoder`]:
//!
//! - [`StaticVocabulary`]: fixed one-hot tables; unseen values encode as an
//!   all-zero segment.
//! - [`FittedOneHotEncoder`]: categories learned at training time; unseen
//!   values are rejected with [`FeatureError::UnknownCategory`].

use crate::error::{ConfigError, FeatureError};
use crate::record::CategoricalFields;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Categorical inputs an encoder may consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    Fuel,
    SellerType,
    Transmission,
    Owner,
    Seats,
    Make,
}

impl CategoricalColumn {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalColumn::Fuel => "fuel",
            CategoricalColumn::SellerType => "seller_type",
            CategoricalColumn::Transmission => "transmission",
            CategoricalColumn::Owner => "owner",
            CategoricalColumn::Seats => "seats",
            CategoricalColumn::Make => "make",
        }
    }

    fn value<'a>(&self, fields: &'a CategoricalFields) -> Option<&'a str> {
        match self {
            CategoricalColumn::Fuel => Some(&fields.fuel),
            CategoricalColumn::SellerType => Some(&fields.seller_type),
            CategoricalColumn::Transmission => Some(&fields.transmission),
            CategoricalColumn::Owner => Some(&fields.owner),
            CategoricalColumn::Seats => Some(&fields.seats),
            CategoricalColumn::Make => fields.make.as_deref(),
        }
    }
}

/// Which encoder the pipeline is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingStrategy {
    /// Built-in one-hot tables
    #[default]
    Static,
    /// Encoder fitted at training time, shipped in the artifact bundle
    Fitted,
}

impl EncodingStrategy {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingStrategy::Static => "static",
            EncodingStrategy::Fitted => "fitted",
        }
    }
}

/// Maps categorical fields to a fixed-width numeric block
pub trait CategoricalEncoder: Send + Sync {
    /// Encode one record's categorical fields
    fn encode(&self, fields: &CategoricalFields) -> Result<Vec<f64>, FeatureError>;

    /// Width of every encoded block
    fn width(&self) -> usize;

    /// Whether unseen values are errors rather than all-zero segments
    fn fails_on_unseen(&self) -> bool;

    /// Strategy this encoder implements
    fn strategy(&self) -> EncodingStrategy;
}

/// One-hot tables for the static strategy
///
/// Position `i` in a table sets slot `i` of that field's segment. Baseline
/// categories are deliberately absent and encode as all zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyTables {
    pub fuel: Vec<String>,
    pub seller_type: Vec<String>,
    pub transmission: Vec<String>,
    pub owner: Vec<String>,
    pub seats: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for VocabularyTables {
    fn default() -> Self {
        Self {
            fuel: strings(&["Diesel", "LPG", "Petrol"]),
            seller_type: strings(&["Individual", "Trustmark Dealer"]),
            transmission: strings(&["Manual"]),
            owner: strings(&[
                "Fourth & Above Owner",
                "Second Owner",
                "Test Drive Car",
                "Third Owner",
            ]),
            seats: strings(&["4", "5", "6", "7", "8", "9", "10", "14"]),
        }
    }
}

fn ensure_unique(column: CategoricalColumn, values: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(values.len());
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(ConfigError::DuplicateVocabularyEntry {
                field: column.as_str(),
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// Static one-hot encoder; never rejects a value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticVocabulary {
    tables: VocabularyTables,
}

impl StaticVocabulary {
    /// Validate and wrap vocabulary tables
    pub fn new(tables: VocabularyTables) -> Result<Self, ConfigError> {
        let vocabulary = Self { tables };
        for (column, table) in vocabulary.segments() {
            ensure_unique(column, table)?;
        }
        Ok(vocabulary)
    }

    fn segments(&self) -> [(CategoricalColumn, &[String]); 5] {
        [
            (CategoricalColumn::Fuel, self.tables.fuel.as_slice()),
            (CategoricalColumn::SellerType, self.tables.seller_type.as_slice()),
            (CategoricalColumn::Transmission, self.tables.transmission.as_slice()),
            (CategoricalColumn::Owner, self.tables.owner.as_slice()),
            (CategoricalColumn::Seats, self.tables.seats.as_slice()),
        ]
    }
}

impl CategoricalEncoder for StaticVocabulary {
    fn encode(&self, fields: &CategoricalFields) -> Result<Vec<f64>, FeatureError> {
        let mut block = Vec::with_capacity(self.width());
        for (column, table) in self.segments() {
            let start = block.len();
            block.resize(start + table.len(), 0.0);
            let value = column.value(fields).unwrap_or_default();
            match table.iter().position(|known| known == value) {
                Some(slot) => block[start + slot] = 1.0,
                None => debug!(
                    "{} {:?} not in vocabulary, encoding as baseline",
                    column.as_str(),
                    value
                ),
            }
        }
        Ok(block)
    }

    fn width(&self) -> usize {
        self.segments().iter().map(|(_, table)| table.len()).sum()
    }

    fn fails_on_unseen(&self) -> bool {
        false
    }

    fn strategy(&self) -> EncodingStrategy {
        EncodingStrategy::Static
    }
}

/// Categories learned for one column at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedColumn {
    pub column: CategoricalColumn,
    pub categories: Vec<String>,
    /// First category is the baseline and gets no slot
    #[serde(default)]
    pub drop_first: bool,
}

impl EncodedColumn {
    fn width(&self) -> usize {
        self.categories.len() - usize::from(self.drop_first)
    }
}

/// One-hot encoder restored from training artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct FittedOneHotEncoder {
    columns: Vec<EncodedColumn>,
    width: usize,
}

impl FittedOneHotEncoder {
    /// Validate fitted columns; each needs at least one unique category
    pub fn new(columns: Vec<EncodedColumn>) -> Result<Self, ConfigError> {
        for column in &columns {
            if column.categories.is_empty() {
                return Err(ConfigError::EmptyCategories(column.column.as_str()));
            }
            ensure_unique(column.column, &column.categories)?;
        }
        let width = columns.iter().map(EncodedColumn::width).sum();
        Ok(Self { columns, width })
    }
}

impl CategoricalEncoder for FittedOneHotEncoder {
    fn encode(&self, fields: &CategoricalFields) -> Result<Vec<f64>, FeatureError> {
        let mut block = Vec::with_capacity(self.width);
        for column in &self.columns {
            let value = column.column.value(fields).unwrap_or_default();
            let position = column
                .categories
                .iter()
                .position(|known| known == value)
                .ok_or_else(|| FeatureError::UnknownCategory {
                    field: column.column.as_str(),
                    value: value.to_string(),
                })?;

            let start = block.len();
            block.resize(start + column.width(), 0.0);
            match (column.drop_first, position) {
                (true, 0) => {}
                (true, p) => block[start + p - 1] = 1.0,
                (false, p) => block[start + p] = 1.0,
            }
        }
        Ok(block)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn fails_on_unseen(&self) -> bool {
        true
    }

    fn strategy(&self) -> EncodingStrategy {
        EncodingStrategy::Fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(fuel: &str) -> CategoricalFields {
        CategoricalFields {
            fuel: fuel.to_string(),
            seller_type: "Individual".to_string(),
            transmission: "Manual".to_string(),
            owner: "First Owner".to_string(),
            seats: "5".to_string(),
            make: Some("Maruti".to_string()),
        }
    }

    fn fitted(drop_first: bool) -> FittedOneHotEncoder {
        FittedOneHotEncoder::new(vec![
            EncodedColumn {
                column: CategoricalColumn::Fuel,
                categories: strings(&["CNG", "Diesel", "LPG", "Petrol"]),
                drop_first,
            },
            EncodedColumn {
                column: CategoricalColumn::Seats,
                categories: strings(&["2", "4", "5", "7"]),
                drop_first,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_static_widths() {
        let vocab = StaticVocabulary::default();
        let widths: Vec<_> = vocab.segments().iter().map(|(_, t)| t.len()).collect();
        assert_eq!(widths, vec![3, 2, 1, 4, 8]);
        assert_eq!(vocab.width(), 18);
        assert!(!vocab.fails_on_unseen());
    }

    #[test]
    fn test_static_known_fuel() {
        let block = StaticVocabulary::default().encode(&fields("Diesel")).unwrap();
        assert_eq!(&block[0..3], &[1.0, 0.0, 0.0]);
        // Individual
        assert_eq!(&block[3..5], &[1.0, 0.0]);
        // Manual
        assert_eq!(block[5], 1.0);
        // First Owner is the baseline
        assert_eq!(&block[6..10], &[0.0; 4]);
        // seats "5" -> slot 1
        assert_eq!(&block[10..18], &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_static_unknown_fuel_is_all_zero() {
        let block = StaticVocabulary::default().encode(&fields("Hydrogen")).unwrap();
        assert_eq!(&block[0..3], &[0.0; 3]);
        assert_eq!(block.len(), 18);
    }

    #[test]
    fn test_static_rejects_duplicates() {
        let mut tables = VocabularyTables::default();
        tables.fuel.push("Diesel".to_string());
        assert_eq!(
            StaticVocabulary::new(tables),
            Err(ConfigError::DuplicateVocabularyEntry {
                field: "fuel",
                value: "Diesel".to_string()
            })
        );
    }

    #[test]
    fn test_fitted_drop_first() {
        let encoder = fitted(true);
        assert_eq!(encoder.width(), 6);
        assert_eq!(
            encoder.encode(&fields("Diesel")).unwrap(),
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(
            encoder.encode(&fields("CNG")).unwrap(),
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_fitted_full_one_hot() {
        let encoder = fitted(false);
        assert_eq!(encoder.width(), 8);
        assert_eq!(
            encoder.encode(&fields("Petrol")).unwrap(),
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_fitted_unknown_category() {
        let encoder = fitted(true);
        assert!(encoder.fails_on_unseen());
        assert_eq!(
            encoder.encode(&fields("Hydrogen")),
            Err(FeatureError::UnknownCategory {
                field: "fuel",
                value: "Hydrogen".to_string()
            })
        );
    }

    #[test]
    fn test_fitted_make_column_requires_name() {
        let encoder = FittedOneHotEncoder::new(vec![EncodedColumn {
            column: CategoricalColumn::Make,
            categories: strings(&["Honda", "Maruti"]),
            drop_first: false,
        }])
        .unwrap();
        assert_eq!(encoder.encode(&fields("Diesel")).unwrap(), vec![0.0, 1.0]);

        let anonymous = CategoricalFields {
            make: None,
            ..fields("Diesel")
        };
        assert!(matches!(
            encoder.encode(&anonymous),
            Err(FeatureError::UnknownCategory { field: "make", .. })
        ));
    }

    #[test]
    fn test_fitted_empty_categories() {
        let result = FittedOneHotEncoder::new(vec![EncodedColumn {
            column: CategoricalColumn::Owner,
            categories: vec![],
            drop_first: true,
        }]);
        assert_eq!(result, Err(ConfigError::EmptyCategories("owner")));
    }
}
