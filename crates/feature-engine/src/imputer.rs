//! Missing-value Imputation

use crate::reference::{Field, ReferenceStatistics};
use data_validator::ParsedScalar;
use std::sync::Arc;
use tracing::debug;

/// Replaces missing scalars with reference medians
pub struct Imputer {
    reference: Arc<ReferenceStatistics>,
}

impl Imputer {
    /// Create an imputer over shared reference statistics
    pub fn new(reference: Arc<ReferenceStatistics>) -> Self {
        Self { reference }
    }

    /// Value of a single field, imputed if missing
    pub fn fill_one(&self, field: Field, value: ParsedScalar) -> f64 {
        match value {
            ParsedScalar::Present(v) => v,
            ParsedScalar::Missing => {
                let median = self.reference.median(field);
                debug!("Imputing {} with median {}", field.as_str(), median);
                median
            }
        }
    }

    /// Fill a sequence of fields, preserving order
    pub fn fill(&self, values: &[(Field, ParsedScalar)]) -> Vec<f64> {
        values
            .iter()
            .map(|&(field, value)| self.fill_one(field, value))
            .collect()
    }
}
