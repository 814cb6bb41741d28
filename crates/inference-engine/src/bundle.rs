//! Training Artifact Bundle

use crate::estimator::LinearModelParams;
use crate::scaler::ScalerParams;
use crate::InferenceError;
use feature_engine::{EncodedColumn, VocabularyTables};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// On-disk bundle encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleFormat {
    Json,
    Postcard,
}

impl BundleFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(BundleFormat::Json),
            Some("bin") | Some("postcard") => Ok(BundleFormat::Postcard),
            other => Err(InferenceError::BundleLoad(format!(
                "unsupported bundle extension {:?} for {}",
                other,
                path.display()
            ))),
        }
    }
}

/// Everything produced at training time that inference needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBundle {
    /// Fitted regression model
    pub regression_model: LinearModelParams,
    /// Fitted scaler for the numeric block
    pub standard_scaler: ScalerParams,
    /// Fitted one-hot encoder columns, required for fitted encoding
    #[serde(default)]
    pub one_hot_encoder: Option<Vec<EncodedColumn>>,
    /// Static vocabulary override; built-in tables are used when absent
    #[serde(default)]
    pub vocabulary: Option<VocabularyTables>,
    /// Training medians by field name
    pub data_median: HashMap<String, f64>,
}

impl ArtifactBundle {
    /// Decode a bundle from bytes
    pub fn decode(bytes: &[u8], format: BundleFormat) -> Result<Self, InferenceError> {
        match format {
            BundleFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| InferenceError::BundleDecode(e.to_string())),
            BundleFormat::Postcard => postcard::from_bytes(bytes)
                .map_err(|e| InferenceError::BundleDecode(e.to_string())),
        }
    }

    /// Encode a bundle to bytes
    pub fn encode(&self, format: BundleFormat) -> Result<Vec<u8>, InferenceError> {
        match format {
            BundleFormat::Json => serde_json::to_vec_pretty(self)
                .map_err(|e| InferenceError::BundleDecode(e.to_string())),
            BundleFormat::Postcard => {
                postcard::to_allocvec(self).map_err(|e| InferenceError::BundleDecode(e.to_string()))
            }
        }
    }

    /// Read a bundle from disk, format chosen by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let format = BundleFormat::from_path(path)?;
        let bytes = std::fs::read(path)
            .map_err(|e| InferenceError::BundleLoad(format!("{}: {}", path.display(), e)))?;

        let bundle = Self::decode(&bytes, format)?;
        info!(
            "Loaded artifact bundle from {} ({} bytes, {} coefficients)",
            path.display(),
            bytes.len(),
            bundle.regression_model.coefficients.len()
        );
        Ok(bundle)
    }
}
