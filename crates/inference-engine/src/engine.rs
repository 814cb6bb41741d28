//! Price Predictor

use crate::bundle::ArtifactBundle;
use crate::estimator::{Estimator, LinearRegressor};
use crate::scaler::{Scaler, StandardScaler};
use crate::InferenceError;
use feature_engine::{
    AssemblerConfig, CategoricalEncoder, EncodingStrategy, FeatureAssembler, FeatureVector,
    FittedOneHotEncoder, RawRecord, ReferenceStatistics, StaticVocabulary, NUMERIC_DIMENSION,
};
use ndarray::{concatenate, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Predictor configuration chosen at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Categorical encoding strategy
    pub encoding: EncodingStrategy,
    /// Feature assembly settings
    pub assembler: AssemblerConfig,
}

/// Feature pipeline, scaler and estimator wired together
pub struct PricePredictor {
    assembler: FeatureAssembler,
    scaler: Box<dyn Scaler>,
    estimator: Box<dyn Estimator>,
}

impl PricePredictor {
    /// Wire components together, checking that their widths agree
    pub fn new(
        assembler: FeatureAssembler,
        scaler: Box<dyn Scaler>,
        estimator: Box<dyn Estimator>,
    ) -> Result<Self, InferenceError> {
        if scaler.width() != NUMERIC_DIMENSION {
            return Err(InferenceError::InvalidInputShape {
                component: "scaler",
                expected: NUMERIC_DIMENSION,
                actual: scaler.width(),
            });
        }
        if estimator.n_features() != assembler.dimension() {
            return Err(InferenceError::InvalidInputShape {
                component: "estimator",
                expected: assembler.dimension(),
                actual: estimator.n_features(),
            });
        }

        Ok(Self {
            assembler,
            scaler,
            estimator,
        })
    }

    /// Build the predictor from a loaded artifact bundle
    pub fn from_bundle(
        bundle: ArtifactBundle,
        config: &PredictorConfig,
    ) -> Result<Self, InferenceError> {
        let reference = Arc::new(ReferenceStatistics::from_map(&bundle.data_median)?);

        let encoder: Arc<dyn CategoricalEncoder> = match config.encoding {
            EncodingStrategy::Static => match bundle.vocabulary {
                Some(tables) => Arc::new(StaticVocabulary::new(tables)?),
                None => Arc::new(StaticVocabulary::default()),
            },
            EncodingStrategy::Fitted => {
                let columns = bundle.one_hot_encoder.ok_or(InferenceError::MissingEncoder)?;
                Arc::new(FittedOneHotEncoder::new(columns)?)
            }
        };

        let assembler = FeatureAssembler::new(config.assembler.clone(), reference, encoder);
        let scaler = StandardScaler::new(bundle.standard_scaler)?;
        let estimator = LinearRegressor::new(bundle.regression_model)?;

        let predictor = Self::new(assembler, Box::new(scaler), Box::new(estimator))?;
        info!(
            "Price predictor ready: encoding={}, dimension={}",
            config.encoding.as_str(),
            predictor.dimension()
        );
        Ok(predictor)
    }

    /// Encoding strategy in use
    pub fn encoding(&self) -> EncodingStrategy {
        self.assembler.encoder().strategy()
    }

    /// Width of the estimator input
    pub fn dimension(&self) -> usize {
        self.assembler.dimension()
    }

    /// Scale the numeric block, append the categorical block and predict
    pub fn predict_features(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let scaled = self.scaler.transform(ArrayView1::from(&features.numeric[..]))?;
        let categorical = ArrayView1::from(features.categorical.as_slice());
        let sample = concatenate(Axis(0), &[scaled.view(), categorical]).map_err(|_| {
            InferenceError::InvalidInputShape {
                component: "estimator",
                expected: self.dimension(),
                actual: features.len(),
            }
        })?;
        self.estimator.predict(sample.view())
    }

    /// Predict the price of one listing
    pub fn predict(&self, record: &RawRecord) -> Result<f64, InferenceError> {
        let start = std::time::Instant::now();

        let features = self.assembler.assemble(record)?;
        let price = self.predict_features(&features)?;

        debug!("Prediction {:.2} in {}us", price, start.elapsed().as_micros());
        Ok(price)
    }

    /// Predict each listing independently, keeping input order
    pub fn predict_batch(&self, records: &[RawRecord]) -> Vec<Result<f64, InferenceError>> {
        records.iter().map(|record| self.predict(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::tests::{sample, sample_fitted};
    use crate::bundle::BundleFormat;
    use feature_engine::{ConfigError, ErrorKind};

    fn record() -> RawRecord {
        RawRecord {
            name: Some("Mahindra Scorpio S11".to_string()),
            year: 2014,
            km_driven: 110_000.0,
            fuel: "Diesel".to_string(),
            seller_type: "Individual".to_string(),
            transmission: "Manual".to_string(),
            owner: "Second Owner".to_string(),
            mileage: Some("15.4 kmpl".to_string()),
            engine: Some("2179 CC".to_string()),
            max_power: Some("120 bhp".to_string()),
            torque: Some("280Nm@ 1800-2800rpm".to_string()),
            seats: Some(7.0),
        }
    }

    #[test]
    fn test_predict_static() {
        let predictor = PricePredictor::from_bundle(sample(), &PredictorConfig::default()).unwrap();
        assert_eq!(predictor.encoding(), EncodingStrategy::Static);
        assert_eq!(predictor.dimension(), 27);

        let price = predictor.predict(&record()).unwrap();
        assert_eq!(price, 10_000.0 + 2014.0 * 1000.0 + 50_000.0);
    }

    #[test]
    fn test_predict_fitted() {
        let config = PredictorConfig {
            encoding: EncodingStrategy::Fitted,
            ..Default::default()
        };
        let predictor = PricePredictor::from_bundle(sample_fitted(), &config).unwrap();
        let price = predictor.predict(&record()).unwrap();
        assert_eq!(price, 10_000.0 + 2014.0 * 1000.0 + 50_000.0);

        let electric = RawRecord {
            fuel: "Electric".to_string(),
            ..record()
        };
        match predictor.predict(&electric) {
            Err(InferenceError::Features(err)) => {
                assert_eq!(err.kind(), ErrorKind::UnknownCategory)
            }
            other => panic!("expected unknown category, got {:?}", other),
        }
    }

    #[test]
    fn test_fitted_without_encoder() {
        let config = PredictorConfig {
            encoding: EncodingStrategy::Fitted,
            ..Default::default()
        };
        assert!(matches!(
            PricePredictor::from_bundle(sample(), &config),
            Err(InferenceError::MissingEncoder)
        ));
    }

    #[test]
    fn test_incomplete_medians_fail_at_startup() {
        let mut bundle = sample();
        bundle.data_median.remove("seats");
        assert!(matches!(
            PricePredictor::from_bundle(bundle, &PredictorConfig::default()),
            Err(InferenceError::Config(_))
        ));
    }

    #[test]
    fn test_decoded_bundle_with_incomplete_medians_is_rejected() {
        let mut bundle = sample();
        bundle.data_median.remove("power_per_liter");
        let bytes = bundle.encode(BundleFormat::Json).unwrap();
        let decoded = ArtifactBundle::decode(&bytes, BundleFormat::Json).unwrap();

        match PricePredictor::from_bundle(decoded, &PredictorConfig::default()) {
            Err(InferenceError::Config(err)) => {
                assert_eq!(err, ConfigError::MissingReference("power_per_liter"))
            }
            Err(other) => panic!("expected missing reference, got {:?}", other),
            Ok(_) => panic!("expected missing reference"),
        }
    }

    #[test]
    fn test_estimator_width_mismatch() {
        let mut bundle = sample();
        bundle.regression_model.coefficients.truncate(20);
        assert!(matches!(
            PricePredictor::from_bundle(bundle, &PredictorConfig::default()),
            Err(InferenceError::InvalidInputShape {
                component: "estimator",
                expected: 27,
                actual: 20
            })
        ));
    }

    #[test]
    fn test_scaler_width_mismatch() {
        let mut bundle = sample();
        bundle.standard_scaler.mean.push(0.0);
        bundle.standard_scaler.scale.push(1.0);
        assert!(matches!(
            PricePredictor::from_bundle(bundle, &PredictorConfig::default()),
            Err(InferenceError::InvalidInputShape { component: "scaler", .. })
        ));
    }

    #[test]
    fn test_scaling_applies_to_numeric_block_only() {
        let mut bundle = sample();
        bundle.standard_scaler.mean[0] = 2000.0;
        bundle.standard_scaler.scale[0] = 2.0;
        let predictor = PricePredictor::from_bundle(bundle, &PredictorConfig::default()).unwrap();
        // (2014 - 2000) / 2 = 7 scaled years; diesel bit is not scaled
        assert_eq!(predictor.predict(&record()).unwrap(), 10_000.0 + 7_000.0 + 50_000.0);
    }

    #[test]
    fn test_batch_isolation() {
        let predictor = PricePredictor::from_bundle(sample(), &PredictorConfig::default()).unwrap();
        let broken = RawRecord {
            torque: Some("-250Nm@ 2000rpm".to_string()),
            ..record()
        };
        let newer = RawRecord {
            year: 2018,
            ..record()
        };

        let results = predictor.predict_batch(&[record(), broken, newer]);
        assert_eq!(results.len(), 3);
        assert_eq!(*results[0].as_ref().unwrap(), 2_074_000.0);
        match &results[1] {
            Err(InferenceError::Features(err)) => {
                assert_eq!(err.kind(), ErrorKind::NegativeValue);
                assert_eq!(err.field(), "torque");
            }
            other => panic!("expected negative torque, got {:?}", other),
        }
        assert_eq!(*results[2].as_ref().unwrap(), 2_078_000.0);
    }
}
