//! Feature Engineering Engine
//!
//! Turns raw vehicle listings into model-ready feature vectors: parsing and
//! validation (via `data-validator`), per-liter derived features, median
//! imputation and categorical encoding.

mod derived;
mod encoding;
mod error;
mod features;
mod imputer;
mod record;
mod reference;

pub use derived::{compute as compute_derived, DerivedFeatures};
pub use encoding::{
    CategoricalColumn, CategoricalEncoder, EncodedColumn, EncodingStrategy, FittedOneHotEncoder,
    StaticVocabulary, VocabularyTables,
};
pub use error::{ConfigError, ErrorKind, FeatureError};
pub use features::{AssemblerConfig, FeatureAssembler, FeatureVector, NUMERIC_DIMENSION};
pub use imputer::Imputer;
pub use record::{CategoricalFields, RawRecord};
pub use reference::{Field, ReferenceStatistics};
