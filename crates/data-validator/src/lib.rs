//! Listing Field Parsing and Validation
//!
//! Turns free-form listing text (torque specs, mileage, displacement, power)
//! into explicit [`ParsedScalar`] values and checks them before imputation.
//! Parsers never fail; unusable text becomes [`ParsedScalar::Missing`].

mod error;
mod numeric;
mod rpm;
mod scalar;
mod torque;
mod validator;

pub use error::ValidationError;
pub use numeric::extract;
pub use rpm::resolve as resolve_rpm;
pub use scalar::{is_missing_marker, ParsedScalar, MISSING_MARKER};
pub use torque::{kgm_to_nm, parse as parse_torque, TorqueReading, KGM_TO_NM};
pub use validator::{fields, ListingScalars, ValidationConfig, Validator};
