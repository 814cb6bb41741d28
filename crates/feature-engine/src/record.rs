//! Raw Listing Records

use serde::{Deserialize, Serialize};

/// One listing as submitted, before any parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Full listing title, e.g. "Maruti Swift Dzire VDI"
    #[serde(default)]
    pub name: Option<String>,
    /// Model year
    pub year: i32,
    /// Odometer reading (km)
    pub km_driven: f64,
    /// Fuel type, e.g. "Diesel"
    pub fuel: String,
    /// Seller type, e.g. "Individual"
    pub seller_type: String,
    /// Transmission, e.g. "Manual"
    pub transmission: String,
    /// Ownership history, e.g. "First Owner"
    pub owner: String,
    /// Fuel efficiency text, e.g. "23.4 kmpl"
    #[serde(default)]
    pub mileage: Option<String>,
    /// Displacement text, e.g. "1248 CC"
    #[serde(default)]
    pub engine: Option<String>,
    /// Power text, e.g. "74 bhp"
    #[serde(default)]
    pub max_power: Option<String>,
    /// Torque text, e.g. "190Nm@ 2000rpm"
    #[serde(default)]
    pub torque: Option<String>,
    /// Seat count
    #[serde(default)]
    pub seats: Option<f64>,
}

impl RawRecord {
    /// Manufacturer: first word of the listing title
    pub fn make(&self) -> Option<&str> {
        self.name.as_deref()?.split_whitespace().next()
    }
}

/// Categorical inputs handed to a [`crate::CategoricalEncoder`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalFields {
    pub fuel: String,
    pub seller_type: String,
    pub transmission: String,
    pub owner: String,
    /// Integer seat count rendered as text ("5")
    pub seats: String,
    pub make: Option<String>,
}
