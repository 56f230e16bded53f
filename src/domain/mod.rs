//! Domain layer: Core types and arithmetic.
//!
//! This module contains pure Rust types with no I/O.
//! All inputs are range-checked before a record is derived from them.

pub mod metrics;
mod record;
mod risk;
pub mod vitals;

pub use record::HealthRecord;
pub use risk::{Recommendation, RiskLabel, HIGH_RISK_PLAN, LOW_RISK_PLAN};
pub use vitals::{BodyMeasurements, VitalSigns};

/// Invalid form input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: value {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field}: invalid number")]
    NotANumber { field: &'static str },

    #[error("{field}: must be a whole number")]
    NotAnInteger { field: &'static str },

    #[error("{field}: must be positive")]
    NonPositive { field: &'static str },
}
