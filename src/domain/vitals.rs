//! Vital-sign inputs collected by the entry form.
//!
//! Ranges mirror the form bounds: age 40-120, heart rate 30-200,
//! systolic BP 80-250, cholesterol 100-400, weight 30-200 kg, height 1.0-2.2 m.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Inclusive bounds for an integer vital.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const AGE_RANGE: IntRange = IntRange::new(40, 120);
pub const HEART_RATE_RANGE: IntRange = IntRange::new(30, 200);
pub const SYSTOLIC_BP_RANGE: IntRange = IntRange::new(80, 250);
pub const CHOLESTEROL_RANGE: IntRange = IntRange::new(100, 400);

/// Weight bounds in kilograms.
pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 200.0);
/// Height bounds in meters.
pub const HEIGHT_RANGE_M: (f64, f64) = (1.0, 2.2);

/// The four measurements fed to the classifier and stored with each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Age in years
    pub age: u32,
    /// Resting heart rate in beats per minute
    pub heart_rate: u32,
    /// Systolic blood pressure in mmHg
    pub systolic_bp: u32,
    /// Total cholesterol in mg/dL
    pub cholesterol: u32,
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            age: 70,
            heart_rate: 80,
            systolic_bp: 130,
            cholesterol: 200,
        }
    }
}

impl VitalSigns {
    /// Feature vector in classifier order: age, heart rate, systolic BP, cholesterol.
    #[must_use]
    pub fn to_features(&self) -> [f64; 4] {
        [
            f64::from(self.age),
            f64::from(self.heart_rate),
            f64::from(self.systolic_bp),
            f64::from(self.cholesterol),
        ]
    }

    /// Check every vital against its form bounds.
    ///
    /// # Errors
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let checks = [
            ("Age", self.age, AGE_RANGE),
            ("Heart Rate", self.heart_rate, HEART_RATE_RANGE),
            ("Systolic BP", self.systolic_bp, SYSTOLIC_BP_RANGE),
            ("Cholesterol", self.cholesterol, CHOLESTEROL_RANGE),
        ];

        for (field, value, range) in checks {
            if !range.contains(value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    value: f64::from(value),
                    min: f64::from(range.min),
                    max: f64::from(range.max),
                });
            }
        }
        Ok(())
    }
}

/// Weight and height, used only to derive BMI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub weight_kg: f64,
    pub height_m: f64,
}

impl Default for BodyMeasurements {
    fn default() -> Self {
        Self {
            weight_kg: 70.0,
            height_m: 1.68,
        }
    }
}

impl BodyMeasurements {
    /// # Errors
    /// Returns an error if weight or height falls outside the form bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let checks = [
            ("Weight (kg)", self.weight_kg, WEIGHT_RANGE_KG),
            ("Height (m)", self.height_m, HEIGHT_RANGE_M),
        ];

        for (field, value, (min, max)) in checks {
            if !value.is_finite() || value < min || value > max {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}
