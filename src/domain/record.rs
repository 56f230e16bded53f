//! The health record created on each form submission.

use serde::{Deserialize, Serialize};

use super::{metrics, BodyMeasurements, RiskLabel, ValidationError, VitalSigns};

/// Immutable assessment of one submission.
///
/// `patient_id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub patient_id: Option<i64>,
    pub vitals: VitalSigns,
    pub risk: RiskLabel,
    pub bmi: f64,
    pub health_score: u8,
    pub food_plan: String,
    pub exercise_plan: String,
}

impl HealthRecord {
    /// Derive BMI, health score and recommendations for a classified submission.
    ///
    /// # Errors
    /// Returns an error if any input is outside its form bounds.
    pub fn assess(
        vitals: VitalSigns,
        body: BodyMeasurements,
        risk: RiskLabel,
    ) -> Result<Self, ValidationError> {
        vitals.validate()?;
        body.validate()?;
        Self::from_validated(vitals, body, risk)
    }

    /// [`Self::assess`] for inputs the caller has already validated.
    pub(crate) fn from_validated(
        vitals: VitalSigns,
        body: BodyMeasurements,
        risk: RiskLabel,
    ) -> Result<Self, ValidationError> {
        let bmi = metrics::bmi(body.weight_kg, body.height_m)?;
        let health_score = metrics::health_score(&vitals, risk);
        let plan = risk.recommendation();

        Ok(Self {
            patient_id: None,
            vitals,
            risk,
            bmi,
            health_score,
            food_plan: plan.food_plan.to_string(),
            exercise_plan: plan.exercise_plan.to_string(),
        })
    }

    /// Same record with the identifier assigned by storage.
    #[must_use]
    pub fn with_patient_id(mut self, patient_id: i64) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    /// Identifier as shown in reports: the stored id, or `temp` when unsaved.
    #[must_use]
    pub fn display_id(&self) -> String {
        self.patient_id
            .map_or_else(|| "temp".to_string(), |id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_low_risk() {
        let vitals = VitalSigns {
            age: 60,
            heart_rate: 80,
            systolic_bp: 150,
            cholesterol: 200,
        };
        let record =
            HealthRecord::assess(vitals, BodyMeasurements::default(), RiskLabel::Low)
                .expect("valid inputs");

        assert_eq!(record.health_score, 70);
        assert_eq!(record.bmi, 24.8);
        assert!(record.food_plan.starts_with("Balanced diet"));
        assert!(record.patient_id.is_none());
        assert_eq!(record.display_id(), "temp");
    }

    #[test]
    fn test_assess_high_risk() {
        let vitals = VitalSigns {
            age: 60,
            heart_rate: 80,
            systolic_bp: 150,
            cholesterol: 200,
        };
        let record =
            HealthRecord::assess(vitals, BodyMeasurements::default(), RiskLabel::High)
                .expect("valid inputs");

        assert_eq!(record.health_score, 50);
        assert!(record.exercise_plan.contains("yoga"));
    }

    #[test]
    fn test_assess_rejects_invalid_vitals() {
        let vitals = VitalSigns {
            heart_rate: 250,
            ..Default::default()
        };
        assert!(
            HealthRecord::assess(vitals, BodyMeasurements::default(), RiskLabel::Low).is_err()
        );
    }

    #[test]
    fn test_with_patient_id() {
        let record = HealthRecord::assess(
            VitalSigns::default(),
            BodyMeasurements::default(),
            RiskLabel::Low,
        )
        .expect("valid inputs")
        .with_patient_id(42);

        assert_eq!(record.patient_id, Some(42));
        assert_eq!(record.display_id(), "42");
    }
}
