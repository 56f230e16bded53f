//! Derived metrics: BMI and the heuristic health score.

use super::{RiskLabel, ValidationError, VitalSigns};

/// Score every assessment starts from.
pub const BASE_HEALTH_SCORE: i32 = 100;

/// Penalty when systolic BP exceeds 140 or cholesterol exceeds 220.
pub const CARDIO_PENALTY: i32 = 30;
/// Penalty when heart rate exceeds 100.
pub const HEART_RATE_PENALTY: i32 = 20;
/// Penalty when age exceeds 70.
pub const AGE_PENALTY: i32 = 10;
/// Penalty when the classifier reports high risk.
pub const HIGH_RISK_PENALTY: i32 = 20;

pub const SYSTOLIC_BP_LIMIT: u32 = 140;
pub const CHOLESTEROL_LIMIT: u32 = 220;
pub const HEART_RATE_LIMIT: u32 = 100;
pub const AGE_LIMIT: u32 = 70;

/// Body mass index rounded to two decimals.
///
/// # Errors
/// Returns `ValidationError::NonPositive` if either input is not a positive finite number.
pub fn bmi(weight_kg: f64, height_m: f64) -> Result<f64, ValidationError> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return Err(ValidationError::NonPositive {
            field: "Weight (kg)",
        });
    }
    if !(height_m.is_finite() && height_m > 0.0) {
        return Err(ValidationError::NonPositive { field: "Height (m)" });
    }

    Ok(round2(weight_kg / (height_m * height_m)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Heuristic 0-100 score: fixed penalties per threshold breach, floored at zero.
#[must_use]
pub fn health_score(vitals: &VitalSigns, risk: RiskLabel) -> u8 {
    let mut score = BASE_HEALTH_SCORE;

    if vitals.systolic_bp > SYSTOLIC_BP_LIMIT || vitals.cholesterol > CHOLESTEROL_LIMIT {
        score -= CARDIO_PENALTY;
    }
    if vitals.heart_rate > HEART_RATE_LIMIT {
        score -= HEART_RATE_PENALTY;
    }
    if vitals.age > AGE_LIMIT {
        score -= AGE_PENALTY;
    }
    if risk.is_high() {
        score -= HIGH_RISK_PENALTY;
    }

    // Bounded to [0, 100] so the narrowing cannot truncate.
    score.clamp(0, BASE_HEALTH_SCORE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vitals(age: u32, heart_rate: u32, systolic_bp: u32, cholesterol: u32) -> VitalSigns {
        VitalSigns {
            age,
            heart_rate,
            systolic_bp,
            cholesterol,
        }
    }

    #[test]
    fn test_bmi_rounding() {
        assert_eq!(bmi(70.0, 1.68).expect("valid"), 24.8);
        assert_eq!(bmi(80.0, 2.0).expect("valid"), 20.0);
        assert_eq!(bmi(55.5, 1.6).expect("valid"), 21.68);
    }

    #[test]
    fn test_bmi_rejects_non_positive() {
        assert!(bmi(0.0, 1.7).is_err());
        assert!(bmi(70.0, 0.0).is_err());
        assert!(bmi(70.0, -1.7).is_err());
        assert!(bmi(f64::INFINITY, 1.7).is_err());
    }

    #[test]
    fn test_score_with_cardio_breach_low_risk() {
        let v = vitals(60, 80, 150, 200);
        assert_eq!(health_score(&v, RiskLabel::Low), 70);
    }

    #[test]
    fn test_score_with_cardio_breach_high_risk() {
        let v = vitals(60, 80, 150, 200);
        assert_eq!(health_score(&v, RiskLabel::High), 50);
    }

    #[test]
    fn test_score_no_breaches() {
        let v = vitals(65, 70, 120, 180);
        assert_eq!(health_score(&v, RiskLabel::Low), 100);
    }

    #[test]
    fn test_score_thresholds_are_strict() {
        // Exactly at each limit is not a breach.
        let v = vitals(70, 100, 140, 220);
        assert_eq!(health_score(&v, RiskLabel::Low), 100);
    }

    #[test]
    fn test_score_all_breaches() {
        let v = vitals(85, 120, 180, 300);
        assert_eq!(health_score(&v, RiskLabel::High), 20);
    }

    #[test]
    fn test_cholesterol_alone_triggers_cardio_penalty() {
        let v = vitals(60, 80, 120, 221);
        assert_eq!(health_score(&v, RiskLabel::Low), 70);
    }

    proptest! {
        #[test]
        fn bmi_matches_rounded_ratio(w in 0.1f64..500.0, h in 0.1f64..3.0) {
            let value = bmi(w, h).expect("positive inputs");
            let raw = w / (h * h);
            prop_assert!((value - raw).abs() <= 0.005 + 1e-9);
            prop_assert!(((value * 100.0) - (value * 100.0).round()).abs() < 1e-6);
        }

        #[test]
        fn score_is_within_bounds(
            age in 40u32..=120,
            hr in 30u32..=200,
            bp in 80u32..=250,
            chol in 100u32..=400,
            high in any::<bool>(),
        ) {
            let risk = if high { RiskLabel::High } else { RiskLabel::Low };
            let score = health_score(&vitals(age, hr, bp, chol), risk);
            prop_assert!(score <= 100);
        }

        #[test]
        fn score_never_increases_with_worse_inputs(
            age in 40u32..=120,
            hr in 30u32..=200,
            bp in 80u32..=250,
            chol in 100u32..=400,
            d_age in 0u32..=40,
            d_hr in 0u32..=60,
            d_bp in 0u32..=80,
            d_chol in 0u32..=120,
            high in any::<bool>(),
        ) {
            let base = vitals(age, hr, bp, chol);
            let worse = vitals(age + d_age, hr + d_hr, bp + d_bp, chol + d_chol);

            let base_risk = RiskLabel::Low;
            let worse_risk = if high { RiskLabel::High } else { RiskLabel::Low };

            prop_assert!(health_score(&worse, worse_risk) <= health_score(&base, base_risk));
            prop_assert!(health_score(&base, RiskLabel::High) <= health_score(&base, RiskLabel::Low));
        }
    }
}
