//! Risk label produced by the classifier and the recommendation table keyed on it.

use serde::{Deserialize, Serialize};

/// Binary risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    High,
}

impl RiskLabel {
    /// Interpret raw classifier output: `1` is high risk, anything else low.
    #[must_use]
    pub fn from_prediction(prediction: u8) -> Self {
        if prediction == 1 {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Integer flag as stored in the `risk` column.
    #[must_use]
    pub fn as_flag(self) -> i64 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    /// Inverse of [`RiskLabel::as_flag`].
    #[must_use]
    pub fn from_flag(flag: i64) -> Self {
        if flag == 1 {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Canned food and exercise plan for this label.
    #[must_use]
    pub fn recommendation(self) -> Recommendation {
        match self {
            Self::High => HIGH_RISK_PLAN,
            Self::Low => LOW_RISK_PLAN,
        }
    }

    #[must_use]
    pub fn is_high(self) -> bool {
        self == Self::High
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low Risk"),
            Self::High => write!(f, "High Risk"),
        }
    }
}

/// Food and exercise plan pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub food_plan: &'static str,
    pub exercise_plan: &'static str,
}

pub const HIGH_RISK_PLAN: Recommendation = Recommendation {
    food_plan: "Low-fat diet: oats, fruits, grilled veggies, avoid fried food.",
    exercise_plan: "Walk 30 min, breathing & light yoga.",
};

pub const LOW_RISK_PLAN: Recommendation = Recommendation {
    food_plan: "Balanced diet: milk, nuts, rice, dal, vegetables.",
    exercise_plan: "Light jog, stretching, 20 min walk.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_prediction() {
        assert_eq!(RiskLabel::from_prediction(1), RiskLabel::High);
        assert_eq!(RiskLabel::from_prediction(0), RiskLabel::Low);
        assert_eq!(RiskLabel::from_prediction(7), RiskLabel::Low);
    }

    #[test]
    fn test_display() {
        assert_eq!(RiskLabel::High.to_string(), "High Risk");
        assert_eq!(RiskLabel::Low.to_string(), "Low Risk");
    }

    #[test]
    fn test_high_risk_pairs_with_low_fat_and_yoga() {
        let plan = RiskLabel::High.recommendation();
        assert!(plan.food_plan.starts_with("Low-fat diet"));
        assert!(plan.exercise_plan.contains("light yoga"));
    }

    #[test]
    fn test_low_risk_pairs_with_balanced_diet_and_jog() {
        let plan = RiskLabel::Low.recommendation();
        assert!(plan.food_plan.starts_with("Balanced diet"));
        assert!(plan.exercise_plan.starts_with("Light jog"));
    }

    #[test]
    fn test_flag_roundtrip() {
        for label in [RiskLabel::Low, RiskLabel::High] {
            assert_eq!(RiskLabel::from_flag(label.as_flag()), label);
        }
    }
}
