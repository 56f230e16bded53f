//! Classifier port: Trait for the pre-trained risk model.
//!
//! This trait abstracts the model artifact from the application logic.

/// Errors raised while loading or invoking a classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model not loaded: {0}")]
    NotLoaded(String),

    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Model checksum mismatch for {file}")]
    ChecksumMismatch { file: String },

    #[error("Feature count mismatch: got {got}, expected {expected}")]
    FeatureCount { expected: usize, got: usize },
}

/// Binary risk classifier.
///
/// Implementations wrap an opaque, pre-trained artifact. The only contract is
/// one prediction per feature vector: `1` for high risk, `0` otherwise.
pub trait RiskClassifier: Send + Sync {
    /// Predict the risk class for one feature vector.
    ///
    /// # Arguments
    /// * `features` - `[age, heart_rate, systolic_bp, cholesterol]`
    ///
    /// # Errors
    /// Returns `ClassifierError::FeatureCount` if the vector has the wrong length.
    fn predict(&self, features: &[f64]) -> Result<u8, ClassifierError>;
}
