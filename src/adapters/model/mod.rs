//! Model adapter: Implementation of RiskClassifier over an exported logistic model.
//!
//! The pre-trained classifier ships as `agewell_model.json`: a standard scaler
//! followed by logistic regression over `[age, heart_rate, systolic_bp, cholesterol]`.
//!
//! # Integrity
//!
//! When the model directory contains `manifest.json`, the model bytes must match
//! the SHA-256 digest recorded there. A directory without a manifest still loads,
//! with a warning. Manifests are produced by the `hash_model` binary.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::{ClassifierError, RiskClassifier};

/// File name of the exported model inside the model directory.
pub const MODEL_FILE: &str = "agewell_model.json";

/// File name of the checksum manifest inside the model directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Number of input features the model is trained on.
pub const FEATURE_COUNT: usize = 4;

const DEFAULT_THRESHOLD: f64 = 0.5;

/// Parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedModel {
    pub feature_names: Vec<String>,
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl ExportedModel {
    /// Check dimensions and numeric sanity.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidModel` describing the first problem found.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let n = self.feature_names.len();
        if n != FEATURE_COUNT {
            return Err(ClassifierError::InvalidModel(format!(
                "expected {FEATURE_COUNT} features, model declares {n}"
            )));
        }
        if self.coefficients.len() != n
            || self.scaler_mean.len() != n
            || self.scaler_scale.len() != n
        {
            return Err(ClassifierError::InvalidModel(
                "parameter lengths do not match feature_names length".into(),
            ));
        }
        if self
            .scaler_scale
            .iter()
            .any(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(ClassifierError::InvalidModel(
                "scaler_scale entries must be finite and non-zero".into(),
            ));
        }
        if self
            .coefficients
            .iter()
            .chain(self.scaler_mean.iter())
            .chain(std::iter::once(&self.intercept))
            .any(|v| !v.is_finite())
        {
            return Err(ClassifierError::InvalidModel(
                "coefficients, means and intercept must be finite".into(),
            ));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ClassifierError::InvalidModel(format!(
                "threshold {} must lie in (0, 1)",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Checksum manifest binding model files to their SHA-256 digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: u32,
    pub files: BTreeMap<String, String>,
}

impl ModelManifest {
    /// Build a version-1 manifest for the given `(file name, contents)` pairs.
    #[must_use]
    pub fn for_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Self {
        Self {
            version: 1,
            files: files
                .into_iter()
                .map(|(name, bytes)| (name.to_string(), sha256_hex(bytes)))
                .collect(),
        }
    }
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Logistic-regression classifier loaded from disk.
pub struct LogisticModel {
    model: Option<ExportedModel>,
}

impl LogisticModel {
    /// Create an adapter with no model loaded.
    #[must_use]
    pub fn new() -> Self {
        Self { model: None }
    }

    /// Wrap an in-memory model after validating it.
    ///
    /// # Errors
    /// Returns error if the model is malformed.
    pub fn from_exported(model: ExportedModel) -> Result<Self, ClassifierError> {
        model.validate()?;
        Ok(Self { model: Some(model) })
    }

    /// Load the model from a directory (or a direct path to the model JSON).
    ///
    /// # Errors
    /// Returns error if the file is missing, fails its manifest checksum, or is malformed.
    pub fn load_model(&mut self, model_path: &Path) -> Result<(), ClassifierError> {
        let (base_dir, model_file) = Self::resolve_paths(model_path);

        let bytes = fs::read(&model_file)?;
        Self::verify_checksum(&base_dir, &model_file, &bytes)?;

        let model: ExportedModel = serde_json::from_slice(&bytes)?;
        model.validate()?;

        tracing::info!(
            "Loaded model from {:?} (n_features={}, threshold={})",
            model_file,
            model.feature_names.len(),
            model.threshold
        );

        self.model = Some(model);
        Ok(())
    }

    /// Whether a model has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Probability of the high-risk class for one feature vector.
    ///
    /// # Errors
    /// Returns error if no model is loaded or the vector length is wrong.
    pub fn predict_proba(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| ClassifierError::NotLoaded("call load_model first".into()))?;

        if features.len() != model.coefficients.len() {
            return Err(ClassifierError::FeatureCount {
                expected: model.coefficients.len(),
                got: features.len(),
            });
        }

        let z = features
            .iter()
            .zip(&model.scaler_mean)
            .zip(&model.scaler_scale)
            .zip(&model.coefficients)
            .fold(model.intercept, |acc, (((x, mean), scale), coef)| {
                acc + coef * (x - mean) / scale
            });

        Ok(sigmoid(z))
    }

    fn resolve_paths(model_path: &Path) -> (PathBuf, PathBuf) {
        if model_path.is_dir() {
            (model_path.to_path_buf(), model_path.join(MODEL_FILE))
        } else {
            let base = model_path
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            (base, model_path.to_path_buf())
        }
    }

    fn verify_checksum(
        base_dir: &Path,
        model_file: &Path,
        bytes: &[u8],
    ) -> Result<(), ClassifierError> {
        let manifest_path = base_dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            tracing::warn!(
                "No {} next to {:?}; loading model without integrity check",
                MANIFEST_FILE,
                model_file
            );
            return Ok(());
        }

        let manifest: ModelManifest = serde_json::from_slice(&fs::read(&manifest_path)?)?;
        if manifest.version != 1 {
            return Err(ClassifierError::InvalidModel(format!(
                "unsupported manifest version {}",
                manifest.version
            )));
        }

        let file_name = model_file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(MODEL_FILE)
            .to_string();

        let expected = manifest.files.get(&file_name).ok_or_else(|| {
            ClassifierError::InvalidModel(format!("{MANIFEST_FILE} does not list {file_name}"))
        })?;

        if !expected.eq_ignore_ascii_case(&sha256_hex(bytes)) {
            return Err(ClassifierError::ChecksumMismatch { file: file_name });
        }

        tracing::debug!("Model checksum verified against {:?}", manifest_path);
        Ok(())
    }
}

impl Default for LogisticModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskClassifier for LogisticModel {
    fn predict(&self, features: &[f64]) -> Result<u8, ClassifierError> {
        let probability = self.predict_proba(features)?;
        let threshold = self
            .model
            .as_ref()
            .map_or(DEFAULT_THRESHOLD, |m| m.threshold);

        Ok(u8::from(probability >= threshold))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_model(intercept: f64) -> ExportedModel {
        ExportedModel {
            feature_names: vec![
                "age".into(),
                "heart_rate".into(),
                "systolic_bp".into(),
                "cholesterol".into(),
            ],
            scaler_mean: vec![70.0, 80.0, 130.0, 200.0],
            scaler_scale: vec![10.0, 15.0, 20.0, 40.0],
            coefficients: vec![0.5, 0.4, 1.2, 0.8],
            intercept,
            threshold: 0.5,
        }
    }

    fn write_model(dir: &Path, model: &ExportedModel) -> Vec<u8> {
        let bytes = serde_json::to_vec(model).expect("serialize model");
        fs::write(dir.join(MODEL_FILE), &bytes).expect("write model");
        bytes
    }

    #[test]
    fn test_load_without_manifest() {
        let temp = tempdir().expect("tempdir");
        write_model(temp.path(), &sample_model(0.0));

        let mut model = LogisticModel::new();
        model.load_model(temp.path()).expect("load model");
        assert!(model.is_loaded());
    }

    #[test]
    fn test_load_with_matching_manifest() {
        let temp = tempdir().expect("tempdir");
        let bytes = write_model(temp.path(), &sample_model(0.0));

        let manifest = ModelManifest::for_files([(MODEL_FILE, bytes.as_slice())]);
        fs::write(
            temp.path().join(MANIFEST_FILE),
            serde_json::to_vec(&manifest).expect("serialize manifest"),
        )
        .expect("write manifest");

        let mut model = LogisticModel::new();
        model.load_model(temp.path()).expect("checksum should match");
    }

    #[test]
    fn test_tampered_model_is_rejected() {
        let temp = tempdir().expect("tempdir");
        let bytes = write_model(temp.path(), &sample_model(0.0));

        let manifest = ModelManifest::for_files([(MODEL_FILE, bytes.as_slice())]);
        fs::write(
            temp.path().join(MANIFEST_FILE),
            serde_json::to_vec(&manifest).expect("serialize manifest"),
        )
        .expect("write manifest");

        // Rewrite with different parameters after the manifest was taken.
        write_model(temp.path(), &sample_model(3.0));

        let mut model = LogisticModel::new();
        let err = model.load_model(temp.path()).expect_err("must fail");
        assert!(matches!(err, ClassifierError::ChecksumMismatch { .. }));
        assert!(!model.is_loaded());
    }

    #[test]
    fn test_missing_model_file() {
        let temp = tempdir().expect("tempdir");
        let mut model = LogisticModel::new();
        assert!(matches!(
            model.load_model(temp.path()),
            Err(ClassifierError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_dimensions_are_rejected() {
        let mut exported = sample_model(0.0);
        exported.coefficients.pop();
        assert!(LogisticModel::from_exported(exported).is_err());

        let mut exported = sample_model(0.0);
        exported.scaler_scale[2] = 0.0;
        assert!(LogisticModel::from_exported(exported).is_err());

        let mut exported = sample_model(0.0);
        exported.threshold = 1.5;
        assert!(LogisticModel::from_exported(exported).is_err());
    }

    #[test]
    fn test_prediction_follows_threshold() {
        let model = LogisticModel::from_exported(sample_model(0.0)).expect("valid model");

        // At the scaler mean z == intercept == 0, so p == 0.5 and the class is 1.
        let at_mean = [70.0, 80.0, 130.0, 200.0];
        let p = model.predict_proba(&at_mean).expect("predict");
        assert!((p - 0.5).abs() < 1e-12);
        assert_eq!(model.predict(&at_mean).expect("predict"), 1);

        let healthy = [50.0, 60.0, 100.0, 150.0];
        assert_eq!(model.predict(&healthy).expect("predict"), 0);

        let strained = [90.0, 120.0, 190.0, 320.0];
        assert_eq!(model.predict(&strained).expect("predict"), 1);
    }

    #[test]
    fn test_feature_count_mismatch() {
        let model = LogisticModel::from_exported(sample_model(0.0)).expect("valid model");
        let err = model.predict(&[1.0, 2.0]).expect_err("wrong length");
        assert!(matches!(
            err,
            ClassifierError::FeatureCount {
                expected: 4,
                got: 2
            }
        ));
    }

    #[test]
    fn test_predict_without_model() {
        let model = LogisticModel::new();
        assert!(matches!(
            model.predict(&[70.0, 80.0, 130.0, 200.0]),
            Err(ClassifierError::NotLoaded(_))
        ));
    }

    #[test]
    fn test_threshold_defaults_when_absent() {
        let json = r#"{
            "feature_names": ["age", "heart_rate", "systolic_bp", "cholesterol"],
            "scaler_mean": [0, 0, 0, 0],
            "scaler_scale": [1, 1, 1, 1],
            "coefficients": [0, 0, 0, 0],
            "intercept": 0
        }"#;
        let exported: ExportedModel = serde_json::from_str(json).expect("parse");
        assert!((exported.threshold - 0.5).abs() < f64::EPSILON);
    }
}
