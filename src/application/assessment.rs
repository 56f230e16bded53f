//! Assessment service: Orchestrates one form submission.
//!
//! This service coordinates:
//! - Input validation
//! - Risk classification
//! - Derived metrics and recommendations
//! - Optional persistence
//! - PDF report generation
//!
//! Only validation and classification failures abort a submission. Storage and
//! report failures are reported as notices next to the assessment.

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::StorageError;
use crate::domain::{BodyMeasurements, HealthRecord, RiskLabel, VitalSigns};
use crate::ports::{RecordStore, ReportWriter, RiskClassifier};
use crate::AgewellError;

use super::{Notice, NoticeLevel};

/// Result of a submission as shown to the user.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// The assessed record, carrying its `patient_id` when it was stored.
    pub record: HealthRecord,
    /// Path of the generated report, if rendering succeeded.
    pub report_path: Option<PathBuf>,
    /// Inline status messages in the order they occurred.
    pub notices: Vec<Notice>,
}

impl SubmissionOutcome {
    /// Whether the record made it into storage.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.record.patient_id.is_some()
    }

    /// Whether any step reported an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Service for running a submission end to end.
pub struct AssessmentService<C, S, R>
where
    C: RiskClassifier,
    S: RecordStore,
    R: ReportWriter,
{
    classifier: Arc<C>,
    storage: Arc<S>,
    reports: Arc<R>,
}

impl<C, S, R> AssessmentService<C, S, R>
where
    C: RiskClassifier,
    S: RecordStore,
    S::Error: Into<StorageError>,
    R: ReportWriter,
{
    /// Create a new assessment service.
    pub fn new(classifier: Arc<C>, storage: Arc<S>, reports: Arc<R>) -> Self {
        Self {
            classifier,
            storage,
            reports,
        }
    }

    /// Validate, classify and derive the record without side effects.
    ///
    /// # Errors
    /// Returns error if the inputs are invalid or the classifier fails.
    pub fn assess(
        &self,
        vitals: VitalSigns,
        body: BodyMeasurements,
    ) -> Result<HealthRecord, AgewellError> {
        // Bounds are checked once, before the classifier sees the features.
        vitals.validate()?;
        body.validate()?;

        let prediction = self.classifier.predict(&vitals.to_features())?;
        let risk = RiskLabel::from_prediction(prediction);

        Ok(HealthRecord::from_validated(vitals, body, risk)?)
    }

    /// Run a full submission: assess, optionally persist, then write the report.
    ///
    /// # Arguments
    /// * `persist` - whether to insert the record into storage
    ///
    /// # Errors
    /// Returns error only if the inputs are invalid or the classifier fails.
    pub fn submit(
        &self,
        vitals: VitalSigns,
        body: BodyMeasurements,
        persist: bool,
    ) -> Result<SubmissionOutcome, AgewellError> {
        let mut record = self.assess(vitals, body)?;
        let mut notices = Vec::new();

        tracing::info!(
            "Assessment complete: risk={}, health_score={}",
            record.risk,
            record.health_score
        );

        if persist {
            match self.storage.insert_record(&record) {
                Ok(patient_id) => {
                    record = record.with_patient_id(patient_id);
                    notices.push(Notice::success(format!(
                        "Record saved (patient ID {patient_id})."
                    )));
                }
                Err(e) => {
                    let err: StorageError = e.into();
                    tracing::error!("Failed to save record: {}", err);
                    notices.push(Notice::error(storage_message(&err, "Insert")));
                }
            }
        } else {
            notices.push(Notice::info("Database insert disabled; record not saved."));
        }

        let report_path = match self.reports.write_report(&record) {
            Ok(path) => {
                notices.push(Notice::info(format!("PDF generated: {}", path.display())));
                Some(path)
            }
            Err(e) => {
                tracing::error!("Failed to write report: {}", e);
                notices.push(Notice::error(format!("Report Error: {e}")));
                None
            }
        };

        Ok(SubmissionOutcome {
            record,
            report_path,
            notices,
        })
    }

    /// Total number of stored records.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn record_count(&self) -> Result<usize, AgewellError> {
        self.storage
            .count_records()
            .map_err(|e| AgewellError::Storage(e.into()))
    }
}

/// User-facing text for a storage failure. `action` names the failed statement.
pub(crate) fn storage_message(err: &StorageError, action: &str) -> String {
    match err {
        StorageError::Connection(e) => format!("DB Connection Error: {e}"),
        StorageError::Query(e) => format!("{action} Error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::pdf::PdfReportWriter;
    use crate::adapters::sqlite::SqliteStorage;
    use crate::ports::{ClassifierError, ReportError};
    use tempfile::{tempdir, TempDir};

    /// Classifier that always returns the same class.
    struct FixedClassifier(u8);

    impl RiskClassifier for FixedClassifier {
        fn predict(&self, _features: &[f64]) -> Result<u8, ClassifierError> {
            Ok(self.0)
        }
    }

    struct BrokenClassifier;

    impl RiskClassifier for BrokenClassifier {
        fn predict(&self, _features: &[f64]) -> Result<u8, ClassifierError> {
            Err(ClassifierError::NotLoaded("test".into()))
        }
    }

    struct FailingReports;

    impl ReportWriter for FailingReports {
        fn write_report(&self, _record: &HealthRecord) -> Result<PathBuf, ReportError> {
            Err(ReportError::Render("disk full".into()))
        }
    }

    fn create_test_service<C: RiskClassifier>(
        classifier: C,
        temp: &TempDir,
    ) -> AssessmentService<C, SqliteStorage, PdfReportWriter> {
        AssessmentService::new(
            Arc::new(classifier),
            Arc::new(SqliteStorage::new(temp.path().join("agewell.db"))),
            Arc::new(PdfReportWriter::new(temp.path().join("reports"))),
        )
    }

    fn breaching_vitals() -> VitalSigns {
        VitalSigns {
            age: 60,
            heart_rate: 80,
            systolic_bp: 150,
            cholesterol: 200,
        }
    }

    #[test]
    fn test_assess_uses_classifier_output() {
        let temp = tempdir().expect("tempdir");

        let low = create_test_service(FixedClassifier(0), &temp)
            .assess(breaching_vitals(), BodyMeasurements::default())
            .expect("assess");
        assert_eq!(low.risk, RiskLabel::Low);
        assert_eq!(low.health_score, 70);

        let high = create_test_service(FixedClassifier(1), &temp)
            .assess(breaching_vitals(), BodyMeasurements::default())
            .expect("assess");
        assert_eq!(high.risk, RiskLabel::High);
        assert_eq!(high.health_score, 50);
    }

    #[test]
    fn test_submit_persists_and_writes_report() {
        let temp = tempdir().expect("tempdir");
        let service = create_test_service(FixedClassifier(1), &temp);

        let outcome = service
            .submit(breaching_vitals(), BodyMeasurements::default(), true)
            .expect("submit");

        assert!(outcome.is_saved());
        assert!(!outcome.has_errors());
        assert_eq!(outcome.record.patient_id, Some(1));

        let path = outcome.report_path.expect("report written");
        assert!(path.ends_with("AgeWell_Report_1.pdf"));
        assert_eq!(service.record_count().expect("count"), 1);
    }

    #[test]
    fn test_submit_without_persistence_uses_temp_report() {
        let temp = tempdir().expect("tempdir");
        let service = create_test_service(FixedClassifier(0), &temp);

        let outcome = service
            .submit(VitalSigns::default(), BodyMeasurements::default(), false)
            .expect("submit");

        assert!(!outcome.is_saved());
        assert!(outcome
            .notices
            .iter()
            .any(|n| n.level == NoticeLevel::Info && n.message.contains("not saved")));
        let path = outcome.report_path.expect("report written");
        assert!(path.ends_with("AgeWell_Report_temp.pdf"));
        assert_eq!(service.record_count().expect("count"), 0);
    }

    #[test]
    fn test_storage_failure_is_reported_not_fatal() {
        let temp = tempdir().expect("tempdir");
        let service = AssessmentService::new(
            Arc::new(FixedClassifier(0)),
            Arc::new(SqliteStorage::new(
                temp.path().join("no-such-dir").join("agewell.db"),
            )),
            Arc::new(PdfReportWriter::new(temp.path().join("reports"))),
        );

        let outcome = service
            .submit(VitalSigns::default(), BodyMeasurements::default(), true)
            .expect("submit still succeeds");

        assert!(!outcome.is_saved());
        assert!(outcome.has_errors());
        assert!(outcome.notices[0].message.starts_with("DB Connection Error"));
        assert!(outcome.report_path.is_some());
    }

    #[test]
    fn test_report_failure_is_reported_not_fatal() {
        let temp = tempdir().expect("tempdir");
        let service = AssessmentService::new(
            Arc::new(FixedClassifier(0)),
            Arc::new(SqliteStorage::new(temp.path().join("agewell.db"))),
            Arc::new(FailingReports),
        );

        let outcome = service
            .submit(VitalSigns::default(), BodyMeasurements::default(), true)
            .expect("submit");

        assert!(outcome.is_saved());
        assert!(outcome.report_path.is_none());
        assert!(outcome.has_errors());
    }

    #[test]
    fn test_classifier_failure_aborts() {
        let temp = tempdir().expect("tempdir");
        let service = create_test_service(BrokenClassifier, &temp);

        let err = service
            .submit(VitalSigns::default(), BodyMeasurements::default(), true)
            .expect_err("must abort");
        assert!(matches!(err, AgewellError::Classifier(_)));
        assert_eq!(service.record_count().expect("count"), 0);
    }

    #[test]
    fn test_invalid_input_is_rejected_before_classification() {
        let temp = tempdir().expect("tempdir");
        // The broken classifier would error if it were reached.
        let service = create_test_service(BrokenClassifier, &temp);

        let vitals = VitalSigns {
            systolic_bp: 300,
            ..Default::default()
        };
        let err = service
            .assess(vitals, BodyMeasurements::default())
            .expect_err("must reject");
        assert!(matches!(err, AgewellError::Validation(_)));
    }

    #[test]
    fn test_assess_matches_domain_record() {
        let temp = tempdir().expect("tempdir");
        let service = create_test_service(FixedClassifier(1), &temp);
        let body = BodyMeasurements {
            weight_kg: 82.0,
            height_m: 1.74,
        };

        let record = service.assess(breaching_vitals(), body).expect("assess");
        let expected =
            HealthRecord::assess(breaching_vitals(), body, RiskLabel::High).expect("assess");
        assert_eq!(record, expected);

        let err = service
            .assess(
                breaching_vitals(),
                BodyMeasurements {
                    weight_kg: 82.0,
                    height_m: 0.0,
                },
            )
            .expect_err("must reject");
        assert!(matches!(err, AgewellError::Validation(_)));
    }
}
