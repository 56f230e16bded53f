//! Report port: Trait for exporting a record summary to a file.

use std::path::PathBuf;

use crate::domain::HealthRecord;

/// Errors raised while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes a fixed-layout, single-page summary of one record.
pub trait ReportWriter: Send + Sync {
    /// Render `record` and write it to disk.
    ///
    /// # Returns
    /// Path of the written file.
    ///
    /// # Errors
    /// Returns `ReportError` if rendering or writing fails.
    fn write_report(&self, record: &HealthRecord) -> Result<PathBuf, ReportError>;
}
