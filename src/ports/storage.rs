//! Storage port: Trait for persistent record storage.
//!
//! This trait abstracts the relational backend (SQLite) from the application logic.

use crate::domain::HealthRecord;

/// Number of rows shown by the history view.
pub const RECENT_LIMIT: usize = 20;

/// Append-only store of health records.
///
/// There is deliberately no update or delete operation.
pub trait RecordStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert a record and return the identifier assigned to it.
    ///
    /// Any `patient_id` already set on the record is ignored.
    ///
    /// # Errors
    /// Returns error if the connection or the insert fails.
    fn insert_record(&self, record: &HealthRecord) -> Result<i64, Self::Error>;

    /// Load the most recent records (up to `limit`), newest first.
    ///
    /// # Errors
    /// Returns error if the connection or the query fails.
    fn load_recent_records(&self, limit: usize) -> Result<Vec<HealthRecord>, Self::Error>;

    /// Count all stored records.
    ///
    /// # Errors
    /// Returns error if the connection or the query fails.
    fn count_records(&self) -> Result<usize, Self::Error>;
}
