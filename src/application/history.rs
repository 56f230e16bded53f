//! History service: The most recent stored records and their BP trend.

use std::sync::Arc;

use crate::domain::HealthRecord;
use crate::ports::RecordStore;
use crate::AgewellError;

/// Recent records plus the systolic BP series drawn under the table.
#[derive(Debug, Clone, Default)]
pub struct RecordHistory {
    /// Newest first, as returned by storage.
    pub records: Vec<HealthRecord>,
    /// `(patient_id, systolic_bp)` points, ascending by id.
    pub bp_trend: Vec<(f64, f64)>,
}

impl RecordHistory {
    /// Build the history view from records ordered newest first.
    #[must_use]
    pub fn from_records(records: Vec<HealthRecord>) -> Self {
        let mut bp_trend: Vec<(f64, f64)> = records
            .iter()
            .filter_map(|r| {
                r.patient_id
                    .map(|id| (id as f64, f64::from(r.vitals.systolic_bp)))
            })
            .collect();
        bp_trend.sort_by(|a, b| a.0.total_cmp(&b.0));

        Self { records, bp_trend }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Min and max of the trend on both axes, for chart bounds.
    #[must_use]
    pub fn trend_bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.bp_trend.first()?;
        let last = self.bp_trend.last()?;
        let (lo, hi) = self
            .bp_trend
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, bp)| {
                (lo.min(bp), hi.max(bp))
            });
        Some(([first.0, last.0], [lo, hi]))
    }
}

/// Service for reading back stored records.
pub struct HistoryService<S>
where
    S: RecordStore,
{
    storage: Arc<S>,
}

impl<S> HistoryService<S>
where
    S: RecordStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new history service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Load up to `limit` records, newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn latest(&self, limit: usize) -> Result<RecordHistory, AgewellError> {
        let records = self
            .storage
            .load_recent_records(limit)
            .map_err(|e| AgewellError::Storage(e.into()))?;

        tracing::debug!("Loaded {} history records", records.len());

        Ok(RecordHistory::from_records(records))
    }
}
