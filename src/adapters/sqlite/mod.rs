//! SQLite adapter: Implementation of RecordStore.
//!
//! Provides local, append-only persistence for health records.
//!
//! # Connection Scope
//!
//! Every operation opens its own connection and drops it before returning,
//! on success and on every error path. No connection is held between calls,
//! so the store itself carries no mutable state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags, Row};

use crate::domain::{HealthRecord, RiskLabel, VitalSigns};
use crate::ports::RecordStore;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_COLUMNS: &str = "patient_id, age, heart_rate, systolic_bp, cholesterol, \
     risk, bmi, health_score, food_chart, exercise_plan";

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// SQLite record store.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    /// Create a store backed by the database file at `path`.
    ///
    /// Nothing is opened until the first operation.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection and make sure the schema exists.
    ///
    /// The caller owns the connection; dropping it closes it.
    fn connect(&self) -> Result<Connection, StorageError> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(StorageError::Connection)?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(StorageError::Connection)?;

        Self::init_schema(&conn)?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(conn: &Connection) -> Result<(), StorageError> {
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS health_records (
                patient_id INTEGER PRIMARY KEY AUTOINCREMENT,
                age INTEGER NOT NULL,
                heart_rate INTEGER NOT NULL,
                systolic_bp INTEGER NOT NULL,
                cholesterol INTEGER NOT NULL,
                risk INTEGER NOT NULL,
                bmi REAL NOT NULL,
                health_score INTEGER NOT NULL,
                food_chart TEXT NOT NULL,
                exercise_plan TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<HealthRecord> {
        let risk_flag: i64 = row.get(5)?;

        Ok(HealthRecord {
            patient_id: Some(row.get(0)?),
            vitals: VitalSigns {
                age: row.get(1)?,
                heart_rate: row.get(2)?,
                systolic_bp: row.get(3)?,
                cholesterol: row.get(4)?,
            },
            risk: RiskLabel::from_flag(risk_flag),
            bmi: row.get(6)?,
            // u8 conversion rejects corrupt scores outside 0-255.
            health_score: row.get(7)?,
            food_plan: row.get(8)?,
            exercise_plan: row.get(9)?,
        })
    }
}

impl RecordStore for SqliteStorage {
    type Error = StorageError;

    fn insert_record(&self, record: &HealthRecord) -> Result<i64, Self::Error> {
        let conn = self.connect()?;

        conn.execute(
            r"
            INSERT INTO health_records (
                age, heart_rate, systolic_bp, cholesterol, risk,
                bmi, health_score, food_chart, exercise_plan
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
            params![
                record.vitals.age,
                record.vitals.heart_rate,
                record.vitals.systolic_bp,
                record.vitals.cholesterol,
                record.risk.as_flag(),
                record.bmi,
                record.health_score,
                record.food_plan,
                record.exercise_plan,
            ],
        )?;

        let patient_id = conn.last_insert_rowid();
        tracing::debug!("Inserted health record {}", patient_id);
        Ok(patient_id)
    }

    fn load_recent_records(&self, limit: usize) -> Result<Vec<HealthRecord>, Self::Error> {
        let conn = self.connect()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM health_records ORDER BY patient_id DESC LIMIT ?1"
        ))?;

        let records = stmt
            .query_map(params![limit as i64], Self::record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn count_records(&self) -> Result<usize, Self::Error> {
        let conn = self.connect()?;

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM health_records", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}
