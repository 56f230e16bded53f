//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `model`: JSON-exported logistic model behind `RiskClassifier`
//! - `sqlite`: SQLite record storage
//! - `pdf`: printpdf report writer
//! - `redact`: credential filtering for logs

pub mod model;
pub mod pdf;
pub mod redact;
pub mod sqlite;

// Re-export storage error for lib.rs
pub use sqlite::StorageError;
