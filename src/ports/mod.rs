//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (model artifact, database, PDF).

mod classifier;
mod report;
mod storage;

pub use classifier::{ClassifierError, RiskClassifier};
pub use report::{ReportError, ReportWriter};
pub use storage::{RecordStore, RECENT_LIMIT};
