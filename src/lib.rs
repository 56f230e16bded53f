//! # AgeWell
//!
//! Elderly health risk predictor.
//!
//! This crate provides:
//! - A vital-sign entry form (terminal UI)
//! - Binary risk classification with a pre-trained logistic model
//! - Derived BMI and heuristic health score with canned recommendations
//! - Local record storage, PDF summaries and a blood-pressure trend view
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (vital signs, risk label, health record) and arithmetic
//! - `ports`: Trait definitions for the classifier, record store and report writer
//! - `adapters`: Concrete implementations (JSON model, SQLite, printpdf)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{BodyMeasurements, HealthRecord, RiskLabel, VitalSigns};

/// Result type for AgeWell operations
pub type Result<T> = std::result::Result<T, AgewellError>;

/// Main error type for AgeWell
#[derive(Debug, thiserror::Error)]
pub enum AgewellError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Classifier failed: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Report generation failed: {0}")]
    Report(#[from] ports::ReportError),

    #[error("Invalid input: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
