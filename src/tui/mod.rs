//! TUI module: Terminal User Interface using Ratatui.
//!
//! Three screens:
//! - Entry form with the database insert toggle
//! - Assessment result with inline notices
//! - Latest records with the systolic BP trend

mod app;
mod styles;
mod ui;

pub use app::{App, Screen, NO_REPORT_WARNING};
pub use styles::MedicalTheme;
