//! Runtime configuration read from the environment.
//!
//! `main` loads an optional `.env` file first, so every setting can live there.

use std::path::PathBuf;

const DB_PATH_ENV: &str = "AGEWELL_DB_PATH";
const MODEL_PATH_ENV: &str = "AGEWELL_MODEL_PATH";
const REPORT_DIR_ENV: &str = "AGEWELL_REPORT_DIR";
const INSERT_TO_DB_ENV: &str = "AGEWELL_INSERT_TO_DB";
const LOG_MODE_ENV: &str = "AGEWELL_LOG_MODE";
const LOG_FILE_ENV: &str = "AGEWELL_LOG_FILE";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise.
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "file" => Some(Self::File),
            "stdout" => Some(Self::Stdout),
            _ => None,
        }
    }

    /// Resolve to "write to a file?" given whether stdout is interactive.
    ///
    /// Logging to the terminal would corrupt the TUI's alternate screen.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Directory holding `agewell_model.json` (or the file itself).
    pub model_path: PathBuf,
    /// Directory PDF reports are written to.
    pub report_dir: PathBuf,
    /// Initial state of the "insert into database" toggle.
    pub insert_to_db: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// `(variable, value)` pairs that were set but not understood and so fell
    /// back to the default. Logged by `main` once the subscriber is installed.
    pub ignored: Vec<(&'static str, String)>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("agewell.db"),
            model_path: PathBuf::from("models"),
            report_dir: PathBuf::from("reports"),
            insert_to_db: true,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("agewell.log"),
            ignored: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut ignored = Vec::new();

        let insert_to_db = parse_or(
            INSERT_TO_DB_ENV,
            get(INSERT_TO_DB_ENV),
            parse_bool,
            defaults.insert_to_db,
            &mut ignored,
        );
        let log_mode = parse_or(
            LOG_MODE_ENV,
            get(LOG_MODE_ENV),
            LogMode::parse,
            defaults.log_mode,
            &mut ignored,
        );

        Self {
            db_path: get(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            model_path: get(MODEL_PATH_ENV).map_or(defaults.model_path, PathBuf::from),
            report_dir: get(REPORT_DIR_ENV).map_or(defaults.report_dir, PathBuf::from),
            insert_to_db,
            log_mode,
            log_file: get(LOG_FILE_ENV).map_or(defaults.log_file, PathBuf::from),
            ignored,
        }
    }
}

/// Parse `raw` with `parse`, recording it in `ignored` when it is not understood.
fn parse_or<T>(
    key: &'static str,
    raw: Option<String>,
    parse: fn(&str) -> Option<T>,
    fallback: T,
    ignored: &mut Vec<(&'static str, String)>,
) -> T {
    let Some(value) = raw else {
        return fallback;
    };
    match parse(&value) {
        Some(parsed) => parsed,
        None => {
            ignored.push((key, value));
            fallback
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
