//! Unified application error type.
//! All modules (config, db, core, export, cli) return AppError so the
//! top level can log a single failure and terminate the run.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Upstream data
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Session database not found: {0}")]
    MissingDatabase(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error at `{key}`: {reason}")]
    Config { key: String, reason: String },

    // ---------------------------
    // Calendar layout
    // ---------------------------
    #[error("Placement failed on sheet {sheet} for {date}: {reason}")]
    Placement {
        sheet: String,
        date: String,
        reason: String,
    },

    #[error("Sheet {sheet} in phase {current} cannot move to {requested} (next is {expected})")]
    Phase {
        sheet: String,
        current: String,
        requested: String,
        expected: String,
    },

    #[error("Invalid merge on sheet {sheet}: {reason}")]
    Merge { sheet: String, reason: String },

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// True for a corrupt-skeleton failure, the only error that triggers a
    /// debug snapshot before the run aborts.
    pub fn is_placement(&self) -> bool {
        matches!(self, AppError::Placement { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;
