//! # Examtrack - Exam preparation progress store
//!
//! Durable storage of quiz-drill outcomes for an exam-preparation app.
//!
//! Examtrack provides:
//! - Two-table SQLite persistence of exam and per-question results
//! - Schema creation on first use and strict validation on every open
//! - Atomic upsert writes and parameterized typed reads
//! - An exam catalog loaded from JSON for progress reporting

pub mod catalog;
pub mod config;
pub mod record;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use catalog::{Exam, ExamCatalog, Question};
pub use record::{ExamResult, QuestionResult};
pub use storage::{ExamStore, StoreStats};

/// Result type alias for examtrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for examtrack operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Live database schema does not match the expected definition.
    /// Fatal at store initialization; the store refuses to serve.
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    /// A write violated a primary-key or non-null constraint, or the
    /// input was rejected before reaching the engine. No partial effect.
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("storage error: {0}")]
    Storage(rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Error::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
            }
            _ => Error::Storage(err),
        }
    }
}
