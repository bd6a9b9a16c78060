//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - exam_results(examId, score, totalQuestions, isFinished, lastUpdated)
//! - question_results(examId, questionIndex, isCorrect, timestamp)
//! - schema_master(id, identity_hash) - schema identity bookkeeping

pub mod schema;
pub mod sqlite;

pub use sqlite::{ExamStore, StoreStats};
