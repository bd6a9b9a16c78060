//! Result records - the two row types persisted by the store
//!
//! Plain data carriers: the exam-taking controller hands these in and
//! gets them back from queries. Booleans are stored as 0/1 integers in
//! SQLite and round-trip exactly.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Outcome of one exam run, keyed by exam id.
///
/// Re-recording an exam replaces the previous row wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResult {
    /// Unique exam identifier (primary key)
    pub exam_id: String,
    /// Number of correctly answered questions
    pub score: u32,
    /// Total number of questions in the exam
    pub total_questions: u32,
    /// Whether the run went through the final question
    pub is_finished: bool,
    /// Epoch timestamp in milliseconds of the last write
    pub last_updated: i64,
}

impl ExamResult {
    /// Create a result stamped with the current time
    pub fn new(exam_id: impl Into<String>, score: u32, total_questions: u32, is_finished: bool) -> Self {
        Self {
            exam_id: exam_id.into(),
            score,
            total_questions,
            is_finished,
            last_updated: now_millis(),
        }
    }

    /// Score as a percentage of the total (0.0 when the exam is empty)
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.score as f64 * 100.0 / self.total_questions as f64
        }
    }
}

/// Outcome of a single question within an exam.
///
/// Keyed by (exam id, question index); answering the same question again
/// replaces the previous row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// Exam this answer belongs to (no enforced foreign key)
    pub exam_id: String,
    /// Zero-based position of the question within the exam
    pub question_index: u32,
    /// Whether the given answer was correct
    pub is_correct: bool,
    /// Epoch timestamp in milliseconds of the answer
    pub timestamp: i64,
}

impl QuestionResult {
    /// Create a result stamped with the current time
    pub fn new(exam_id: impl Into<String>, question_index: u32, is_correct: bool) -> Self {
        Self {
            exam_id: exam_id.into(),
            question_index,
            is_correct,
            timestamp: now_millis(),
        }
    }
}

/// Current wall-clock time as epoch milliseconds
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let result = ExamResult::new("2019-03-A", 45, 60, true);
        assert!((result.percentage() - 75.0).abs() < f64::EPSILON);

        let empty = ExamResult::new("empty", 0, 0, false);
        assert_eq!(empty.percentage(), 0.0);
    }

    #[test]
    fn test_now_millis_is_recent() {
        // Sanity bound: after 2020-01-01 in milliseconds
        assert!(now_millis() > 1_577_836_800_000);
    }
}
