//! Exam catalog - the question bank the results refer to
//!
//! The catalog is shipped as one JSON file and is read-only from the
//! store's point of view: results reference exams and questions by
//! (exam id, question index) only. Unknown JSON keys are ignored so the
//! catalog file can grow fields without breaking older builds.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// One exam paper with its questions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub year: i32,
    pub month: String,
    /// Exam group variant; papers without one default to "A"
    #[serde(rename = "gruppe", default = "default_group")]
    pub group: String,
    pub questions: Vec<Question>,
}

/// One question within an exam
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    /// Question format, e.g. single choice, multiple choice,
    /// statement combination
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub statements: Vec<String>,
    pub correct_indices: Vec<usize>,
    #[serde(default)]
    pub explanation: Option<String>,
}

fn default_group() -> String {
    "A".to_string()
}

/// In-memory exam catalog loaded from a JSON file
#[derive(Debug, Clone, Default)]
pub struct ExamCatalog {
    exams: Vec<Exam>,
}

impl ExamCatalog {
    /// Load the catalog from a JSON file (an array of exams)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let exams: Vec<Exam> = serde_json::from_str(&contents)?;
        Ok(Self { exams })
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    pub fn exam_by_id(&self, id: &str) -> Option<&Exam> {
        self.exams.iter().find(|e| e.id == id)
    }

    /// Look up a question by exam id and zero-based index
    pub fn question(&self, exam_id: &str, question_index: usize) -> Option<&Question> {
        self.exam_by_id(exam_id)?.questions.get(question_index)
    }

    pub fn len(&self) -> usize {
        self.exams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": "2019-03-A",
            "year": 2019,
            "month": "März",
            "gruppe": "A",
            "questions": [
                {
                    "id": 1,
                    "type": "Einfachauswahl",
                    "text": "Which of the following applies?",
                    "options": ["a", "b", "c", "d", "e"],
                    "correctIndices": [2],
                    "explanation": "c is correct.",
                    "imageRef": "fig-1.png"
                },
                {
                    "id": 2,
                    "type": "Aussagenkombination",
                    "text": "Check the statements.",
                    "options": ["1+2", "2+3"],
                    "statements": ["first", "second", "third"],
                    "correctIndices": [0]
                }
            ]
        },
        {
            "id": "2020-10",
            "year": 2020,
            "month": "Oktober",
            "questions": []
        }
    ]"#;

    fn sample_catalog() -> ExamCatalog {
        let exams: Vec<Exam> = serde_json::from_str(SAMPLE).unwrap();
        ExamCatalog { exams }
    }

    #[test]
    fn test_parse_ignores_unknown_keys_and_applies_defaults() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 2);

        // "imageRef" is unknown and skipped; missing "gruppe" defaults to A
        let exam = catalog.exam_by_id("2020-10").unwrap();
        assert_eq!(exam.group, "A");
        let q = catalog.question("2019-03-A", 0).unwrap();
        assert_eq!(q.correct_indices, vec![2]);
        assert_eq!(q.explanation.as_deref(), Some("c is correct."));
    }

    #[test]
    fn test_question_lookup_out_of_range_is_none() {
        let catalog = sample_catalog();
        assert!(catalog.question("2019-03-A", 5).is_none());
        assert!(catalog.question("does-not-exist", 0).is_none());
        let second = catalog.question("2019-03-A", 1).unwrap();
        assert_eq!(second.statements.len(), 3);
        assert!(second.explanation.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exams.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = ExamCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ExamCatalog::load(&path), Err(crate::Error::Parse(_))));
    }
}
