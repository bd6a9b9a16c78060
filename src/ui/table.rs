use tabled::{Table, Tabled, settings::Style};

use crate::record::{ExamResult, QuestionResult};

#[derive(Tabled)]
struct ExamRow {
    #[tabled(rename = "Exam")]
    exam_id: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Percent")]
    percent: String,
    #[tabled(rename = "Finished")]
    finished: String,
}

/// Render exam results as a terminal table
pub fn exam_results_table(results: &[ExamResult]) -> String {
    if results.is_empty() {
        return String::new();
    }
    let rows: Vec<ExamRow> = results
        .iter()
        .map(|r| ExamRow {
            exam_id: r.exam_id.clone(),
            score: format!("{}/{}", r.score, r.total_questions),
            percent: format!("{:.1}%", r.percentage()),
            finished: if r.is_finished { "yes" } else { "no" }.to_string(),
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct QuestionRow {
    #[tabled(rename = "Exam")]
    exam_id: String,
    #[tabled(rename = "Question")]
    question_index: u32,
    #[tabled(rename = "Correct")]
    correct: String,
}

/// Render question results as a terminal table
pub fn question_results_table(results: &[QuestionResult]) -> String {
    if results.is_empty() {
        return String::new();
    }
    let rows: Vec<QuestionRow> = results
        .iter()
        .map(|r| QuestionRow {
            exam_id: r.exam_id.clone(),
            question_index: r.question_index,
            correct: if r.is_correct { "yes" } else { "no" }.to_string(),
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
pub struct ProgressRow {
    #[tabled(rename = "Exam")]
    pub exam_id: String,
    #[tabled(rename = "Questions")]
    pub questions: usize,
    #[tabled(rename = "Answered")]
    pub answered: usize,
    #[tabled(rename = "Correct")]
    pub correct: usize,
    #[tabled(rename = "Finished")]
    pub finished: String,
}

/// Render per-exam progress rows as a terminal table
pub fn progress_table(rows: &[ProgressRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render label/value pairs as a terminal table
pub fn stats_table(stats: &[(&str, String)]) -> String {
    #[derive(Tabled)]
    struct StatRow {
        #[tabled(rename = "Metric")]
        metric: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows: Vec<StatRow> = stats
        .iter()
        .map(|(label, value)| StatRow {
            metric: label.to_string(),
            value: value.clone(),
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_results_render_nothing() {
        assert!(exam_results_table(&[]).is_empty());
        assert!(question_results_table(&[]).is_empty());
    }

    #[test]
    fn test_exam_table_contains_fields() {
        let results = vec![ExamResult::new("2019-03-A", 45, 60, true)];
        let rendered = exam_results_table(&results);
        assert!(rendered.contains("2019-03-A"));
        assert!(rendered.contains("45/60"));
        assert!(rendered.contains("75.0%"));
    }
}
