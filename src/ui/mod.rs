//! Terminal output helpers for the CLI

pub mod table;

pub use table::{exam_results_table, progress_table, question_results_table, stats_table};
