//! Database schema definitions and expected-shape descriptors
//!
//! The expected shape of each table is declared twice on purpose: once as
//! the CREATE statement used on first open, and once as column descriptors
//! the store compares against `PRAGMA table_info` output on every open.
//! A blake3 hash of the DDL is stored in `schema_master` as the identity
//! marker.

/// SQL to create the exam_results table
pub const CREATE_EXAM_RESULTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS exam_results (
    examId TEXT NOT NULL PRIMARY KEY,
    score INTEGER NOT NULL,
    totalQuestions INTEGER NOT NULL,
    isFinished INTEGER NOT NULL,
    lastUpdated INTEGER NOT NULL
)
"#;

/// SQL to create the question_results table
pub const CREATE_QUESTION_RESULTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS question_results (
    examId TEXT NOT NULL,
    questionIndex INTEGER NOT NULL,
    isCorrect INTEGER NOT NULL,
    timestamp INTEGER NOT NULL,
    PRIMARY KEY (examId, questionIndex)
)
"#;

/// SQL to create the bookkeeping table holding the schema identity hash
pub const CREATE_SCHEMA_MASTER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_master (
    id INTEGER PRIMARY KEY,
    identity_hash TEXT NOT NULL
)
"#;

/// Application table names, in creation order
pub const TABLE_NAMES: &[&str] = &["exam_results", "question_results"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_EXAM_RESULTS_TABLE,
        CREATE_QUESTION_RESULTS_TABLE,
        CREATE_SCHEMA_MASTER_TABLE,
    ]
}

/// Identity hash of the expected schema, persisted in `schema_master`
/// and compared on every open.
pub fn identity_hash() -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(CREATE_EXAM_RESULTS_TABLE.as_bytes());
    hasher.update(CREATE_QUESTION_RESULTS_TABLE.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Expected shape of one column, matched against `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: &'static str,
    /// Declared type as SQLite reports it (uppercased)
    pub decl_type: &'static str,
    pub notnull: bool,
    /// 0 when not part of the primary key, else 1-based position in it
    pub pk: u8,
}

/// Expected columns of a table, in declaration order
pub fn expected_columns(table: &str) -> &'static [ColumnInfo] {
    match table {
        "exam_results" => &[
            ColumnInfo { name: "examId", decl_type: "TEXT", notnull: true, pk: 1 },
            ColumnInfo { name: "score", decl_type: "INTEGER", notnull: true, pk: 0 },
            ColumnInfo { name: "totalQuestions", decl_type: "INTEGER", notnull: true, pk: 0 },
            ColumnInfo { name: "isFinished", decl_type: "INTEGER", notnull: true, pk: 0 },
            ColumnInfo { name: "lastUpdated", decl_type: "INTEGER", notnull: true, pk: 0 },
        ],
        "question_results" => &[
            ColumnInfo { name: "examId", decl_type: "TEXT", notnull: true, pk: 1 },
            ColumnInfo { name: "questionIndex", decl_type: "INTEGER", notnull: true, pk: 2 },
            ColumnInfo { name: "isCorrect", decl_type: "INTEGER", notnull: true, pk: 0 },
            ColumnInfo { name: "timestamp", decl_type: "INTEGER", notnull: true, pk: 0 },
        ],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_hash_is_stable() {
        assert_eq!(identity_hash(), identity_hash());
        assert_eq!(identity_hash().len(), 64);
    }

    #[test]
    fn test_expected_columns_cover_all_tables() {
        for table in TABLE_NAMES {
            assert!(!expected_columns(table).is_empty(), "{table} has no descriptor");
        }
        assert!(expected_columns("unknown").is_empty());
    }

    #[test]
    fn test_composite_key_positions() {
        let cols = expected_columns("question_results");
        let key: Vec<_> = cols.iter().filter(|c| c.pk > 0).map(|c| c.name).collect();
        assert_eq!(key, vec!["examId", "questionIndex"]);
    }
}
