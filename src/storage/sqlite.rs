//! SQLite-backed exam results store

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::record::{ExamResult, QuestionResult};
use crate::{Error, Result};

const EXAM_RESULT_COLUMNS: &str = "examId, score, totalQuestions, isFinished, lastUpdated";
const QUESTION_RESULT_COLUMNS: &str = "examId, questionIndex, isCorrect, timestamp";

/// SQLite-backed storage for exam and question results.
///
/// The store exclusively owns the connection to one database file. The
/// connection sits behind a mutex, so an `Arc<ExamStore>` can be shared
/// across threads; write transactions never overlap and readers observe
/// either the pre- or post-transaction state.
#[derive(Debug)]
pub struct ExamStore {
    conn: Mutex<Connection>,
}

impl ExamStore {
    /// Open a database file (creates it, and its schema, if absent)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        // WAL keeps readers unblocked during write transactions
        conn.query_row("PRAGMA journal_mode=WAL", [], |_| Ok(()))?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing and tooling)
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Build a store around a caller-opened connection.
    ///
    /// Creates missing tables, then validates the live schema and the
    /// stored identity hash; a mismatch fails the open and the store
    /// never serves against the unverified file.
    pub fn with_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Self::validate_schema(&conn)?;
        Self::check_identity(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Compare every live table shape against the expected definition
    fn validate_schema(conn: &Connection) -> Result<()> {
        for table in schema::TABLE_NAMES {
            let expected = schema::expected_columns(table);
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
            let live = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)? != 0,
                        row.get::<_, i64>(5)? as u8,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            if live.len() != expected.len() {
                return Err(Error::SchemaValidation(format!(
                    "table {table}: expected {} columns, found {}",
                    expected.len(),
                    live.len()
                )));
            }
            for (col, (name, decl_type, notnull, pk)) in expected.iter().zip(&live) {
                if col.name != name
                    || !col.decl_type.eq_ignore_ascii_case(decl_type)
                    || col.notnull != *notnull
                    || col.pk != *pk
                {
                    return Err(Error::SchemaValidation(format!(
                        "table {table}, column {name}: expected \
                         {} {} notnull={} pk={}, found {} notnull={} pk={}",
                        col.name, col.decl_type, col.notnull, col.pk, decl_type, notnull, pk
                    )));
                }
            }
        }
        Ok(())
    }

    /// Verify (or record, on a fresh file) the schema identity hash
    fn check_identity(conn: &Connection) -> Result<()> {
        let expected = schema::identity_hash();
        let stored: Option<String> = conn
            .query_row("SELECT identity_hash FROM schema_master WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match stored {
            Some(hash) if hash == expected => Ok(()),
            Some(hash) => Err(Error::SchemaValidation(format!(
                "identity hash mismatch: database was created with an \
                 incompatible schema (stored {hash}, expected {expected})"
            ))),
            None => {
                conn.execute(
                    "INSERT OR REPLACE INTO schema_master (id, identity_hash) VALUES (1, ?1)",
                    [&expected],
                )?;
                Ok(())
            }
        }
    }

    /// A panicked lock holder can only have abandoned a transaction,
    /// which SQLite rolls back, so the connection itself stays usable.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Write Operations ==========

    /// Insert or replace one exam result
    pub fn insert_exam_result(&self, result: &ExamResult) -> Result<()> {
        if result.exam_id.is_empty() {
            return Err(Error::Constraint("examId must not be empty".to_string()));
        }
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(
            &format!(
                "INSERT OR REPLACE INTO exam_results ({EXAM_RESULT_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            ),
            params![
                result.exam_id,
                result.score,
                result.total_questions,
                result.is_finished,
                result.last_updated,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Insert or replace one question result
    pub fn insert_question_result(&self, result: &QuestionResult) -> Result<()> {
        if result.exam_id.is_empty() {
            return Err(Error::Constraint("examId must not be empty".to_string()));
        }
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(
            &format!(
                "INSERT OR REPLACE INTO question_results ({QUESTION_RESULT_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4)"
            ),
            params![
                result.exam_id,
                result.question_index,
                result.is_correct,
                result.timestamp,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    // ========== Read Operations ==========

    /// Get the result for one exam, or `None` if it was never recorded
    pub fn get_exam_result(&self, exam_id: &str) -> Result<Option<ExamResult>> {
        self.conn()
            .query_row(
                &format!("SELECT {EXAM_RESULT_COLUMNS} FROM exam_results WHERE examId = ?1"),
                [exam_id],
                row_to_exam_result,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get every recorded exam result (order unspecified)
    pub fn get_all_exam_results(&self) -> Result<Vec<ExamResult>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {EXAM_RESULT_COLUMNS} FROM exam_results"))?;
        let results = stmt
            .query_map([], row_to_exam_result)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    /// Get all question results for one exam (order unspecified)
    pub fn get_question_results(&self, exam_id: &str) -> Result<Vec<QuestionResult>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {QUESTION_RESULT_COLUMNS} FROM question_results WHERE examId = ?1"
        ))?;
        let results = stmt
            .query_map([exam_id], row_to_question_result)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    /// Get every question result across all exams
    pub fn get_all_question_results(&self) -> Result<Vec<QuestionResult>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {QUESTION_RESULT_COLUMNS} FROM question_results"))?;
        let results = stmt
            .query_map([], row_to_question_result)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    /// Get every incorrectly answered question across all exams
    pub fn get_all_wrong_question_results(&self) -> Result<Vec<QuestionResult>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {QUESTION_RESULT_COLUMNS} FROM question_results WHERE isCorrect = 0"
        ))?;
        let results = stmt
            .query_map([], row_to_question_result)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    // ========== Administrative Operations ==========

    /// Delete every row from both tables in one transaction.
    ///
    /// After the delete commits, a WAL checkpoint and VACUUM reclaim the
    /// file space. Both are cleanup only; a failure there is logged and
    /// does not undo or fail the clear.
    pub fn clear_all(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM question_results", [])?;
        tx.execute("DELETE FROM exam_results", [])?;
        tx.commit()?;

        if let Err(e) = compact(&conn) {
            tracing::debug!("post-clear compaction skipped: {e}");
        }
        Ok(())
    }

    /// Drop and recreate both tables, rewriting the identity marker.
    ///
    /// The only destructive schema change in scope; used when no
    /// compatible migration path exists.
    pub fn reset_schema(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        for table in schema::TABLE_NAMES {
            tx.execute(&format!("DROP TABLE IF EXISTS {table}"), [])?;
        }
        tx.execute(schema::CREATE_EXAM_RESULTS_TABLE, [])?;
        tx.execute(schema::CREATE_QUESTION_RESULTS_TABLE, [])?;
        tx.execute(
            "INSERT OR REPLACE INTO schema_master (id, identity_hash) VALUES (1, ?1)",
            [&schema::identity_hash()],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Row counts for both tables
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.conn();
        let exam_results: i64 =
            conn.query_row("SELECT COUNT(*) FROM exam_results", [], |row| row.get(0))?;
        let question_results: i64 =
            conn.query_row("SELECT COUNT(*) FROM question_results", [], |row| row.get(0))?;
        Ok(StoreStats {
            exam_results: exam_results as usize,
            question_results: question_results as usize,
        })
    }
}

/// Checkpoint the WAL and compact the file after a bulk delete
fn compact(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
    conn.execute("VACUUM", [])?;
    Ok(())
}

fn row_to_exam_result(row: &rusqlite::Row) -> rusqlite::Result<ExamResult> {
    Ok(ExamResult {
        exam_id: row.get(0)?,
        score: row.get(1)?,
        total_questions: row.get(2)?,
        is_finished: row.get(3)?,
        last_updated: row.get(4)?,
    })
}

fn row_to_question_result(row: &rusqlite::Row) -> rusqlite::Result<QuestionResult> {
    Ok(QuestionResult {
        exam_id: row.get(0)?,
        question_index: row.get(1)?,
        is_correct: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

/// Row counts per table
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    pub exam_results: usize,
    pub question_results: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Exam results: {}", self.exam_results)?;
        write!(f, "  Question results: {}", self.question_results)
    }
}
