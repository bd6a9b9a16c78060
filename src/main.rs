//! Examtrack CLI - inspect and maintain the exam results store

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use examtrack::catalog::ExamCatalog;
use examtrack::record::{ExamResult, QuestionResult};
use examtrack::storage::ExamStore;
use examtrack::ui::table::ProgressRow;
use examtrack::{config, ui};

#[derive(Parser)]
#[command(name = "examtrack")]
#[command(version)]
#[command(about = "Exam-preparation progress store - SQLite-backed results tracking")]
#[command(long_about = r#"
Examtrack records quiz-drill outcomes in a local SQLite database:
one row per exam run, one row per answered question.

Example usage:
  examtrack init
  examtrack record-exam --exam-id 2019-03-A --score 45 --total 60 --finished
  examtrack record-question --exam-id 2019-03-A --index 12 --correct
  examtrack results
  examtrack wrong
"#)]
struct Cli {
    /// Path to the results database (overrides examtrack.toml)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an examtrack.toml with the store location
    Init {
        /// Catalog JSON path to record in the config
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Record (or replace) the result of one exam run
    RecordExam {
        #[arg(long)]
        exam_id: String,
        #[arg(long)]
        score: u32,
        /// Total number of questions in the exam
        #[arg(long)]
        total: u32,
        /// Mark the run as finished
        #[arg(long)]
        finished: bool,
    },
    /// Record (or replace) the result of one answered question
    RecordQuestion {
        #[arg(long)]
        exam_id: String,
        /// Zero-based question index
        #[arg(long)]
        index: u32,
        /// Mark the answer as correct (incorrect when omitted)
        #[arg(long)]
        correct: bool,
    },
    /// Show the recorded result of one exam
    Show {
        exam_id: String,
    },
    /// List all recorded exam results
    Results,
    /// List the question results of one exam
    Questions {
        exam_id: String,
    },
    /// List every incorrectly answered question across all exams
    Wrong,
    /// Per-exam progress against the exam catalog
    Progress {
        /// Catalog JSON path (overrides examtrack.toml)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Show row counts for the store
    Stats,
    /// Delete all recorded results from both tables
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Drop and recreate both tables (destructive schema reset)
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    if let Commands::Init { catalog, force } = &cli.command {
        let path = cli.config.clone().unwrap_or_else(config::default_config_path);
        let db = cli.database.clone().unwrap_or_else(config::default_database_path);
        let new_config = config::ExamtrackConfig {
            database: Some(db.display().to_string()),
            catalog: catalog.as_ref().map(|p| p.display().to_string()),
        };
        config::write_config(&path, &new_config, *force)?;
        println!("{} Wrote {}", "✓".green(), path.display());
        return Ok(());
    }

    let db_path = cli.database.clone().unwrap_or_else(|| config.database_path());
    config::ensure_db_dir(&db_path)?;

    tracing::debug!("opening store at {}", db_path.display());
    let store = ExamStore::open(&db_path)?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::RecordExam { exam_id, score, total, finished } => {
            store.insert_exam_result(&ExamResult::new(&exam_id, score, total, finished))?;
            println!("{} Recorded {}: {}/{}", "✓".green(), exam_id, score, total);
        }
        Commands::RecordQuestion { exam_id, index, correct } => {
            store.insert_question_result(&QuestionResult::new(&exam_id, index, correct))?;
            println!("{} Recorded {} question {}", "✓".green(), exam_id, index);
        }
        Commands::Show { exam_id } => match store.get_exam_result(&exam_id)? {
            Some(result) => println!("{}", ui::exam_results_table(std::slice::from_ref(&result))),
            None => println!("No result recorded for {exam_id}"),
        },
        Commands::Results => {
            let results = store.get_all_exam_results()?;
            if results.is_empty() {
                println!("No exam results recorded yet");
            } else {
                println!("{}", ui::exam_results_table(&results));
            }
        }
        Commands::Questions { exam_id } => {
            let results = store.get_question_results(&exam_id)?;
            if results.is_empty() {
                println!("No question results recorded for {exam_id}");
            } else {
                println!("{}", ui::question_results_table(&results));
            }
        }
        Commands::Wrong => {
            let results = store.get_all_wrong_question_results()?;
            if results.is_empty() {
                println!("No wrong answers recorded");
            } else {
                println!("{}", ui::question_results_table(&results));
            }
        }
        Commands::Progress { catalog } => {
            let catalog_path = catalog
                .or_else(|| config.catalog_path())
                .ok_or_else(|| {
                    anyhow::anyhow!("no catalog configured (pass --catalog or set it in examtrack.toml)")
                })?;
            let catalog = ExamCatalog::load(&catalog_path)?;
            let rows = progress_rows(&catalog, &store)?;
            println!("{}", ui::progress_table(&rows));
        }
        Commands::Stats => {
            let stats = store.stats()?;
            let rows = [
                ("Database", db_path.display().to_string()),
                ("Exam results", stats.exam_results.to_string()),
                ("Question results", stats.question_results.to_string()),
            ];
            println!("{}", ui::stats_table(&rows));
        }
        Commands::Clear { yes } => {
            if !yes {
                anyhow::bail!("clear deletes every recorded result; re-run with --yes to confirm");
            }
            store.clear_all()?;
            println!("{} Cleared all results", "✓".green());
        }
        Commands::Reset { yes } => {
            if !yes {
                anyhow::bail!("reset drops and recreates both tables; re-run with --yes to confirm");
            }
            store.reset_schema()?;
            println!("{} Schema reset", "✓".green());
        }
    }

    Ok(())
}

/// Join the catalog with recorded results into per-exam progress rows
fn progress_rows(catalog: &ExamCatalog, store: &ExamStore) -> anyhow::Result<Vec<ProgressRow>> {
    let mut rows = Vec::with_capacity(catalog.len());
    for exam in catalog.exams() {
        let questions = store.get_question_results(&exam.id)?;
        let finished = store
            .get_exam_result(&exam.id)?
            .map(|r| r.is_finished)
            .unwrap_or(false);
        rows.push(ProgressRow {
            exam_id: exam.id.clone(),
            questions: exam.questions.len(),
            answered: questions.len(),
            correct: questions.iter().filter(|q| q.is_correct).count(),
            finished: if finished { "yes" } else { "no" }.to_string(),
        });
    }
    Ok(rows)
}
