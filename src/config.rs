//! Optional on-disk configuration
//!
//! An `examtrack.toml` next to the working directory can pin the store
//! and catalog locations so the CLI does not need them on every call.
//! A missing file is not an error; flags always win over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExamtrackConfig {
    /// Path to the results database file
    pub database: Option<String>,
    /// Path to the exam catalog JSON file
    pub catalog: Option<String>,
}

impl ExamtrackConfig {
    /// Database path from the config, falling back to the default
    pub fn database_path(&self) -> PathBuf {
        self.database
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.as_ref().map(PathBuf::from)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("examtrack.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from(".examtrack").join("results.db")
}

/// Read the config file; `Ok(None)` when it does not exist
pub fn load_config(path: Option<&Path>) -> Result<Option<ExamtrackConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    toml::from_str(&contents)
        .map(Some)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

pub fn write_config(path: &Path, config: &ExamtrackConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Create the directory the database file lives in, if needed
pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examtrack.toml");

        let config = ExamtrackConfig {
            database: Some("store/results.db".to_string()),
            catalog: Some("exams.json".to_string()),
        };
        write_config(&path, &config, false).unwrap();
        assert!(matches!(
            write_config(&path, &config, false),
            Err(Error::Config(_))
        ));

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database_path(), PathBuf::from("store/results.db"));
        assert_eq!(loaded.catalog_path(), Some(PathBuf::from("exams.json")));
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examtrack.toml");
        std::fs::write(&path, "database = [broken").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
    }

    #[test]
    fn test_default_database_path_fallback() {
        let config = ExamtrackConfig::default();
        assert_eq!(config.database_path(), default_database_path());
        assert!(config.catalog_path().is_none());
    }
}
