//! Runtime configuration from the environment.

use std::env;
use std::path::PathBuf;

const DEFAULT_BANK_DIR: &str = "banks";
const APP_DIR: &str = "mariner-quiz";
const DB_FILE: &str = "quiz.db";

/// Settings read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory with one sub-directory of test files per category.
    pub bank_dir: PathBuf,
    /// SQLite file holding weights and preferences.
    pub db_path: PathBuf,
    /// Filter for log output, in `RUST_LOG` syntax.
    pub log_filter: String,
}

impl Config {
    /// Read `QUIZ_BANK_DIR`, `QUIZ_DB_PATH` and `RUST_LOG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let bank_dir = lookup("QUIZ_BANK_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BANK_DIR));
        let db_path = lookup("QUIZ_DB_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".into());

        Self {
            bank_dir,
            db_path,
            log_filter,
        }
    }
}

fn default_db_path() -> PathBuf {
    // Use the user's data directory, fall back to the current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DB_FILE)
}
