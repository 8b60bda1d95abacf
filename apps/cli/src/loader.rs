//! Loading question banks from disk.
//!
//! Layout: `<bank_dir>/<category>/<test>.json`. Directories and files are
//! read in name order, which fixes the order of each category's combined
//! "All Questions" pool.

use quiz_core::{parse_test, BankError, QuestionBank};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid test file {path}: {source}")]
    Bank {
        path: String,
        #[source]
        source: BankError,
    },
}

/// Read every category directory under `dir` into a bank.
pub fn load_bank(dir: &Path) -> Result<QuestionBank, LoadError> {
    let mut bank = QuestionBank::new();

    for category_dir in sorted_entries(dir)? {
        if !category_dir.is_dir() {
            continue;
        }
        let category = match category_dir.file_name().and_then(|s| s.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        for file in sorted_entries(&category_dir)? {
            if !file.extension().map_or(false, |ext| ext == "json") {
                continue;
            }
            let test = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("default")
                .to_string();
            let content = fs::read_to_string(&file).map_err(|source| io_error(&file, source))?;
            let questions = parse_test(&content).map_err(|source| LoadError::Bank {
                path: file.display().to_string(),
                source,
            })?;
            tracing::debug!(%category, %test, questions = questions.len(), "loaded test");
            bank.add_test(&category, &test, questions);
        }
    }

    tracing::info!(
        categories = bank.iter().count(),
        questions = bank.question_count(),
        "question bank loaded"
    );
    Ok(bank)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|source| io_error(dir, source))? {
        let entry = entry.map_err(|source| io_error(dir, source))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn io_error(path: &Path, source: io::Error) -> LoadError {
    LoadError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quiz_core::{QuestionRepository, ALL_QUESTIONS};

    fn write_test(root: &Path, category: &str, test: &str, ids: &[i64]) {
        let dir = root.join(category);
        fs::create_dir_all(&dir).unwrap();
        let questions: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id": {}, "question": "Q{}", "options": ["A) yes", "B) no"], "correctAnswer": "A) yes"}}"#,
                    id, id
                )
            })
            .collect();
        fs::write(
            dir.join(format!("{}.json", test)),
            format!("[{}]", questions.join(",")),
        )
        .unwrap();
    }

    #[test]
    fn loads_categories_and_tests() {
        let root = tempfile::tempdir().unwrap();
        write_test(root.path(), "Navigation", "Test 2", &[3]);
        write_test(root.path(), "Navigation", "Test 1", &[1, 2]);
        write_test(root.path(), "Engine", "Test 1", &[10]);
        fs::write(root.path().join("Navigation").join("notes.txt"), "ignored").unwrap();
        fs::write(root.path().join("README.md"), "ignored").unwrap();

        let bank = load_bank(root.path()).unwrap();
        assert_eq!(bank.categories(), vec!["Engine", "Navigation"]);
        assert_eq!(bank.tests("Navigation").unwrap(), vec!["Test 1", "Test 2"]);

        let all: Vec<String> = bank
            .get_pool("Navigation", ALL_QUESTIONS)
            .unwrap()
            .iter()
            .map(|q| q.id.to_string())
            .collect();
        assert_eq!(all, vec!["1", "2", "3"]);
    }

    #[test]
    fn reports_the_broken_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Navigation");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Test 1.json"), "[{").unwrap();

        let err = load_bank(root.path()).unwrap_err();
        assert!(matches!(err, LoadError::Bank { .. }));
        assert!(err.to_string().contains("Test 1.json"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let root = tempfile::tempdir().unwrap();
        let err = load_bank(&root.path().join("absent")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
