//! Question banks: parsing test files and serving question pools.
//!
//! # Format
//! A test file is a JSON array of questions:
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "question": "Which light is shown on the port side?",
//!     "options": ["A) Red", "B) Green", "C) White"],
//!     "correctAnswer": "A) Red"
//!   }
//! ]
//! ```
//! Tests are grouped into categories. The reserved test name
//! [`ALL_QUESTIONS`] stands for every question of a category, in the order
//! its test files were loaded.

use crate::error::{BankError, Result};
use crate::matching::{answers_match, MatchingMode};
use crate::types::{Question, ALL_QUESTIONS};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Parse and validate the contents of one test file.
pub fn parse_test(content: &str) -> Result<Vec<Question>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let questions: Vec<Question> = serde_json::from_str(content)?;
    let mut seen_ids = HashSet::new();

    for (index, question) in questions.iter().enumerate() {
        if question.prompt.trim().is_empty() {
            return Err(BankError::EmptyPrompt { index });
        }
        if question.options.len() < 2 {
            return Err(BankError::TooFewOptions {
                id: question.id.to_string(),
                found: question.options.len(),
            });
        }
        if !has_correct_option(question) {
            return Err(BankError::UnknownCorrectAnswer {
                id: question.id.to_string(),
                answer: question.correct_option.clone(),
            });
        }
        if !seen_ids.insert(question.id.clone()) {
            return Err(BankError::DuplicateId {
                id: question.id.to_string(),
                index,
            });
        }
    }

    Ok(questions)
}

fn has_correct_option(question: &Question) -> bool {
    question
        .options
        .iter()
        .any(|option| answers_match(option, &question.correct_option, MatchingMode::Exact))
}

/// Read-only access to question pools.
pub trait QuestionRepository {
    /// Category names in display order.
    fn categories(&self) -> Vec<&str>;

    /// Test names of a category in display order, without the reserved name.
    fn tests(&self, category: &str) -> Option<Vec<&str>>;

    /// Questions of a test, or of the whole category for [`ALL_QUESTIONS`].
    fn get_pool(&self, category: &str, test: &str) -> Option<&[Question]>;
}

/// A named test and its questions.
#[derive(Debug, Clone)]
pub struct Test {
    pub name: String,
    pub questions: Vec<Question>,
}

/// A category of tests.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub tests: Vec<Test>,
    all_questions: Vec<Question>,
}

impl Category {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
            all_questions: Vec::new(),
        }
    }

    pub fn all_questions(&self) -> &[Question] {
        &self.all_questions
    }

    pub fn question_count(&self) -> usize {
        self.all_questions.len()
    }
}

/// In-memory question bank.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    categories: Vec<Category>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a test to a category, creating the category if needed.
    ///
    /// The category's combined pool grows in the order tests are added;
    /// the listed order of categories and tests is kept sorted.
    pub fn add_test(&mut self, category: &str, test: &str, questions: Vec<Question>) {
        let index = match self.categories.iter().position(|c| c.name == category) {
            Some(index) => index,
            None => {
                self.categories.push(Category::new(category));
                self.categories
                    .sort_by(|a, b| compare_category_names(&a.name, &b.name));
                self.categories
                    .iter()
                    .position(|c| c.name == category)
                    .unwrap_or_default()
            }
        };

        let entry = &mut self.categories[index];
        entry.all_questions.extend(questions.iter().cloned());
        match entry.tests.iter_mut().find(|t| t.name == test) {
            Some(existing) => existing.questions.extend(questions),
            None => {
                entry.tests.push(Test {
                    name: test.to_string(),
                    questions,
                });
                entry.tests.sort_by(|a, b| compare_test_names(&a.name, &b.name));
            }
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of questions across all categories.
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(Category::question_count).sum()
    }
}

impl QuestionRepository for QuestionBank {
    fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    fn tests(&self, category: &str) -> Option<Vec<&str>> {
        self.category(category)
            .map(|c| c.tests.iter().map(|t| t.name.as_str()).collect())
    }

    fn get_pool(&self, category: &str, test: &str) -> Option<&[Question]> {
        let category = self.category(category)?;
        if test == ALL_QUESTIONS {
            return Some(category.all_questions());
        }
        category
            .tests
            .iter()
            .find(|t| t.name == test)
            .map(|t| t.questions.as_slice())
    }
}

/// Categories sort by name ignoring case, ties broken by exact name.
fn compare_category_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Tests sort by the first number in their name; unnumbered tests go last.
fn compare_test_names(a: &str, b: &str) -> Ordering {
    match (first_number(a), first_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn first_number(name: &str) -> Option<u64> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionId;
    use pretty_assertions::assert_eq;

    fn question(id: i64) -> Question {
        Question {
            id: QuestionId::from(id),
            prompt: format!("Question {}", id),
            options: vec!["A) Red".into(), "B) Green".into()],
            correct_option: "A) Red".into(),
        }
    }

    fn ids(pool: &[Question]) -> Vec<String> {
        pool.iter().map(|q| q.id.to_string()).collect()
    }

    #[test]
    fn parse_valid_test() {
        let input = r#"[
            {"id": 1, "question": "Port light?", "options": ["A) Red", "B) Green"], "correctAnswer": "A) Red"},
            {"id": 2, "question": "Starboard light?", "options": ["A) Red", "B) Green"], "correctAnswer": "B) Green"}
        ]"#;
        let questions = parse_test(input).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].correct_option, "B) Green");
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse_test("  ").unwrap().is_empty());
        assert!(parse_test("[]").unwrap().is_empty());
    }

    #[test]
    fn reject_correct_answer_given_as_a_letter() {
        let input = r#"[{"id": 1, "question": "Q", "options": ["A) x", "B) y"], "correctAnswer": "b"}]"#;
        assert!(matches!(
            parse_test(input),
            Err(BankError::UnknownCorrectAnswer { .. })
        ));
    }

    #[test]
    fn reject_correct_answer_sharing_only_a_letter() {
        let input = r#"[{"id": 1, "question": "Q", "options": ["A) x", "B) y"], "correctAnswer": "Bogus answer"}]"#;
        assert!(matches!(
            parse_test(input),
            Err(BankError::UnknownCorrectAnswer { .. })
        ));
    }

    #[test]
    fn correct_answer_may_differ_in_spacing() {
        let input = r#"[{"id": 1, "question": "Q", "options": ["A) x", "B)  y "], "correctAnswer": "B) y"}]"#;
        assert!(parse_test(input).is_ok());
    }

    #[test]
    fn reject_invalid_json() {
        assert!(matches!(parse_test("{"), Err(BankError::Json(_))));
    }

    #[test]
    fn reject_empty_prompt() {
        let input = r#"[{"id": 1, "question": " ", "options": ["A) x", "B) y"], "correctAnswer": "A) x"}]"#;
        assert!(matches!(parse_test(input), Err(BankError::EmptyPrompt { index: 0 })));
    }

    #[test]
    fn reject_single_option() {
        let input = r#"[{"id": 4, "question": "Q", "options": ["A) x"], "correctAnswer": "A) x"}]"#;
        assert!(matches!(
            parse_test(input),
            Err(BankError::TooFewOptions { found: 1, .. })
        ));
    }

    #[test]
    fn reject_unknown_correct_answer() {
        let input = r#"[{"id": 1, "question": "Q", "options": ["A) x", "B) y"], "correctAnswer": "D) z"}]"#;
        assert!(matches!(
            parse_test(input),
            Err(BankError::UnknownCorrectAnswer { .. })
        ));
    }

    #[test]
    fn reject_duplicate_ids() {
        let input = r#"[
            {"id": 1, "question": "Q1", "options": ["A) x", "B) y"], "correctAnswer": "A) x"},
            {"id": "1", "question": "Q2", "options": ["A) x", "B) y"], "correctAnswer": "A) x"}
        ]"#;
        assert!(matches!(
            parse_test(input),
            Err(BankError::DuplicateId { index: 1, .. })
        ));
    }

    #[test]
    fn categories_sort_ignoring_case() {
        let mut bank = QuestionBank::new();
        bank.add_test("seamanship", "Test 1", vec![question(1)]);
        bank.add_test("Navigation", "Test 1", vec![question(2)]);
        bank.add_test("COLREG", "Test 1", vec![question(3)]);
        assert_eq!(bank.categories(), vec!["COLREG", "Navigation", "seamanship"]);
    }

    #[test]
    fn tests_sort_numerically() {
        let mut bank = QuestionBank::new();
        bank.add_test("Navigation", "Test 10", vec![question(10)]);
        bank.add_test("Navigation", "Test 2", vec![question(2)]);
        bank.add_test("Navigation", "Extra", vec![question(99)]);
        bank.add_test("Navigation", "Test 1", vec![question(1)]);
        assert_eq!(
            bank.tests("Navigation").unwrap(),
            vec!["Test 1", "Test 2", "Test 10", "Extra"]
        );
    }

    #[test]
    fn all_questions_follow_load_order() {
        let mut bank = QuestionBank::new();
        bank.add_test("Navigation", "Test 10", vec![question(10), question(11)]);
        bank.add_test("Navigation", "Test 2", vec![question(2)]);

        let all = bank.get_pool("Navigation", ALL_QUESTIONS).unwrap();
        assert_eq!(ids(all), vec!["10", "11", "2"]);
        assert_eq!(ids(bank.get_pool("Navigation", "Test 2").unwrap()), vec!["2"]);
    }

    #[test]
    fn unknown_pool_is_none() {
        let mut bank = QuestionBank::new();
        bank.add_test("Navigation", "Test 1", vec![question(1)]);
        assert!(bank.get_pool("Engine", "Test 1").is_none());
        assert!(bank.get_pool("Navigation", "Test 9").is_none());
        assert!(bank.tests("Engine").is_none());
    }

    #[test]
    fn first_number_finds_embedded_digits() {
        assert_eq!(first_number("Test 12 (old)"), Some(12));
        assert_eq!(first_number("deneme3"), Some(3));
        assert_eq!(first_number("Extra"), None);
    }
}
