//! Line-oriented front end.
//!
//! Reads one command per line, dispatches it to the practice session or the
//! exam sheet, and prints the resulting state.

use anyhow::Result;
use quiz_core::{
    ExamSheet, HistoryEntry, KeyValueStore, PracticeSession, QuestionBank, QuestionRepository,
    QuizMode, SelectionPolicy, ALL_QUESTIONS,
};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::io::{BufRead, Write};
use thiserror::Error;

const HELP: &str = "\
Commands:
  categories                 list categories
  tests <category>           list the tests of a category
  open <category>[/<test>]   open a test (no test: All Questions, random practice)
  mode random|standard       switch how the open test is asked
  1..9 or a..z               choose an option
  easy                       mark a correctly answered practice question as very easy
  back / forward             move through recent questions
  next                       next question
  show                       show the current question again
  score                      show the score
  reset                      reset score (in practice also clears learned weights)
  repeat on|off              allow or avoid repeats in practice
  submit                     submit a standard test
  help                       this text
  quit                       leave";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Categories,
    Tests(String),
    Open { category: String, test: String },
    Mode(QuizMode),
    Answer(usize),
    VeryEasy,
    Back,
    Forward,
    Next,
    Show,
    Score,
    Reset,
    Repeat(bool),
    Submit,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type help for a list")]
    Unknown(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid argument '{0}'")]
    InvalidArgument(String),
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "categories" | "ls" => Self::Categories,
            "tests" => Self::Tests(required(rest, "tests")?.to_string()),
            "open" => {
                let target = required(rest, "open")?;
                let (category, test) = match target.split_once('/') {
                    Some((category, test)) => (category.trim(), test.trim()),
                    None => (target, ALL_QUESTIONS),
                };
                Self::Open {
                    category: category.to_string(),
                    test: test.to_string(),
                }
            }
            "mode" => match required(rest, "mode")? {
                "random" => Self::Mode(QuizMode::Random),
                "standard" => Self::Mode(QuizMode::Standard),
                other => return Err(CommandError::InvalidArgument(other.to_string())),
            },
            "easy" => Self::VeryEasy,
            "back" => Self::Back,
            "forward" => Self::Forward,
            "next" => Self::Next,
            "show" => Self::Show,
            "score" => Self::Score,
            "reset" => Self::Reset,
            "repeat" => match required(rest, "repeat")? {
                "on" => Self::Repeat(true),
                "off" => Self::Repeat(false),
                other => return Err(CommandError::InvalidArgument(other.to_string())),
            },
            "submit" => Self::Submit,
            "quit" | "exit" => Self::Quit,
            other => match option_index(other) {
                Some(index) => Self::Answer(index),
                None => return Err(CommandError::Unknown(other.to_string())),
            },
        };
        Ok(command)
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
) -> std::result::Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

/// "1" or "a" both mean the first option.
fn option_index(word: &str) -> Option<usize> {
    if let Ok(number) = word.parse::<usize>() {
        return number.checked_sub(1);
    }
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

struct ExamState {
    sheet: ExamSheet,
    index: usize,
}

enum Mode {
    Idle,
    Practice,
    Exam(ExamState),
}

pub struct Shell<'a, S, R = ThreadRng> {
    bank: &'a QuestionBank,
    practice: PracticeSession<S, R>,
    selection: Option<(String, String)>,
    mode: Mode,
}

impl<'a, S: KeyValueStore, R: Rng> Shell<'a, S, R> {
    pub fn new(bank: &'a QuestionBank, practice: PracticeSession<S, R>) -> Self {
        Self {
            bank,
            practice,
            selection: None,
            mode: Mode::Idle,
        }
    }

    /// Process commands from `input` until it ends or the user quits.
    pub fn run<I: BufRead, W: Write>(&mut self, mut input: I, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "Mariner quiz. {} categories loaded, type help for commands.",
            self.bank.categories().len()
        )?;
        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, out)?,
                Err(err) => writeln!(out, "{}", err)?,
            }
        }
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        tracing::debug!(?command, "command");
        match command {
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Categories => self.list_categories(out)?,
            Command::Tests(category) => self.list_tests(&category, out)?,
            Command::Open { category, test } => {
                let mode = QuizMode::for_test(&test);
                self.open(&category, &test, mode, out)?;
            }
            Command::Mode(mode) => match self.selection.clone() {
                Some((category, test)) => self.open(&category, &test, mode, out)?,
                None => writeln!(out, "Open a test first.")?,
            },
            Command::Answer(index) => self.answer(index, out)?,
            Command::VeryEasy => self.very_easy(out)?,
            Command::Back => self.back(out)?,
            Command::Forward => self.forward(out)?,
            Command::Next => self.next(out)?,
            Command::Show => self.show(out)?,
            Command::Score => self.score(out)?,
            Command::Reset => self.reset(out)?,
            Command::Repeat(avoid) => {
                self.practice.set_policy(SelectionPolicy::from_avoid_repeats(avoid));
                if avoid {
                    writeln!(out, "Questions will not repeat until all have been asked.")?;
                } else {
                    writeln!(out, "Questions are drawn by difficulty weight.")?;
                }
            }
            Command::Submit => self.submit(out)?,
            Command::Quit => {}
        }
        Ok(())
    }

    pub fn practice(&self) -> &PracticeSession<S, R> {
        &self.practice
    }

    fn list_categories<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.bank.is_empty() {
            writeln!(out, "No categories found.")?;
        }
        for category in self.bank.iter() {
            writeln!(out, "{} ({} questions)", category.name, category.question_count())?;
        }
        Ok(())
    }

    fn list_tests<W: Write>(&self, category: &str, out: &mut W) -> Result<()> {
        match self.bank.tests(category) {
            Some(tests) => {
                for test in tests {
                    writeln!(out, "{}", test)?;
                }
                writeln!(out, "{}", ALL_QUESTIONS)?;
            }
            None => writeln!(out, "Unknown category '{}'.", category)?,
        }
        Ok(())
    }

    fn open<W: Write>(
        &mut self,
        category: &str,
        test: &str,
        mode: QuizMode,
        out: &mut W,
    ) -> Result<()> {
        let pool = match self.bank.get_pool(category, test) {
            Some(pool) => pool.to_vec(),
            None => {
                writeln!(out, "Unknown test '{}/{}'.", category, test)?;
                return Ok(());
            }
        };
        self.selection = Some((category.to_string(), test.to_string()));
        writeln!(out, "{} - {}", category, test)?;

        match mode {
            QuizMode::Random => {
                self.mode = Mode::Practice;
                self.practice.load_pool(category, test, pool);
                self.show(out)?;
            }
            QuizMode::Standard => {
                self.mode = Mode::Exam(ExamState {
                    sheet: ExamSheet::new(pool),
                    index: 0,
                });
                self.show(out)?;
            }
        }
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.mode {
            Mode::Idle => writeln!(out, "Nothing open. Use categories, tests and open.")?,
            Mode::Practice => match self.practice.current() {
                Some(entry) => {
                    render_practice(entry, out)?;
                    writeln!(out, "{} questions available", self.practice.pool_len())?;
                }
                None => writeln!(out, "No questions available for this category.")?,
            },
            Mode::Exam(state) => render_exam_question(state, out)?,
        }
        Ok(())
    }

    fn answer<W: Write>(&mut self, index: usize, out: &mut W) -> Result<()> {
        match &mut self.mode {
            Mode::Idle => writeln!(out, "Open a test first.")?,
            Mode::Practice => match self.practice.answer(index) {
                Ok(feedback) if feedback.was_correct => {
                    writeln!(out, "Correct! Type easy if this one was very easy.")?;
                }
                Ok(feedback) => {
                    writeln!(out, "Incorrect. The correct answer is: {}", feedback.correct_option)?;
                }
                Err(err) => writeln!(out, "{}", err)?,
            },
            Mode::Exam(state) => {
                let question = match state.sheet.questions().get(state.index) {
                    Some(question) => question.clone(),
                    None => {
                        writeln!(out, "No questions available for this test.")?;
                        return Ok(());
                    }
                };
                let option = match question.options.get(index) {
                    Some(option) => option.clone(),
                    None => {
                        writeln!(out, "Option {} is out of range.", index + 1)?;
                        return Ok(());
                    }
                };
                match state.sheet.select(&question.id, &option) {
                    Ok(_) => {
                        if state.index + 1 < state.sheet.questions().len() {
                            state.index += 1;
                            render_exam_question(state, out)?;
                        } else {
                            writeln!(
                                out,
                                "Last question answered. Type submit to see your result."
                            )?;
                        }
                    }
                    Err(err) => writeln!(out, "{}", err)?,
                }
            }
        }
        Ok(())
    }

    fn very_easy<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if !matches!(self.mode, Mode::Practice) {
            writeln!(out, "Very easy marks only apply in random practice.")?;
            return Ok(());
        }
        match self.practice.mark_very_easy() {
            Ok(_) => writeln!(out, "Marked as very easy; it will come up rarely.")?,
            Err(err) => writeln!(out, "{}", err)?,
        }
        Ok(())
    }

    fn back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match &mut self.mode {
            Mode::Idle => writeln!(out, "Open a test first.")?,
            Mode::Practice => match self.practice.go_back() {
                Some(entry) => render_practice(entry, out)?,
                None => writeln!(out, "No previous question.")?,
            },
            Mode::Exam(state) => {
                if state.index == 0 {
                    writeln!(out, "No previous question.")?;
                } else {
                    state.index -= 1;
                    render_exam_question(state, out)?;
                }
            }
        }
        Ok(())
    }

    fn forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match &mut self.mode {
            Mode::Idle => writeln!(out, "Open a test first.")?,
            Mode::Practice => match self.practice.go_forward() {
                Some(entry) => render_practice(entry, out)?,
                None => writeln!(out, "Already at the latest question.")?,
            },
            Mode::Exam(state) => {
                if state.index + 1 >= state.sheet.questions().len() {
                    writeln!(out, "Already at the last question.")?;
                } else {
                    state.index += 1;
                    render_exam_question(state, out)?;
                }
            }
        }
        Ok(())
    }

    fn next<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.mode {
            Mode::Practice => {
                let answered = self.practice.current().map_or(true, HistoryEntry::is_answered);
                if !answered {
                    writeln!(out, "Answer this question first, or use back/forward.")?;
                    return Ok(());
                }
                match self.practice.next_question() {
                    Some(entry) => render_practice(entry, out)?,
                    None => writeln!(out, "No questions available for this category.")?,
                }
            }
            _ => self.forward(out)?,
        }
        Ok(())
    }

    fn score<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.mode {
            Mode::Practice => {
                let score = self.practice.score();
                writeln!(
                    out,
                    "Score: {} correct, {} incorrect ({:.1}%)",
                    score.correct,
                    score.incorrect,
                    score.percent()
                )?;
            }
            Mode::Exam(state) => {
                let answered = state
                    .sheet
                    .questions()
                    .iter()
                    .filter(|q| state.sheet.answer(&q.id).is_some())
                    .count();
                writeln!(out, "{} of {} answered", answered, state.sheet.questions().len())?;
            }
            Mode::Idle => writeln!(out, "Open a test first.")?,
        }
        Ok(())
    }

    fn reset<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match &mut self.mode {
            Mode::Practice => {
                self.practice.reset_score();
                writeln!(out, "Score, history and learned weights cleared.")?;
                self.show(out)?;
            }
            Mode::Exam(state) => {
                state.sheet.reset();
                state.index = 0;
                writeln!(out, "Answers cleared.")?;
                self.show(out)?;
            }
            Mode::Idle => writeln!(out, "Open a test first.")?,
        }
        Ok(())
    }

    fn submit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match &mut self.mode {
            Mode::Exam(state) => {
                let result = state.sheet.submit();
                writeln!(
                    out,
                    "Test results: you got {} out of {} correct! ({:.1}%)",
                    result.correct,
                    result.total,
                    result.percent()
                )?;
            }
            _ => writeln!(out, "Only standard tests can be submitted.")?,
        }
        Ok(())
    }
}

fn render_practice<W: Write>(entry: &HistoryEntry, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", entry.question.prompt)?;
    for (i, option) in entry.question.options.iter().enumerate() {
        let marker = match &entry.user_answer {
            Some(chosen) if chosen == option => '>',
            _ => ' ',
        };
        writeln!(out, " {}{}. {}", marker, i + 1, option)?;
    }
    if entry.is_answered() {
        if entry.was_correct {
            writeln!(out, "Answered correctly.")?;
        } else {
            writeln!(out, "Answered incorrectly. Correct: {}", entry.question.correct_option)?;
        }
    }
    Ok(())
}

fn render_exam_question<W: Write>(state: &ExamState, out: &mut W) -> Result<()> {
    let questions = state.sheet.questions();
    let question = match questions.get(state.index) {
        Some(question) => question,
        None => {
            writeln!(out, "No questions available for this test.")?;
            return Ok(());
        }
    };
    let selected = state.sheet.answer(&question.id).map(|a| a.selected.as_str());

    writeln!(out)?;
    writeln!(out, "Question {} of {}", state.index + 1, questions.len())?;
    writeln!(out, "{}", question.prompt)?;
    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(option.as_str()) { '>' } else { ' ' };
        writeln!(out, " {}{}. {}", marker, i + 1, option)?;
    }
    if state.sheet.is_submitted() {
        writeln!(out, "Correct answer: {}", question.correct_option)?;
    }
    Ok(())
}
