//! Multiple-choice quiz records and the interpreters that build them from
//! model output.
//!
//! The text generator is asked for questions in one of three shapes (see
//! [`QuizFormat`]). Its answer is untrusted: every interpreter keeps only the
//! questions that fully conform and silently drops the rest, so a partial
//! response yields a shorter quiz rather than an error.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod blocks;
pub mod json;
pub mod pipe;
pub mod scoring;

pub use scoring::{grade, score, QuizReport, QuizResult};

/// Number of choices every question carries
pub const OPTION_COUNT: usize = 4;

/// Option markers in answer-letter order
pub const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// A validated multiple-choice question.
///
/// Values can only be built through [`QuizQuestion::new`], so `correct_index`
/// always points at one of the four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    #[serde(rename = "question")]
    prompt: String,
    options: [String; OPTION_COUNT],
    #[serde(rename = "answer")]
    correct_index: usize,
}

impl QuizQuestion {
    /// Build a question, trimming text; `None` when the prompt or an option is
    /// empty or the answer index is out of range
    pub fn new(prompt: &str, options: [&str; OPTION_COUNT], correct_index: usize) -> Option<Self> {
        let prompt = prompt.trim();
        if prompt.is_empty() || correct_index >= OPTION_COUNT {
            return None;
        }

        if options.iter().any(|option| option.trim().is_empty()) {
            return None;
        }

        Some(Self {
            prompt: prompt.to_string(),
            options: options.map(|option| option.trim().to_string()),
            correct_index,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

/// Shape of the quiz text the model is asked to produce
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizFormat {
    /// Blank-line separated blocks with lettered options and an `Answer:` line
    #[default]
    Blocks,
    /// One pipe-delimited line per question with a 1-based answer index
    Pipe,
    /// A JSON list of question records
    Json,
}

impl QuizFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizFormat::Blocks => "blocks",
            QuizFormat::Pipe => "pipe",
            QuizFormat::Json => "json",
        }
    }

    /// Interpreter that understands this format
    pub fn interpreter(&self) -> Box<dyn QuizInterpreter> {
        match self {
            QuizFormat::Blocks => Box::new(blocks::BlockInterpreter),
            QuizFormat::Pipe => Box::new(pipe::PipeInterpreter),
            QuizFormat::Json => Box::new(json::JsonInterpreter),
        }
    }
}

impl std::fmt::Display for QuizFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuizFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blocks" => Ok(QuizFormat::Blocks),
            "pipe" => Ok(QuizFormat::Pipe),
            "json" => Ok(QuizFormat::Json),
            other => anyhow::bail!("Unknown quiz format: {}", other),
        }
    }
}

/// Turns a model response into validated questions
pub trait QuizInterpreter: Send + Sync {
    /// Parse every conforming question, dropping the rest
    fn parse(&self, response: &str) -> Vec<QuizQuestion>;

    /// The format this interpreter reads
    fn format(&self) -> QuizFormat;
}

/// Parse a response with the interpreter for `format`
pub fn parse_quiz(format: QuizFormat, response: &str) -> Vec<QuizQuestion> {
    let questions = format.interpreter().parse(response);
    tracing::debug!("Parsed {} questions from {} response", questions.len(), format);
    questions
}

/// Index of an answer letter (`A` → 0 … `D` → 3)
pub(crate) fn letter_index(letter: &str) -> Option<usize> {
    let mut chars = letter.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    OPTION_LETTERS.iter().position(|&l| l == first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_invariant() {
        let question = QuizQuestion::new(" What is 2+2? ", ["3", "4", "5", "6"], 1).unwrap();
        assert_eq!(question.prompt(), "What is 2+2?");
        assert_eq!(question.correct_option(), "4");

        assert!(QuizQuestion::new("Q", ["3", "4", "5", "6"], 4).is_none());
        assert!(QuizQuestion::new("   ", ["3", "4", "5", "6"], 0).is_none());
        assert!(QuizQuestion::new("Q", ["3", " ", "5", "6"], 0).is_none());
    }

    #[test]
    fn test_letter_index() {
        assert_eq!(letter_index("A"), Some(0));
        assert_eq!(letter_index("D"), Some(3));
        assert_eq!(letter_index("E"), None);
        assert_eq!(letter_index("a"), None);
        assert_eq!(letter_index("AB"), None);
        assert_eq!(letter_index(""), None);
    }

    #[test]
    fn test_format_parsing_and_interpreters() {
        assert_eq!("PIPE".parse::<QuizFormat>().unwrap(), QuizFormat::Pipe);
        assert!("yaml".parse::<QuizFormat>().is_err());

        for format in [QuizFormat::Blocks, QuizFormat::Pipe, QuizFormat::Json] {
            assert_eq!(format.interpreter().format(), format);
        }
    }

    #[test]
    fn test_all_formats_agree_on_the_same_question() {
        let blocks = "Question: What is 2+2?\nA) 3\nB) 4\nC) 5\nD) 6\nAnswer: B";
        let pipe = "What is 2+2?|3|4|5|6|2";
        let json = r#"[{"question": "What is 2+2?", "options": ["3", "4", "5", "6"], "answer": 1}]"#;

        let expected = vec![QuizQuestion::new("What is 2+2?", ["3", "4", "5", "6"], 1).unwrap()];
        assert_eq!(parse_quiz(QuizFormat::Blocks, blocks), expected);
        assert_eq!(parse_quiz(QuizFormat::Pipe, pipe), expected);
        assert_eq!(parse_quiz(QuizFormat::Json, json), expected);
    }

    #[test]
    fn test_serialized_question_reparses_as_json() {
        let question = QuizQuestion::new("Capital of France?", ["Paris", "Rome", "Oslo", "Bern"], 0).unwrap();
        let text = serde_json::to_string(&vec![question.clone()]).unwrap();
        assert_eq!(parse_quiz(QuizFormat::Json, &text), vec![question]);
    }
}
