//! YouTube Tutor - A Rust CLI tool for studying from YouTube videos
//!
//! This library fetches the caption track of a YouTube video, asks a hosted LLM
//! for a summary, multiple-choice questions and flashcards, and turns the model's
//! loosely structured answers into validated records that can be scored.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod flashcards;
pub mod llm;
pub mod output;
pub mod quiz;
pub mod session;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{extract_video_id, Transcript, TranscriptError, TranscriptFetcher, VideoId};
pub use flashcards::Flashcard;
pub use llm::TextGenerator;
pub use quiz::{QuizFormat, QuizInterpreter, QuizQuestion, QuizReport};
pub use session::{StudyPipeline, StudySession};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the tutor
#[derive(thiserror::Error, Debug)]
pub enum TutorError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("No {0} available yet; run the previous step first")]
    MissingStage(&'static str),

    #[error("The input text is too short to generate meaningful questions ({words} words, need {required})")]
    SourceTooShort { words: usize, required: usize },

    #[error("Could not generate questions from the model response")]
    NoQuestions,

    #[error("Could not generate flashcards from the model response")]
    NoFlashcards,

    #[error("Unknown LLM provider: {0}")]
    UnknownProvider(String),
}
