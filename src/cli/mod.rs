use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::quiz::QuizFormat;

#[derive(Parser)]
#[command(
    name = "yt-tutor",
    about = "YouTube Tutor - Summaries, quizzes and flashcards from YouTube captions",
    version,
    long_about = "A CLI tool that pulls the caption track of a YouTube video, summarizes it with a hosted LLM, and generates multiple-choice quizzes and flashcards you can answer and download."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the video identifier embedded in a YouTube URL
    VideoId {
        /// YouTube URL (watch, youtu.be or embed form)
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Fetch the caption transcript of a video
    Transcript {
        #[arg(value_name = "URL")]
        url: String,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Summarize the transcript of a video
    Summarize {
        #[arg(value_name = "URL")]
        url: String,

        /// Summary detail (defaults to the configured level)
        #[arg(short, long, value_enum)]
        level: Option<SummaryLevel>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate a multiple-choice quiz from the video summary
    Quiz {
        #[arg(value_name = "URL")]
        url: String,

        /// Summary detail used as the quiz source
        #[arg(short, long, value_enum)]
        level: Option<SummaryLevel>,

        /// Question difficulty
        #[arg(short, long, value_enum)]
        difficulty: Option<Difficulty>,

        /// Number of questions to request (3-10)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(3..=10))]
        count: Option<u8>,

        /// Response format the model is asked to produce
        #[arg(short, long, value_enum)]
        format: Option<QuizFormat>,

        /// Print the questions instead of asking them
        #[arg(long)]
        no_interactive: bool,

        /// Output file path for the generated questions
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Format of the saved questions
        #[arg(long, value_enum, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Generate flashcards from the video summary
    Flashcards {
        #[arg(value_name = "URL")]
        url: String,

        /// Summary detail used as the flashcard source
        #[arg(short, long, value_enum)]
        level: Option<SummaryLevel>,

        /// Number of flashcards to request
        #[arg(short = 'n', long, default_value = "10", value_parser = clap::value_parser!(u8).range(1..=30))]
        count: u8,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run a full study session: transcript, summary, quiz and flashcards
    Study {
        #[arg(value_name = "URL")]
        url: String,

        #[arg(short, long, value_enum)]
        level: Option<SummaryLevel>,

        #[arg(short, long, value_enum)]
        difficulty: Option<Difficulty>,

        #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(3..=10))]
        count: Option<u8>,

        /// Number of flashcards to request
        #[arg(long, value_name = "COUNT", default_value = "10", value_parser = clap::value_parser!(u8).range(1..=30))]
        flashcards: u8,

        /// Directory the session files are written to
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Parse saved model output into validated quiz questions
    ParseQuiz {
        /// File holding the raw model response
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Format the response was produced in
        #[arg(short, long, value_enum, default_value = "blocks")]
        format: QuizFormat,
    },

    /// Show or initialize the configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON records
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// How much detail the summary should carry
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLevel {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl std::fmt::Display for SummaryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryLevel::Short => write!(f, "short"),
            SummaryLevel::Medium => write!(f, "medium"),
            SummaryLevel::Detailed => write!(f, "detailed"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}
