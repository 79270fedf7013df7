//! The study pipeline: URL → transcript → summary → quiz / flashcards.
//!
//! Every stage reads its input from a [`StudySession`] and stores what it
//! produced back into it. Stages run one at a time, each awaited to completion,
//! and a failing stage leaves the values produced before it untouched.

use anyhow::Result;
use serde::Serialize;

use crate::cli::{Difficulty, SummaryLevel};
use crate::extractors::{extract_video_id, Transcript, TranscriptFetcher};
use crate::flashcards::{format_flashcards, parse_flashcards, Flashcard};
use crate::llm::{prompts, TextGenerator};
use crate::output::{format_quiz_answers, Artifact};
use crate::quiz::{grade, parse_quiz, QuizFormat, QuizQuestion, QuizReport};
use crate::TutorError;

/// Summary of a transcript at a given detail level
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub level: SummaryLevel,
    pub text: String,
}

/// What the user asked the quiz to look like
#[derive(Debug, Clone, Copy)]
pub struct QuizRequest {
    pub count: u8,
    pub difficulty: Difficulty,
}

/// Working values of one study session, most recent value per stage
#[derive(Debug, Default)]
pub struct StudySession {
    transcript: Option<Transcript>,
    summary: Option<Summary>,
    quiz: Vec<QuizQuestion>,
    flashcards: Vec<Flashcard>,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    /// Grade the current quiz against one selection per question
    pub fn score<S: AsRef<str>>(&self, selections: &[Option<S>]) -> QuizReport {
        grade(&self.quiz, selections)
    }

    /// Downloadable files for everything produced so far
    pub fn artifacts(&self) -> Vec<Artifact> {
        let mut artifacts = Vec::new();

        if let Some(transcript) = &self.transcript {
            artifacts.push(Artifact::new("transcript.txt", &transcript.text));
        }
        if let Some(summary) = &self.summary {
            artifacts.push(Artifact::new("summary.txt", &summary.text));
        }
        if !self.quiz.is_empty() {
            artifacts.push(Artifact::new("mcqs.txt", format_quiz_answers(&self.quiz)));
        }
        if !self.flashcards.is_empty() {
            artifacts.push(Artifact::new("flashcards.txt", format_flashcards(&self.flashcards)));
        }

        artifacts
    }

    fn replace_transcript(&mut self, transcript: Transcript) {
        *self = Self {
            transcript: Some(transcript),
            ..Self::default()
        };
    }

    fn replace_summary(&mut self, summary: Summary) {
        self.summary = Some(summary);
        self.quiz.clear();
        self.flashcards.clear();
    }
}

/// Runs pipeline stages against the external collaborators
pub struct StudyPipeline {
    fetcher: Box<dyn TranscriptFetcher>,
    generator: Box<dyn TextGenerator>,
    quiz_format: QuizFormat,
    min_source_words: usize,
}

impl StudyPipeline {
    pub fn new(
        fetcher: Box<dyn TranscriptFetcher>,
        generator: Box<dyn TextGenerator>,
        quiz_format: QuizFormat,
        min_source_words: usize,
    ) -> Self {
        Self {
            fetcher,
            generator,
            quiz_format,
            min_source_words,
        }
    }

    pub fn quiz_format(&self) -> QuizFormat {
        self.quiz_format
    }

    /// Resolve the URL and fetch its transcript, starting the session over
    pub async fn load_transcript<'s>(&self, session: &'s mut StudySession, url: &str) -> Result<&'s Transcript> {
        let video_id = extract_video_id(url).ok_or_else(|| TutorError::InvalidUrl(url.to_string()))?;

        let transcript = self.fetcher.fetch(&video_id).await?;
        tracing::info!(
            "Fetched transcript for {} ({} words, language {}{})",
            video_id,
            transcript.word_count(),
            transcript.language,
            if transcript.translated { ", translated" } else { "" }
        );

        session.replace_transcript(transcript);
        Ok(session.transcript.as_ref().ok_or(TutorError::MissingStage("transcript"))?)
    }

    pub async fn summarize<'s>(&self, session: &'s mut StudySession, level: SummaryLevel) -> Result<&'s Summary> {
        let transcript = session.transcript.as_ref().ok_or(TutorError::MissingStage("transcript"))?;

        tracing::info!("Generating {} summary", level);
        let text = self
            .generator
            .generate(&prompts::summary_prompt(&transcript.text, level))
            .await?;

        session.replace_summary(Summary {
            level,
            text: text.trim().to_string(),
        });
        Ok(session.summary.as_ref().ok_or(TutorError::MissingStage("summary"))?)
    }

    /// Ask for questions about the summary and keep the ones that parse
    pub async fn generate_quiz<'s>(&self, session: &'s mut StudySession, request: QuizRequest) -> Result<&'s [QuizQuestion]> {
        let summary = session.summary.as_ref().ok_or(TutorError::MissingStage("summary"))?;

        let words = crate::utils::word_count(&summary.text);
        if words < self.min_source_words {
            return Err(TutorError::SourceTooShort {
                words,
                required: self.min_source_words,
            }
            .into());
        }

        tracing::info!(
            "Generating {} {} questions ({} format)",
            request.count,
            request.difficulty,
            self.quiz_format
        );
        let prompt = prompts::quiz_prompt(&summary.text, request.count, request.difficulty, self.quiz_format);
        let response = self.generator.generate(&prompt).await?;
        tracing::debug!("Raw quiz response: {}", response);

        let questions = parse_quiz(self.quiz_format, &response);
        if questions.is_empty() {
            return Err(TutorError::NoQuestions.into());
        }
        if questions.len() < request.count as usize {
            tracing::warn!(
                "Model produced {} usable questions out of {} requested",
                questions.len(),
                request.count
            );
        }

        session.quiz = questions;
        Ok(&session.quiz)
    }

    pub async fn generate_flashcards<'s>(&self, session: &'s mut StudySession, count: u8) -> Result<&'s [Flashcard]> {
        let summary = session.summary.as_ref().ok_or(TutorError::MissingStage("summary"))?;

        tracing::info!("Generating {} flashcards", count);
        let response = self
            .generator
            .generate(&prompts::flashcards_prompt(&summary.text, count))
            .await?;
        tracing::debug!("Raw flashcard response: {}", response);

        let cards = parse_flashcards(&response);
        if cards.is_empty() {
            return Err(TutorError::NoFlashcards.into());
        }

        session.flashcards = cards;
        Ok(&session.flashcards)
    }
}
