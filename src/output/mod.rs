use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::quiz::{QuizQuestion, OPTION_LETTERS};
use crate::utils::sanitize_filename;

/// A named text file offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub content: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Write every artifact into `dir`, returning the paths written
pub fn write_artifacts(artifacts: &[Artifact], dir: &Path) -> Result<Vec<PathBuf>> {
    fs_err::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    artifacts
        .iter()
        .map(|artifact| {
            let path = dir.join(sanitize_filename(&artifact.name));
            fs_err::write(&path, &artifact.content)?;
            tracing::debug!("Wrote {}", path.display());
            Ok(path)
        })
        .collect()
}

/// Save text to a file
pub fn save_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, content)?;
    Ok(())
}

/// One line per question with its correct option
pub fn format_quiz_answers(questions: &[QuizQuestion]) -> String {
    questions
        .iter()
        .map(|q| format!("{} - Correct Answer: {}", q.prompt(), q.correct_option()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render questions with their lettered options and answers
pub fn format_quiz(questions: &[QuizQuestion], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(questions).context("Failed to serialize questions")
        }
        OutputFormat::Text => Ok(questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let mut text = format!("{}. {}\n", index + 1, question.prompt());
                for (letter, option) in OPTION_LETTERS.iter().zip(question.options()) {
                    text.push_str(&format!("   {}) {}\n", letter, option));
                }
                text.push_str(&format!(
                    "   Answer: {}",
                    OPTION_LETTERS[question.correct_index()]
                ));
                text
            })
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion::new("What is 2+2?", ["3", "4", "5", "6"], 1).unwrap(),
            QuizQuestion::new("Largest planet?", ["Mars", "Venus", "Jupiter", "Earth"], 2).unwrap(),
        ]
    }

    #[test]
    fn test_format_quiz_answers() {
        assert_eq!(
            format_quiz_answers(&questions()),
            "What is 2+2? - Correct Answer: 4\nLargest planet? - Correct Answer: Jupiter"
        );
    }

    #[test]
    fn test_format_quiz_text() {
        let text = format_quiz(&questions(), &OutputFormat::Text).unwrap();
        assert!(text.starts_with("1. What is 2+2?\n   A) 3\n   B) 4\n"));
        assert!(text.contains("   Answer: B\n\n2. Largest planet?"));
        assert!(text.ends_with("   Answer: C"));
    }

    #[test]
    fn test_format_quiz_json() {
        let json = format_quiz(&questions(), &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["question"], "What is 2+2?");
        assert_eq!(value[1]["answer"], 2);
        assert_eq!(value[1]["options"][2], "Jupiter");
    }

    #[test]
    fn test_write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = vec![
            Artifact::new("transcript.txt", "hello"),
            Artifact::new("summary.txt", "short"),
        ];

        let paths = write_artifacts(&artifacts, &dir.path().join("session")).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(fs_err::read_to_string(&paths[0]).unwrap(), "hello");
        assert!(paths[1].ends_with("session/summary.txt"));
    }

    #[test]
    fn test_save_to_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mcqs.txt");
        save_to_file("content", &path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "content");
    }
}
