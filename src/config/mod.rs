use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::{Difficulty, SummaryLevel};
use crate::llm::LlmProvider;
use crate::quiz::QuizFormat;

/// Smallest and largest quiz the tool will ask the model for
pub const MIN_QUESTIONS: u8 = 3;
pub const MAX_QUESTIONS: u8 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Text generation settings
    pub llm: LlmConfig,

    /// Quiz generation settings
    pub quiz: QuizConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (gemini, openai, openrouter)
    pub provider: String,

    /// Model identifier passed to the provider
    pub model: String,

    /// API key; falls back to environment variables when absent
    pub api_key: Option<String>,

    /// Override for the provider's API base URL
    pub base_url: Option<String>,

    /// Sampling temperature
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Response format the quiz prompt asks for and the parser expects
    pub format: QuizFormat,

    pub default_difficulty: Difficulty,

    pub default_questions: u8,

    /// Source texts shorter than this are not worth quizzing on
    pub min_source_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default summary detail
    pub summary_level: SummaryLevel,

    /// Directory for study session files (current directory if unset)
    pub output_dir: Option<PathBuf>,

    /// yt-dlp executable used to list caption tracks
    pub yt_dlp_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                provider: "gemini".to_string(),
                model: "gemini-1.5-flash".to_string(),
                api_key: None,
                base_url: None,
                temperature: 0.3,
            },
            quiz: QuizConfig {
                format: QuizFormat::Blocks,
                default_difficulty: Difficulty::Medium,
                default_questions: 5,
                min_source_words: 50,
            },
            app: AppConfig {
                summary_level: SummaryLevel::Medium,
                output_dir: None,
                yt_dlp_path: "yt-dlp".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default, then apply environment overrides
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            serde_yaml::from_str(&content)
                .context("Failed to parse config file")?
        } else {
            let config = Self::default();
            config.save().await?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("yt-tutor").join("config.yaml"))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Fill settings from a variable lookup; split out so tests need not touch the process env
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.llm.api_key.is_none() {
            let provider_var = match LlmProvider::from_provider(&self.llm.provider) {
                Some(LlmProvider::Gemini) => "GEMINI_API_KEY",
                Some(LlmProvider::OpenAI) => "OPENAI_API_KEY",
                Some(LlmProvider::OpenRouter) => "OPENROUTER_API_KEY",
                None => "",
            };

            self.llm.api_key = lookup("YT_TUTOR_API_KEY")
                .or_else(|| lookup(provider_var))
                .filter(|key| !key.trim().is_empty());
        }

        if let Some(format) = lookup("YT_TUTOR_QUIZ_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.quiz.format = parsed,
                Err(_) => tracing::warn!("Ignoring unknown YT_TUTOR_QUIZ_FORMAT value: {}", format),
            }
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if LlmProvider::from_provider(&self.llm.provider).is_none() {
            return Err(crate::TutorError::UnknownProvider(self.llm.provider.clone()).into());
        }

        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.quiz.default_questions) {
            anyhow::bail!(
                "quiz.default_questions must be between {} and {}",
                MIN_QUESTIONS,
                MAX_QUESTIONS
            );
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  LLM Provider: {}", self.llm.provider);
        println!("  Model: {}", self.llm.model);
        println!(
            "  API Key: {}",
            self.llm.api_key.as_deref().map(mask_secret).unwrap_or_else(|| "<not set>".to_string())
        );
        if let Some(base_url) = &self.llm.base_url {
            println!("  Base URL: {}", base_url);
        }
        println!("  Quiz Format: {}", self.quiz.format);
        println!("  Default Difficulty: {}", self.quiz.default_difficulty);
        println!("  Default Questions: {}", self.quiz.default_questions);
        println!("  Summary Level: {}", self.app.summary_level);
        println!("  yt-dlp: {}", self.app.yt_dlp_path);
    }

    /// Print where the configuration lives
    pub async fn show_location(&self) -> Result<()> {
        let path = Self::config_path()?;
        if !path.exists() {
            self.save().await?;
        }
        println!("Configuration file:");
        println!("  {}", path.display());
        println!("Edit it to change the provider, model or quiz format.");
        println!("API keys can also be supplied via YT_TUTOR_API_KEY.");
        Ok(())
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("****{}", visible)
}
