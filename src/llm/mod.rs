pub mod gemini;
pub mod openai_compat;
pub mod prompts;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::TutorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAI,
    OpenRouter,
}

impl LlmProvider {
    pub fn from_provider(provider: &str) -> Option<Self> {
        match provider.to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAI),
            "openrouter" => Some(Self::OpenRouter),
            _ => None,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::OpenAI => "https://api.openai.com/v1",
            Self::OpenRouter => "https://openrouter.ai/api/v1",
        }
    }
}

/// Hosted text generation: prompt in, free text out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build the generator the configuration asks for
pub fn build_generator(config: &LlmConfig) -> Result<Box<dyn TextGenerator>> {
    let provider = LlmProvider::from_provider(&config.provider)
        .ok_or_else(|| TutorError::UnknownProvider(config.provider.clone()))?;

    let api_key = config
        .api_key
        .clone()
        .context("LLM API key not configured. Set llm.api_key or YT_TUTOR_API_KEY.")?;

    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| provider.base_url().to_string());

    tracing::debug!("Using {:?} model {} at {}", provider, config.model, base_url);

    let generator: Box<dyn TextGenerator> = match provider {
        LlmProvider::Gemini => Box::new(gemini::GeminiGenerator::new(
            base_url,
            api_key,
            config.model.clone(),
            config.temperature,
        )),
        LlmProvider::OpenAI | LlmProvider::OpenRouter => {
            Box::new(openai_compat::ChatCompletionsGenerator::new(
                base_url,
                api_key,
                config.model.clone(),
                config.temperature,
            ))
        }
    };

    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_provider_from_provider() {
        assert_eq!(LlmProvider::from_provider("gemini"), Some(LlmProvider::Gemini));
        assert_eq!(LlmProvider::from_provider("Google"), Some(LlmProvider::Gemini));
        assert_eq!(LlmProvider::from_provider("openai"), Some(LlmProvider::OpenAI));
        assert_eq!(LlmProvider::from_provider("openrouter"), Some(LlmProvider::OpenRouter));
        assert_eq!(LlmProvider::from_provider("invalid"), None);
    }

    #[test]
    fn test_base_urls() {
        assert_eq!(LlmProvider::OpenAI.base_url(), "https://api.openai.com/v1");
        assert_eq!(
            LlmProvider::Gemini.base_url(),
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn test_build_generator_requires_key() {
        let mut config = Config::default().llm;
        config.api_key = None;
        assert!(build_generator(&config).is_err());

        config.api_key = Some("key".to_string());
        assert!(build_generator(&config).is_ok());

        config.provider = "nope".to_string();
        let err = build_generator(&config).err().unwrap();
        assert!(err.downcast_ref::<TutorError>().is_some());
    }
}
