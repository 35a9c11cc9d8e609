//! Configuration management for Veracity
//!
//! Handles API keys, provider settings, and debate defaults. Everything is
//! read from the process environment; the CLI loads `.env` first.

use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

use crate::{GeminiProvider, LlmProvider, MockProvider, OllamaProvider, OpenAIProvider};

/// Default model for both agents and the judge
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini API key (env: GEMINI_API_KEY)
    pub gemini_api_key: Option<String>,
    /// OpenAI API key (env: OPENAI_API_KEY)
    pub openai_api_key: Option<String>,
    /// OpenAI-compatible base URL (env: OPENAI_BASE_URL)
    pub openai_base_url: String,
    /// Ollama base URL (default: http://localhost:11434)
    pub ollama_url: String,
    /// Default provider
    pub default_provider: String,
    /// Model used for Verifier/Challenger turns
    pub agent_model: String,
    /// Model used for the judge and the control evaluator
    pub judge_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            default_provider: "gemini".to_string(),
            agent_model: DEFAULT_MODEL.to_string(),
            judge_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|v| !v.is_empty()),
            openai_api_key: lookup("OPENAI_API_KEY").filter(|v| !v.is_empty()),
            openai_base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            ollama_url: lookup("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            default_provider: lookup("VERACITY_DEFAULT_PROVIDER")
                .unwrap_or(defaults.default_provider),
            agent_model: lookup("VERACITY_AGENT_MODEL").unwrap_or(defaults.agent_model),
            judge_model: lookup("VERACITY_JUDGE_MODEL").unwrap_or(defaults.judge_model),
        }
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider: &str) -> Option<&str> {
        match provider.to_lowercase().as_str() {
            "gemini" => self.gemini_api_key.as_deref(),
            "openai" => self.openai_api_key.as_deref(),
            _ => None,
        }
    }

    /// Check if a provider is configured
    pub fn is_configured(&self, provider: &str) -> bool {
        match provider.to_lowercase().as_str() {
            "gemini" => self.gemini_api_key.is_some(),
            "openai" => self.openai_api_key.is_some(),
            "ollama" | "mock" => true, // Always available
            _ => false,
        }
    }

    /// List available providers
    pub fn available_providers(&self) -> Vec<&str> {
        let mut providers = vec!["mock", "ollama"];
        if self.gemini_api_key.is_some() {
            providers.push("gemini");
        }
        if self.openai_api_key.is_some() {
            providers.push("openai");
        }
        providers
    }

    /// Build the named provider, defaulting models to `agent_model`
    ///
    /// Callers own the returned handle and pass it to every entry point;
    /// there is no process-wide client.
    pub fn provider(&self, name: &str) -> Result<Arc<dyn LlmProvider>, ConfigError> {
        let provider: Arc<dyn LlmProvider> = match name.to_lowercase().as_str() {
            "gemini" => {
                let key = self
                    .gemini_api_key
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;
                Arc::new(GeminiProvider::new(key, &self.agent_model))
            }
            "openai" => {
                let key = self
                    .openai_api_key
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;
                Arc::new(OpenAIProvider::with_url(
                    &self.openai_base_url,
                    key,
                    &self.agent_model,
                ))
            }
            "ollama" => Arc::new(OllamaProvider::with_url(&self.ollama_url, &self.agent_model)),
            "mock" => Arc::new(MockProvider::smart()),
            other => {
                return Err(ConfigError::Invalid(format!("unknown provider '{}'", other)));
            }
        };
        Ok(provider)
    }
}

/// Full Veracity configuration
#[derive(Debug, Clone)]
pub struct VeracityConfig {
    /// LLM provider settings
    pub llm: LlmConfig,
    /// Debate rounds (exchange pairs including the opening pair)
    pub rounds: u32,
    /// Enable debug logging
    pub debug: bool,
}

impl Default for VeracityConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            rounds: 2,
            debug: false,
        }
    }
}

impl VeracityConfig {
    /// Load from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rounds = match lookup("VERACITY_ROUNDS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|r| *r >= 1)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!("VERACITY_ROUNDS must be >= 1, got '{}'", raw))
                })?,
            None => 2,
        };

        Ok(Self {
            llm: LlmConfig::from_vars(&lookup),
            rounds,
            debug: lookup("VERACITY_DEBUG")
                .map(|v| v == "1" || v == "true")
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert_eq!(config.default_provider, "gemini");
        assert_eq!(config.judge_model, DEFAULT_MODEL);
        assert!(config.is_configured("mock"));
        assert!(config.is_configured("ollama"));
        assert!(!config.is_configured("gemini"));
    }

    #[test]
    fn test_available_providers() {
        let config = LlmConfig::from_vars(vars(&[("OPENAI_API_KEY", "sk-test")]));
        let providers = config.available_providers();
        assert!(providers.contains(&"mock"));
        assert!(providers.contains(&"openai"));
        assert!(!providers.contains(&"gemini"));
        assert_eq!(config.api_key("OpenAI"), Some("sk-test"));
    }

    #[test]
    fn test_missing_key_is_reported() {
        let config = LlmConfig::default();
        let err = config.provider("gemini").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "GEMINI_API_KEY"));
        assert!(config.provider("mock").is_ok());
        assert!(matches!(
            config.provider("nope"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = LlmConfig::from_vars(vars(&[("OLLAMA_URL", "http://gpu-box:11434")]));
        assert_eq!(config.ollama_url, "http://gpu-box:11434");
        let provider = config.provider("Ollama").unwrap();
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_rounds_from_vars() {
        let config = VeracityConfig::from_vars(vars(&[
            ("VERACITY_ROUNDS", "3"),
            ("VERACITY_DEBUG", "true"),
            ("VERACITY_JUDGE_MODEL", "gpt-4o"),
        ]))
        .unwrap();
        assert_eq!(config.rounds, 3);
        assert!(config.debug);
        assert_eq!(config.llm.judge_model, "gpt-4o");

        assert!(VeracityConfig::from_vars(vars(&[("VERACITY_ROUNDS", "0")])).is_err());
        assert_eq!(VeracityConfig::from_vars(vars(&[])).unwrap().rounds, 2);
    }
}
