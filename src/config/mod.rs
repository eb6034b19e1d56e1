//! Configuration management for ReactLab
//!
//! Configuration is loaded from `~/.reactlab/config.json` with environment
//! variable overrides. Nothing is global: callers load a [`Config`] and pass
//! the resolved [`LlmSettings`] to the provider they build.

mod types;
pub mod validate;

pub use types::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ReactError, Result};
use crate::providers::ChatOptions;

impl Config {
    /// Returns the ReactLab configuration directory path (~/.reactlab)
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".reactlab")
    }

    /// Returns the path to the config file (~/.reactlab/config.json)
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Read a config file without applying the environment.
    pub fn read_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            ReactError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// The lab's conventional names (`LLM_PROVIDER`, `OPENAI_API_KEY`,
    /// `OPENAI_MODEL`, `OLLAMA_BASE_URL`, `OLLAMA_MODEL`) are read first and
    /// only for the selected provider. `REACTLAB_*` names are read last and
    /// win.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("LLM_PROVIDER") {
            self.llm.provider = val;
        }
        if let Some(val) = lookup("REACTLAB_LLM_PROVIDER") {
            self.llm.provider = val;
        }

        match self.llm.provider.parse::<ProviderKind>() {
            Ok(ProviderKind::OpenAI) => {
                if let Some(val) = lookup("OPENAI_API_KEY") {
                    self.llm.api_key = Some(val);
                }
                if let Some(val) = lookup("OPENAI_MODEL") {
                    self.llm.model = Some(val);
                }
            }
            Ok(ProviderKind::Ollama) => {
                if let Some(val) = lookup("OLLAMA_BASE_URL") {
                    self.llm.base_url = Some(val);
                }
                if let Some(val) = lookup("OLLAMA_MODEL") {
                    self.llm.model = Some(val);
                }
            }
            // Reported by resolve_llm / validate
            Err(_) => {}
        }

        // LLM
        if let Some(val) = lookup("REACTLAB_LLM_MODEL") {
            self.llm.model = Some(val);
        }
        if let Some(val) = lookup("REACTLAB_LLM_API_KEY") {
            self.llm.api_key = Some(val);
        }
        if let Some(val) = lookup("REACTLAB_LLM_BASE_URL") {
            self.llm.base_url = Some(val);
        }
        if let Some(val) = lookup("REACTLAB_LLM_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                self.llm.timeout_secs = Some(v);
            }
        }

        // Agent
        if let Some(val) = lookup("REACTLAB_AGENT_MAX_ITERATIONS") {
            if let Ok(v) = val.parse() {
                self.agent.max_iterations = v;
            }
        }
        if let Some(val) = lookup("REACTLAB_AGENT_VERBOSE") {
            if let Some(v) = parse_bool(&val) {
                self.agent.verbose = v;
            }
        }
        if let Some(val) = lookup("REACTLAB_AGENT_WORKSPACE") {
            self.agent.workspace = val;
        }

        // Logging
        if let Some(val) = lookup("REACTLAB_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("REACTLAB_LOG_FORMAT") {
            if let Ok(v) = val.parse() {
                self.logging.format = v;
            }
        }
    }

    /// Resolve the LLM section into concrete connection settings.
    ///
    /// # Errors
    /// `ReactError::Config` for an unsupported provider, a missing OpenAI
    /// API key, or a zero timeout.
    pub fn resolve_llm(&self) -> Result<LlmSettings> {
        let provider: ProviderKind = self.llm.provider.parse()?;

        let api_key = non_empty(&self.llm.api_key);
        if provider.requires_api_key() && api_key.is_none() {
            return Err(ReactError::Config(
                "OPENAI_API_KEY is required when LLM_PROVIDER is 'openai'".to_string(),
            ));
        }

        let timeout_secs = self
            .llm
            .timeout_secs
            .unwrap_or_else(|| provider.default_timeout_secs());
        if timeout_secs == 0 {
            return Err(ReactError::Config(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(LlmSettings {
            provider,
            model: non_empty(&self.llm.model)
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_key: if provider.requires_api_key() {
                api_key
            } else {
                None
            },
            base_url: non_empty(&self.llm.base_url)
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Sampling options for every model call.
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
        }
    }

    /// The system prompt the agent should start with.
    pub fn system_prompt(&self) -> &str {
        self.agent
            .system_prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(crate::agent::HR_ASSISTANT_PROMPT)
    }

    /// Collect every problem with this configuration.
    ///
    /// An empty list means the agent can be started.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = self.resolve_llm() {
            errors.push(match e {
                ReactError::Config(msg) => msg,
                other => other.to_string(),
            });
        }
        if self.agent.max_iterations == 0 {
            errors.push("agent.max_iterations must be at least 1".to_string());
        }
        if let Some(t) = self.llm.temperature {
            if !(0.0..=2.0).contains(&t) {
                errors.push(format!("llm.temperature must be between 0 and 2, got {}", t));
            }
        }
        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            errors.push(format!("logging.level '{}' is not a valid filter", self.logging.level));
        }

        errors
    }

    /// A copy safe to print, with the API key masked.
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        masked.llm.api_key = self.llm.api_key.as_deref().map(mask_secret);
        masked
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Keep the first four characters of a secret, hide the rest.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{}****", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_path() {
        assert!(Config::path().ends_with(".reactlab/config.json"));
    }

    #[test]
    fn test_read_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::read_file(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"llm": {"provider": "ollama", "model": "mistral"}, "agent": {"max_iterations": 4}}"#,
        )
        .unwrap();

        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model.as_deref(), Some("mistral"));
        assert_eq!(config.agent.max_iterations, 4);
    }

    #[test]
    fn test_read_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::read_file(&path).unwrap_err();
        assert!(matches!(err, ReactError::Config(_)));
    }

    #[test]
    fn test_lab_env_names_openai() {
        let mut config = Config::default();
        config.apply_env_overrides_with(env(&[
            ("OPENAI_API_KEY", "sk-lab"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OLLAMA_MODEL", "ignored"),
        ]));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-lab"));
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn test_lab_env_names_ollama() {
        let mut config = Config::default();
        config.apply_env_overrides_with(env(&[
            ("LLM_PROVIDER", "ollama"),
            ("OLLAMA_BASE_URL", "http://gpu:11434"),
            ("OLLAMA_MODEL", "llama3.1"),
            ("OPENAI_MODEL", "ignored"),
        ]));
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.base_url.as_deref(), Some("http://gpu:11434"));
        assert_eq!(config.llm.model.as_deref(), Some("llama3.1"));
    }

    #[test]
    fn test_prefixed_env_names_win() {
        let mut config = Config::default();
        config.apply_env_overrides_with(env(&[
            ("LLM_PROVIDER", "ollama"),
            ("REACTLAB_LLM_PROVIDER", "openai"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("REACTLAB_LLM_MODEL", "gpt-4o-mini"),
            ("REACTLAB_AGENT_MAX_ITERATIONS", "3"),
            ("REACTLAB_AGENT_VERBOSE", "false"),
            ("REACTLAB_LOG_FORMAT", "json"),
        ]));
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.agent.max_iterations, 3);
        assert!(!config.agent.verbose);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unparseable_env_values_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides_with(env(&[
            ("REACTLAB_AGENT_MAX_ITERATIONS", "many"),
            ("REACTLAB_AGENT_VERBOSE", "maybe"),
        ]));
        assert_eq!(config.agent.max_iterations, 10);
        assert!(config.agent.verbose);
    }

    #[test]
    fn test_resolve_openai_defaults() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-test".into());

        let settings = config.resolve_llm().unwrap();
        assert_eq!(settings.provider, ProviderKind::OpenAI);
        assert_eq!(settings.model, "gpt-4-turbo");
        assert_eq!(settings.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_resolve_openai_requires_key() {
        let mut config = Config::default();
        config.llm.api_key = Some("   ".into());
        let err = config.resolve_llm().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY is required"));
    }

    #[test]
    fn test_resolve_ollama_defaults() {
        let mut config = Config::default();
        config.llm.provider = "ollama".into();
        config.llm.api_key = Some("sk-unused".into());

        let settings = config.resolve_llm().unwrap();
        assert_eq!(settings.model, "llama3");
        assert_eq!(settings.base_url, "http://localhost:11434");
        assert_eq!(settings.timeout, Duration::from_secs(120));
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_resolve_unsupported_provider() {
        let mut config = Config::default();
        config.llm.provider = "cohere".into();
        let err = config.resolve_llm().unwrap_err();
        assert!(matches!(err, ReactError::Config(ref m) if m == "Unsupported LLM provider: cohere"));
    }

    #[test]
    fn test_validate_collects_all_problems() {
        let mut config = Config::default();
        config.agent.max_iterations = 0;
        config.llm.temperature = Some(3.5);

        let errors = config.validate();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("OPENAI_API_KEY"));
        assert!(errors[1].contains("max_iterations"));
        assert!(errors[2].contains("temperature"));
    }

    #[test]
    fn test_validate_ok() {
        let mut config = Config::default();
        config.llm.provider = "ollama".into();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_system_prompt_fallback() {
        let mut config = Config::default();
        assert_eq!(config.system_prompt(), crate::agent::HR_ASSISTANT_PROMPT);
        config.agent.system_prompt = Some("Be terse.".into());
        assert_eq!(config.system_prompt(), "Be terse.");
    }

    #[test]
    fn test_chat_options() {
        let mut config = Config::default();
        config.llm.max_tokens = Some(512);
        let options = config.chat_options();
        assert_eq!(options.max_tokens, Some(512));
        assert!(options.temperature.is_none());
    }

    #[test]
    fn test_masked() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-abcdefghijklmnop".into());
        let masked = config.masked();
        assert_eq!(masked.llm.api_key.as_deref(), Some("sk-a****"));
        assert_eq!(mask_secret("short"), "****");
    }
}
