//! Configuration types for ReactLab
//!
//! Every section uses `#[serde(default)]`, so a config file only needs the
//! fields it wants to change.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ReactError;

// ============================================================================
// Main Configuration
// ============================================================================

/// Main configuration structure for ReactLab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language model connection
    pub llm: LlmConfig,
    /// Agent loop behaviour
    pub agent: AgentConfig,
    /// Log output
    pub logging: LoggingConfig,
}

// ============================================================================
// LLM Configuration
// ============================================================================

/// Language model settings as written in the config file.
///
/// Unset fields fall back to per-provider defaults in
/// [`Config::resolve_llm`](crate::config::Config::resolve_llm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend name: "openai" or "ollama"
    pub provider: String,
    /// Model identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key (required for OpenAI)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Maximum tokens per response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAI.to_string(),
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Supported language model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Ollama,
}

impl ProviderKind {
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-4-turbo",
            Self::Ollama => "llama3",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com/v1",
            Self::Ollama => "http://localhost:11434",
        }
    }

    /// Local inference is slow, so Ollama gets a longer budget.
    pub fn default_timeout_secs(&self) -> u64 {
        match self {
            Self::OpenAI => 60,
            Self::Ollama => 120,
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ReactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(ReactError::Config(format!(
                "Unsupported LLM provider: {}",
                other
            ))),
        }
    }
}

/// Fully resolved connection settings handed to the provider constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

// ============================================================================
// Agent Configuration
// ============================================================================

/// Agent loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model rounds allowed per turn
    pub max_iterations: usize,
    /// Record and print the step trace
    pub verbose: bool,
    /// Directory relative tool paths resolve against
    pub workspace: String,
    /// Replaces the built-in HR assistant prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: crate::agent::MAX_ITERATIONS,
            verbose: true,
            workspace: ".".to_string(),
            system_prompt: None,
        }
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Single-line `target: message {fields}` output
    #[default]
    Component,
    /// JSON lines for log aggregators
    Json,
}

impl FromStr for LogFormat {
    type Err = ReactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "component" => Ok(Self::Component),
            "json" => Ok(Self::Json),
            other => Err(ReactError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Append JSON logs to this file instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: "warn".to_string(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.provider, "openai");
        assert!(config.llm.model.is_none());
        assert_eq!(config.agent.max_iterations, 10);
        assert!(config.agent.verbose);
        assert_eq!(config.agent.workspace, ".");
        assert_eq!(config.logging.format, LogFormat::Component);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"llm": {"provider": "ollama"}, "agent": {"verbose": false}}"#)
                .unwrap();
        assert_eq!(config.llm.provider, "ollama");
        assert!(!config.agent.verbose);
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAI);
        assert_eq!(" Ollama ".parse::<ProviderKind>().unwrap(), ProviderKind::Ollama);

        let err = "anthropic".parse::<ProviderKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Unsupported LLM provider: anthropic"
        );
    }

    #[test]
    fn test_provider_kind_defaults() {
        assert_eq!(ProviderKind::OpenAI.default_model(), "gpt-4-turbo");
        assert_eq!(ProviderKind::Ollama.default_model(), "llama3");
        assert_eq!(ProviderKind::Ollama.default_base_url(), "http://localhost:11434");
        assert_eq!(ProviderKind::Ollama.default_timeout_secs(), 120);
        assert!(ProviderKind::OpenAI.requires_api_key());
        assert!(!ProviderKind::Ollama.requires_api_key());
    }

    #[test]
    fn test_log_format_deserialize() {
        let cfg: LoggingConfig =
            serde_json::from_str(r#"{"format":"json","level":"debug"}"#).unwrap();
        assert_eq!(cfg.format, LogFormat::Json);
        assert_eq!(cfg.level, "debug");

        let cfg: LoggingConfig = serde_json::from_str(r#"{"format":"pretty"}"#).unwrap();
        assert_eq!(cfg.format, LogFormat::Pretty);
        assert_eq!(cfg.level, "warn");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_serialization_skips_unset_options() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("api_key"));
        assert!(!json.contains("system_prompt"));
        assert!(json.contains("max_iterations"));
    }
}
