//! Providers module - language model backends
//!
//! This module defines the `LLMProvider` trait and common types for talking
//! to chat models that support tool calling. `OpenAIProvider` speaks the
//! Chat Completions wire format, which both OpenAI and Ollama serve.
//!
//! # Example
//!
//! ```rust,ignore
//! use reactlab::config::Config;
//! use reactlab::providers::{create_provider, ChatOptions};
//! use reactlab::session::Message;
//!
//! async fn example() {
//!     let settings = Config::load().unwrap().resolve_llm().unwrap();
//!     let provider = create_provider(&settings).unwrap();
//!     let messages = vec![Message::user("Hello!")];
//!
//!     let response = provider.chat(&messages, &ChatOptions::new()).await.unwrap();
//!     println!("Response: {:?}", response.content);
//! }
//! ```

pub mod openai;
mod types;

use tracing::info;

use crate::config::LlmSettings;
use crate::error::{ProviderError, Result};

pub use openai::OpenAIProvider;
pub use types::{ChatOptions, LLMProvider, LLMResponse, LLMToolCall, ToolDefinition, Usage};

/// Build the provider for resolved LLM settings.
pub fn create_provider(settings: &LlmSettings) -> Result<Box<dyn LLMProvider>> {
    let provider = OpenAIProvider::from_settings(settings)?;
    info!(
        provider = %settings.provider,
        model = %settings.model,
        base_url = %provider.api_base(),
        "Language model client ready"
    );
    Ok(Box::new(provider))
}

/// Parse an HTTP status code and response body into a structured [`ProviderError`].
pub fn parse_provider_error(status: u16, body: &str) -> ProviderError {
    match status {
        401 => ProviderError::Auth(body.to_string()),
        402 => ProviderError::Billing(body.to_string()),
        404 => ProviderError::ModelNotFound(body.to_string()),
        429 => ProviderError::RateLimit(body.to_string()),
        400 => ProviderError::InvalidRequest(body.to_string()),
        500..=599 => ProviderError::ServerError(body.to_string()),
        _ => ProviderError::Unknown(format!("HTTP {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;
    use std::time::Duration;

    #[test]
    fn test_parse_provider_error_401() {
        let err = parse_provider_error(401, "invalid api key");
        assert!(matches!(err, ProviderError::Auth(_)));
        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn test_parse_provider_error_429() {
        let err = parse_provider_error(429, "rate limited");
        assert!(matches!(err, ProviderError::RateLimit(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_provider_error_400() {
        let err = parse_provider_error(400, "bad json");
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_parse_provider_error_5xx() {
        for status in [500, 502, 503, 504] {
            let err = parse_provider_error(status, "down");
            assert!(matches!(err, ProviderError::ServerError(_)));
        }
    }

    #[test]
    fn test_parse_provider_error_unknown() {
        let err = parse_provider_error(418, "i'm a teapot");
        assert!(matches!(err, ProviderError::Unknown(_)));
        assert!(err.to_string().contains("HTTP 418"));
    }

    #[test]
    fn test_create_provider_reports_settings() {
        let settings = LlmSettings {
            provider: ProviderKind::OpenAI,
            model: "gpt-4o-mini".to_string(),
            api_key: Some("sk-test".to_string()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        };
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }
}
