//! OpenAI-compatible Provider Implementation
//!
//! This module implements the `LLMProvider` trait for the OpenAI Chat
//! Completions API, handling message conversion, tool calls, and response
//! parsing. The same wire format is served by Ollama under `/v1`, so one
//! implementation covers both backends.
//!
//! # Example
//!
//! ```rust,ignore
//! use reactlab::providers::{openai::OpenAIProvider, ChatOptions, LLMProvider};
//! use reactlab::session::Message;
//!
//! async fn example() {
//!     let provider = OpenAIProvider::new("your-api-key", "gpt-4-turbo");
//!
//!     let messages = vec![
//!         Message::system("You are a helpful assistant."),
//!         Message::user("Hello!"),
//!     ];
//!
//!     let response = provider
//!         .chat(&messages, &ChatOptions::default())
//!         .await
//!         .unwrap();
//!
//!     println!("OpenAI: {:?}", response.content);
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{LlmSettings, ProviderKind};
use crate::error::{ProviderError, ReactError, Result};
use crate::session::{Message, Role};

use super::{
    parse_provider_error, ChatOptions, LLMProvider, LLMResponse, LLMToolCall, ToolDefinition,
    Usage,
};

/// The OpenAI API endpoint URL.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

// ============================================================================
// OpenAI API Request Types
// ============================================================================

/// OpenAI API request body.
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    /// Model identifier
    model: String,
    /// Conversation messages (including system)
    messages: Vec<OpenAIMessage>,
    /// Available tools
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// A message in OpenAI's format.
#[derive(Debug, Serialize)]
struct OpenAIMessage {
    /// Role: "system", "user", "assistant", or "tool"
    role: String,
    /// Message content (null for assistant turns that only call tools)
    content: Option<String>,
    /// Tool calls made by the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAIToolCallRequest>>,
    /// ID of the tool call this message is responding to
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

/// A tool call in a request (assistant requesting tool execution).
#[derive(Debug, Serialize)]
struct OpenAIToolCallRequest {
    id: String,
    /// Always "function"
    r#type: String,
    function: OpenAIFunctionCall,
}

/// Function call details.
#[derive(Debug, Serialize, Deserialize)]
struct OpenAIFunctionCall {
    name: String,
    /// JSON-encoded arguments
    arguments: String,
}

/// OpenAI tool definition.
#[derive(Debug, Serialize)]
struct OpenAITool {
    /// Always "function"
    r#type: String,
    function: OpenAIFunctionDef,
}

#[derive(Debug, Serialize)]
struct OpenAIFunctionDef {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

// ============================================================================
// OpenAI API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    /// Text content (may be null if tool_calls present)
    content: Option<String>,
    tool_calls: Option<Vec<OpenAIToolCallResponse>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIToolCallResponse {
    id: String,
    function: OpenAIFunctionCall,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// OpenAI API error response.
#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
    #[serde(default)]
    r#type: Option<String>,
}

// ============================================================================
// OpenAI Provider
// ============================================================================

/// OpenAI-compatible LLM provider.
///
/// Implements the `LLMProvider` trait for the Chat Completions API.
/// Handles message format conversion, tool calling, and response parsing.
pub struct OpenAIProvider {
    /// Provider name reported to callers ("openai" or "ollama")
    name: String,
    /// API key for authentication (local backends need none)
    api_key: Option<String>,
    /// API base URL, without trailing slash
    api_base: String,
    /// Model identifier sent with every request
    model: String,
    /// HTTP client for making requests
    client: Client,
}

impl OpenAIProvider {
    /// Create a provider for the public OpenAI endpoint.
    ///
    /// # Example
    /// ```
    /// use reactlab::providers::openai::OpenAIProvider;
    /// use reactlab::providers::LLMProvider;
    ///
    /// let provider = OpenAIProvider::new("sk-xxx", "gpt-4-turbo");
    /// assert_eq!(provider.name(), "openai");
    /// assert_eq!(provider.model(), "gpt-4-turbo");
    /// ```
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_client(Some(api_key), OPENAI_API_URL, model, Client::new())
    }

    /// Create a provider for any OpenAI-compatible endpoint.
    ///
    /// # Example
    /// ```
    /// use reactlab::providers::openai::OpenAIProvider;
    ///
    /// let provider = OpenAIProvider::with_base_url(None, "http://localhost:11434/v1/", "llama3");
    /// ```
    pub fn with_base_url(api_key: Option<&str>, api_base: &str, model: &str) -> Self {
        Self::with_client(api_key, api_base, model, Client::new())
    }

    /// Create a provider with a custom HTTP client (timeouts, proxies, tests).
    pub fn with_client(api_key: Option<&str>, api_base: &str, model: &str, client: Client) -> Self {
        Self {
            name: "openai".to_string(),
            api_key: api_key.map(str::to_string),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        }
    }

    /// Build a provider from resolved settings.
    ///
    /// The per-call timeout is applied to the HTTP client. For Ollama the
    /// OpenAI-compatible `/v1` path is appended to the configured base URL.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ReactError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let api_base = match settings.provider {
            ProviderKind::OpenAI => settings.base_url.clone(),
            ProviderKind::Ollama => ollama_api_base(&settings.base_url),
        };

        let mut provider = Self::with_client(
            settings.api_key.as_deref(),
            &api_base,
            &settings.model,
            client,
        );
        provider.name = settings.provider.to_string();
        Ok(provider)
    }

    /// The API base URL requests are sent to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

fn ollama_api_base(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{}/v1", trimmed)
    }
}

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert history messages to OpenAI API format.
fn convert_messages(messages: &[Message]) -> Vec<OpenAIMessage> {
    messages
        .iter()
        .map(|msg| {
            let role = match msg.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::Tool => "tool",
            }
            .to_string();

            let tool_calls = (!msg.tool_calls.is_empty()).then(|| {
                msg.tool_calls
                    .iter()
                    .map(|tc| OpenAIToolCallRequest {
                        id: tc.id.clone(),
                        r#type: "function".to_string(),
                        function: OpenAIFunctionCall {
                            name: tc.name.clone(),
                            arguments: tc.arguments.clone(),
                        },
                    })
                    .collect()
            });

            OpenAIMessage {
                role,
                content: msg.content.clone(),
                tool_calls,
                tool_call_id: msg.tool_call_id.clone(),
            }
        })
        .collect()
}

/// Convert tool definitions to OpenAI API format.
fn convert_tools(tools: &[ToolDefinition]) -> Vec<OpenAITool> {
    tools
        .iter()
        .map(|t| OpenAITool {
            r#type: "function".to_string(),
            function: OpenAIFunctionDef {
                name: t.name.clone(),
                description: t.description.clone(),
                parameters: t.parameters.clone(),
            },
        })
        .collect()
}

/// Convert an OpenAI API response to an LLMResponse.
///
/// Only the first choice is used. A response without choices is malformed.
fn convert_response(response: OpenAIResponse) -> Result<LLMResponse> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ReactError::Provider("OpenAI response contained no choices".into()))?;

    let tool_calls = choice
        .message
        .tool_calls
        .map(|tcs| {
            tcs.into_iter()
                .map(|tc| LLMToolCall::new(&tc.id, &tc.function.name, &tc.function.arguments))
                .collect()
        })
        .unwrap_or_default();

    let mut llm_response = LLMResponse {
        content: choice.message.content,
        tool_calls,
        usage: None,
    };

    if let Some(usage) = response.usage {
        llm_response =
            llm_response.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
    }

    Ok(llm_response)
}

// ============================================================================
// LLMProvider Implementation
// ============================================================================

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn chat_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: &ChatOptions,
    ) -> Result<LLMResponse> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: convert_messages(messages),
            tools: (!tools.is_empty()).then(|| convert_tools(tools)),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        debug!(
            provider = %self.name,
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            "Sending chat completion request"
        );

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ReactError::from(ProviderError::Timeout(e.to_string()))
            } else {
                ReactError::Provider(format!("{} request failed: {}", self.name, e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured error message when the body has one
            let detail = match serde_json::from_str::<OpenAIErrorResponse>(&error_text) {
                Ok(parsed) => match parsed.error.r#type {
                    Some(kind) => format!("{} - {}", kind, parsed.error.message),
                    None => parsed.error.message,
                },
                Err(_) => error_text,
            };

            return Err(parse_provider_error(status, &detail).into());
        }

        let openai_response: OpenAIResponse = response.json().await.map_err(|e| {
            ReactError::Provider(format!("Failed to parse {} response: {}", self.name, e))
        })?;

        let converted = convert_response(openai_response)?;
        info!(
            provider = %self.name,
            tool_calls = converted.tool_calls.len(),
            "Chat completion received"
        );
        Ok(converted)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Tests
// ============================================================================
