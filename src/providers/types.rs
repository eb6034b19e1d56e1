//! Provider types for ReactLab
//!
//! This module defines the core types and traits for LLM providers,
//! including the `LLMProvider` trait, chat options, and response types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::{Message, ToolCall};

/// Definition of a tool that can be called by the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The name of the tool (must be unique)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition.
    ///
    /// # Example
    /// ```
    /// use reactlab::providers::ToolDefinition;
    /// use serde_json::json;
    ///
    /// let tool = ToolDefinition::new(
    ///     "read_file",
    ///     "Read the content of a file",
    ///     json!({
    ///         "type": "object",
    ///         "properties": {
    ///             "file_path": { "type": "string" }
    ///         },
    ///         "required": ["file_path"]
    ///     }),
    /// );
    /// assert_eq!(tool.name, "read_file");
    /// ```
    pub fn new(name: &str, description: &str, parameters: serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

/// Trait for language model backends.
///
/// A provider turns the conversation history plus the available tools into
/// exactly one assistant response, which may carry text, tool-call requests,
/// or both.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send the history and tool set to the model.
    ///
    /// # Arguments
    /// * `messages` - The full conversation history, system message first
    /// * `tools` - Tools the model may request; empty for plain chat
    /// * `options` - Sampling options like temperature and max_tokens
    async fn chat_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: &ChatOptions,
    ) -> Result<LLMResponse>;

    /// Plain chat without any tools.
    async fn chat(&self, messages: &[Message], options: &ChatOptions) -> Result<LLMResponse> {
        self.chat_with_tools(messages, &[], options).await
    }

    /// Whether this backend can return structured tool calls.
    ///
    /// When `false` the agent sends no tool definitions, so no tool is ever
    /// requested and every reply is a final answer.
    fn supports_tools(&self) -> bool {
        true
    }

    /// The model identifier requests are sent to (e.g. "gpt-4-turbo").
    fn model(&self) -> &str;

    /// The provider name (e.g. "openai", "ollama").
    fn name(&self) -> &str;
}

/// Options for chat completion requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions {
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    pub temperature: Option<f32>,
}

impl ChatOptions {
    /// Create new default chat options.
    ///
    /// # Example
    /// ```
    /// use reactlab::providers::ChatOptions;
    ///
    /// let options = ChatOptions::new().with_max_tokens(1000).with_temperature(0.2);
    /// assert_eq!(options.max_tokens, Some(1000));
    /// assert_eq!(options.temperature, Some(0.2));
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from an LLM chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    /// Text content of the response, if any
    pub content: Option<String>,
    /// Tool calls requested by the model, in the order it returned them
    pub tool_calls: Vec<LLMToolCall>,
    /// Token usage information (if available)
    pub usage: Option<Usage>,
}

impl LLMResponse {
    /// Create a simple text response with no tool calls.
    ///
    /// # Example
    /// ```
    /// use reactlab::providers::LLMResponse;
    ///
    /// let response = LLMResponse::text("Here is your plan.");
    /// assert_eq!(response.content.as_deref(), Some("Here is your plan."));
    /// assert!(!response.has_tool_calls());
    /// ```
    pub fn text(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            tool_calls: vec![],
            usage: None,
        }
    }

    /// Create a response with tool calls. Empty `content` is stored as null.
    ///
    /// # Example
    /// ```
    /// use reactlab::providers::{LLMResponse, LLMToolCall};
    ///
    /// let call = LLMToolCall::new("call_1", "get_okr_guidelines", "{}");
    /// let response = LLMResponse::with_tools("", vec![call]);
    /// assert!(response.has_tool_calls());
    /// assert!(response.content.is_none());
    /// ```
    pub fn with_tools(content: &str, tool_calls: Vec<LLMToolCall>) -> Self {
        Self {
            content: (!content.is_empty()).then(|| content.to_string()),
            tool_calls,
            usage: None,
        }
    }

    /// Check if this response contains any tool calls.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Set usage information for this response.
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Convert into the assistant message that goes into history.
    pub fn into_message(self) -> Message {
        Message {
            role: crate::session::Role::Assistant,
            content: self.content,
            tool_calls: self
                .tool_calls
                .into_iter()
                .map(|tc| ToolCall {
                    id: tc.id,
                    name: tc.name,
                    arguments: tc.arguments,
                })
                .collect(),
            tool_call_id: None,
        }
    }
}

/// A tool call made by the LLM, as returned on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LLMToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool to execute
    pub name: String,
    /// JSON-encoded arguments for the tool
    pub arguments: String,
}

impl LLMToolCall {
    /// Create a new tool call.
    ///
    /// # Example
    /// ```
    /// use reactlab::providers::LLMToolCall;
    ///
    /// let call = LLMToolCall::new("call_123", "save_plan", r#"{"file_path": "plan.txt"}"#);
    /// assert_eq!(call.name, "save_plan");
    /// ```
    pub fn new(id: &str, name: &str, arguments: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }
}

/// Token usage information from a completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used (prompt + completion)
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Add another call's counts to these.
    pub fn accumulate(&mut self, other: &Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn test_llm_response_text() {
        let response = LLMResponse::text("Hello, world!");
        assert_eq!(response.content.as_deref(), Some("Hello, world!"));
        assert!(!response.has_tool_calls());
        assert!(response.usage.is_none());
    }

    #[test]
    fn test_usage_accumulate() {
        let mut total = Usage::new(10, 5);
        total.accumulate(&Usage::new(7, 3));
        assert_eq!(total, Usage::new(17, 8));
        assert_eq!(total.total_tokens, 25);
    }

    #[test]
    fn test_llm_response_with_tools() {
        let call = LLMToolCall::new("call_1", "search", r#"{"query": "rust"}"#);
        let response = LLMResponse::with_tools("Searching...", vec![call]);

        assert_eq!(response.content.as_deref(), Some("Searching..."));
        assert!(response.has_tool_calls());
        assert_eq!(response.tool_calls[0].name, "search");
    }

    #[test]
    fn test_llm_response_with_usage() {
        let response = LLMResponse::text("Hello").with_usage(Usage::new(100, 50));
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 100);
        assert_eq!(usage.completion_tokens, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn test_into_message_keeps_calls_in_order() {
        let response = LLMResponse::with_tools(
            "Let me check",
            vec![
                LLMToolCall::new("call_1", "get_okr_guidelines", "{}"),
                LLMToolCall::new("call_2", "read_file", r#"{"file_path":"a.txt"}"#),
            ],
        );
        let message = response.into_message();

        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.text(), "Let me check");
        assert_eq!(message.tool_calls.len(), 2);
        assert_eq!(message.tool_calls[0].id, "call_1");
        assert_eq!(message.tool_calls[1].name, "read_file");
        assert!(message.tool_call_id.is_none());
    }

    #[test]
    fn test_into_message_text_only() {
        let message = LLMResponse::text("Final").into_message();
        assert!(!message.has_tool_calls());
        assert_eq!(message, crate::session::Message::assistant("Final"));
    }

    #[test]
    fn test_chat_options_default() {
        let options = ChatOptions::default();
        assert!(options.max_tokens.is_none());
        assert!(options.temperature.is_none());
    }

    #[test]
    fn test_tool_definition_serialization() {
        let tool = ToolDefinition::new(
            "echo",
            "Echo text back",
            serde_json::json!({"type": "object"}),
        );
        let json = serde_json::to_string(&tool).unwrap();
        let parsed: ToolDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tool);
    }
}
