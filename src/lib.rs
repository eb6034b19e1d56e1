//! ReactLab - a hand-rolled ReAct agent for drafting performance reviews and OKRs
//!
//! The agent alternates between a tool-calling language model and a small set
//! of local tools until the model produces a final answer.

pub mod agent;
pub mod config;
pub mod error;
pub mod providers;
pub mod session;
pub mod tools;
pub mod utils;

pub use agent::{AgentLoop, TurnOutcome, TurnTrace, MAX_ITERATIONS};
pub use config::Config;
pub use error::{ProviderError, ReactError, Result};
pub use providers::{
    ChatOptions, LLMProvider, LLMResponse, LLMToolCall, OpenAIProvider, ToolDefinition, Usage,
};
pub use session::{Conversation, Message, Role, ToolCall, ToolCallRequest};
pub use tools::{Tool, ToolContext, ToolRegistry};
