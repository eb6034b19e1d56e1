//! Agent module - the ReAct loop
//!
//! This module provides the agent that turns one user message into an
//! answer by alternating between the model and the tools:
//!
//! - Appending the user message to the conversation
//! - Calling the LLM provider with the history and tool definitions
//! - Executing requested tool calls in order and recording the results
//! - Stopping on a final answer or after `max_iterations` rounds
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CLI / host │────>│  AgentLoop  │────>│ LLMProvider │
//! │             │     │             │     │  (OpenAI)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            │
//!                            ▼
//!                     ┌──────────────┐    ┌─────────────┐
//!                     │ Conversation │    │    Tools    │
//!                     │              │    │  Registry   │
//!                     └──────────────┘    └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use reactlab::agent::AgentLoop;
//! use reactlab::config::Config;
//! use reactlab::providers::create_provider;
//! use reactlab::tools::default_tools;
//!
//! async fn run_agent() -> reactlab::Result<()> {
//!     let settings = Config::load()?.resolve_llm()?;
//!     let provider = create_provider(&settings)?;
//!
//!     let mut agent = AgentLoop::builder(provider)
//!         .tools(default_tools())
//!         .build()?;
//!
//!     let outcome = agent.submit_turn("Create OKRs for Alice").await?;
//!     println!("{}", outcome);
//!     Ok(())
//! }
//! ```

mod r#loop;
pub mod prompt;
pub mod trace;

pub use prompt::HR_ASSISTANT_PROMPT;
pub use r#loop::{
    AgentLoop, AgentLoopBuilder, TraceObserver, TurnOutcome, MAX_ITERATIONS, MAX_ITERATIONS_TEXT,
};
pub use trace::{TraceEvent, TurnTrace};
