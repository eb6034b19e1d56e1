//! Agent loop implementation
//!
//! This module provides the ReAct loop that drives one user turn: ask the
//! model, run the tools it requests, feed the results back, and repeat until
//! the model answers or the iteration cap is hit.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{ReactError, Result};
use crate::providers::{ChatOptions, LLMProvider, ToolDefinition, Usage};
use crate::session::{Conversation, Message, ToolCall};
use crate::tools::{Tool, ToolContext, ToolRegistry};
use crate::utils::string::preview;

use super::prompt::HR_ASSISTANT_PROMPT;
use super::trace::{TraceEvent, TurnTrace, OBSERVATION_PREVIEW_CHARS};

/// Default number of model rounds per turn.
pub const MAX_ITERATIONS: usize = 10;

/// Text shown to users when a turn runs out of iterations.
pub const MAX_ITERATIONS_TEXT: &str = "Error: Max iterations reached.";

/// Sees each trace event as soon as it is recorded.
pub type TraceObserver = Box<dyn Fn(&TraceEvent) + Send + Sync>;

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model replied without requesting tools.
    Answer(String),
    /// The model was still requesting tools when the cap was hit.
    MaxIterationsReached { iterations: usize },
}

impl TurnOutcome {
    /// Text for display. Exhaustion renders as [`MAX_ITERATIONS_TEXT`].
    pub fn text(&self) -> &str {
        match self {
            Self::Answer(text) => text,
            Self::MaxIterationsReached { .. } => MAX_ITERATIONS_TEXT,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// The ReAct agent.
///
/// Owns its provider, tool registry and conversation. `submit_turn` takes
/// `&mut self`, so a single agent can only ever run one turn at a time.
///
/// # Example
///
/// ```rust,ignore
/// use reactlab::agent::AgentLoop;
/// use reactlab::providers::OpenAIProvider;
/// use reactlab::tools::default_tools;
///
/// async fn run() -> reactlab::Result<()> {
///     let provider = OpenAIProvider::new("sk-xxx", "gpt-4-turbo");
///     let mut agent = AgentLoop::builder(Box::new(provider))
///         .tools(default_tools())
///         .verbose(true)
///         .build()?;
///
///     let outcome = agent.submit_turn("Draft OKRs for the payments team").await?;
///     println!("{}", outcome);
///     Ok(())
/// }
/// ```
pub struct AgentLoop {
    provider: Box<dyn LLMProvider>,
    tools: ToolRegistry,
    conversation: Conversation,
    max_iterations: usize,
    verbose: bool,
    chat_options: ChatOptions,
    tool_context: ToolContext,
    observer: Option<TraceObserver>,
    last_trace: Option<TurnTrace>,
    last_usage: Option<Usage>,
}

/// Builder for [`AgentLoop`].
pub struct AgentLoopBuilder {
    provider: Box<dyn LLMProvider>,
    tools: Vec<Box<dyn Tool>>,
    system_prompt: String,
    max_iterations: usize,
    verbose: bool,
    chat_options: ChatOptions,
    workspace: Option<PathBuf>,
    observer: Option<TraceObserver>,
}

impl AgentLoopBuilder {
    /// Replace the tool list.
    pub fn tools(mut self, tools: Vec<Box<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    /// Add one tool to the list.
    pub fn tool(mut self, tool: Box<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn chat_options(mut self, options: ChatOptions) -> Self {
        self.chat_options = options;
        self
    }

    /// Directory that relative tool paths resolve against.
    pub fn workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Stream verbose trace events to `observer` while the turn runs.
    ///
    /// Only called in verbose mode.
    pub fn on_trace<F>(mut self, observer: F) -> Self
    where
        F: Fn(&TraceEvent) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Validate the options and build the agent.
    ///
    /// # Errors
    /// `ReactError::Config` if the tool list is empty, two tools share a
    /// name, or `max_iterations` is zero.
    pub fn build(self) -> Result<AgentLoop> {
        if self.max_iterations == 0 {
            return Err(ReactError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        let tools = ToolRegistry::from_tools(self.tools)?;
        let tool_context = match self.workspace {
            Some(workspace) => ToolContext::new().with_workspace(workspace),
            None => ToolContext::new(),
        };

        info!(
            provider = %self.provider.name(),
            model = %self.provider.model(),
            tools = ?tools.names(),
            max_iterations = self.max_iterations,
            "Agent initialized"
        );

        Ok(AgentLoop {
            provider: self.provider,
            tools,
            conversation: Conversation::new(&self.system_prompt),
            max_iterations: self.max_iterations,
            verbose: self.verbose,
            chat_options: self.chat_options,
            tool_context,
            observer: self.observer,
            last_trace: None,
            last_usage: None,
        })
    }
}

impl AgentLoop {
    /// Start building an agent around a provider.
    ///
    /// Defaults: no tools, the HR assistant system prompt, [`MAX_ITERATIONS`]
    /// rounds, verbose off.
    pub fn builder(provider: Box<dyn LLMProvider>) -> AgentLoopBuilder {
        AgentLoopBuilder {
            provider,
            tools: Vec::new(),
            system_prompt: HR_ASSISTANT_PROMPT.to_string(),
            max_iterations: MAX_ITERATIONS,
            verbose: false,
            chat_options: ChatOptions::default(),
            workspace: None,
            observer: None,
        }
    }

    /// Create an agent with default options.
    pub fn new(
        provider: Box<dyn LLMProvider>,
        tools: Vec<Box<dyn Tool>>,
        system_prompt: &str,
    ) -> Result<Self> {
        Self::builder(provider)
            .tools(tools)
            .system_prompt(system_prompt)
            .build()
    }

    /// Run one user turn to completion.
    ///
    /// # Errors
    /// `ReactError::InvalidInput` for blank input (nothing is recorded), or
    /// the provider's error if a model call fails. Tool failures never
    /// surface here; they become observations for the model.
    pub async fn submit_turn(&mut self, user_text: &str) -> Result<TurnOutcome> {
        if user_text.trim().is_empty() {
            return Err(ReactError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        let span = info_span!("turn", turn_id = %Uuid::new_v4());
        self.run_turn(user_text).instrument(span).await
    }

    async fn run_turn(&mut self, user_text: &str) -> Result<TurnOutcome> {
        self.last_trace = None;
        self.last_usage = None;
        self.conversation.push(Message::user(user_text));

        let definitions: Vec<ToolDefinition> = if self.provider.supports_tools() {
            self.tools.definitions()
        } else {
            Vec::new()
        };
        let mut trace = TurnTrace::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for iteration in 1..=self.max_iterations {
            self.record(&mut trace, TraceEvent::Step { iteration });

            let response = match self
                .provider
                .chat_with_tools(
                    self.conversation.messages(),
                    &definitions,
                    &self.chat_options,
                )
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    error!(iteration, error = %e, "Model call failed");
                    self.keep_trace(trace);
                    return Err(e);
                }
            };

            if let Some(usage) = &response.usage {
                debug!(
                    iteration,
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "Token usage"
                );
                self.last_usage
                    .get_or_insert_with(|| Usage::new(0, 0))
                    .accumulate(usage);
            }

            let message = response.into_message();
            let content = message.content.clone();
            let calls = message.tool_calls.clone();
            self.conversation.push(message);

            if let Some(thought) = content.as_deref().filter(|c| !c.is_empty()) {
                self.record(
                    &mut trace,
                    TraceEvent::Thought {
                        text: thought.to_string(),
                    },
                );
            }

            if calls.is_empty() {
                let answer = content.unwrap_or_default();
                self.record(
                    &mut trace,
                    TraceEvent::FinalAnswer {
                        text: answer.clone(),
                    },
                );
                self.keep_trace(trace);
                return Ok(TurnOutcome::Answer(answer));
            }

            for call in &calls {
                let observation = match reject_call_id(&call.id, &mut seen_ids) {
                    Some(rejection) => {
                        self.record(
                            &mut trace,
                            TraceEvent::Action {
                                tool: call.name.clone(),
                                arguments: call.arguments.clone(),
                            },
                        );
                        warn!(tool = %call.name, id = %call.id, "Rejected tool call id");
                        rejection
                    }
                    None => self.dispatch(call, &mut trace).await,
                };
                self.record(
                    &mut trace,
                    TraceEvent::Observation {
                        text: preview(&observation, OBSERVATION_PREVIEW_CHARS),
                    },
                );
                self.conversation
                    .push(Message::tool_result(&call.id, &observation));
            }
        }

        warn!(
            iterations = self.max_iterations,
            "Turn stopped without a final answer"
        );
        self.record(
            &mut trace,
            TraceEvent::MaxIterations {
                iterations: self.max_iterations,
            },
        );
        self.keep_trace(trace);
        Ok(TurnOutcome::MaxIterationsReached {
            iterations: self.max_iterations,
        })
    }

    /// Run one tool call and return the observation text.
    async fn dispatch(&self, call: &ToolCall, trace: &mut TurnTrace) -> String {
        if !self.tools.has(&call.name) {
            self.record(
                trace,
                TraceEvent::Action {
                    tool: call.name.clone(),
                    arguments: call.arguments.clone(),
                },
            );
            warn!(tool = %call.name, id = %call.id, "Model requested unknown tool");
            return format!("Error: Tool {} not found.", call.name);
        }

        let request = match call.decode() {
            Ok(request) => request,
            Err(e) => {
                self.record(
                    trace,
                    TraceEvent::Action {
                        tool: call.name.clone(),
                        arguments: call.arguments.clone(),
                    },
                );
                warn!(tool = %call.name, id = %call.id, error = %e, "Bad tool arguments");
                return format!("Error executing tool: {}", e);
            }
        };

        let args = request.arguments_value();
        self.record(
            trace,
            TraceEvent::Action {
                tool: request.name.clone(),
                arguments: args.to_string(),
            },
        );
        debug!(tool = %request.name, id = %request.id, "Executing tool");

        match self
            .tools
            .execute_with_context(&request.name, args, &self.tool_context)
            .await
        {
            Ok(output) => output,
            Err(e) => format!("Error executing tool: {}", e),
        }
    }

    fn record(&self, trace: &mut TurnTrace, event: TraceEvent) {
        if self.verbose {
            info!("{}", event);
            if let Some(observer) = &self.observer {
                observer(&event);
            }
            trace.push(event);
        } else {
            debug!("{}", event);
        }
    }

    fn keep_trace(&mut self, trace: TurnTrace) {
        self.last_trace = self.verbose.then_some(trace);
    }

    /// The full history, system message first.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Tokens summed over the most recent turn, if the backend reported any.
    pub fn last_usage(&self) -> Option<&Usage> {
        self.last_usage.as_ref()
    }

    /// Trace of the most recent turn. Only kept in verbose mode.
    pub fn last_trace(&self) -> Option<&TurnTrace> {
        self.last_trace.as_ref()
    }
}

/// Ids must be non-empty and unique within a turn. Returns the observation
/// for a call that breaks that, without running it.
fn reject_call_id(id: &str, seen: &mut HashSet<String>) -> Option<String> {
    if id.trim().is_empty() {
        return Some("Error: Tool call has no id.".to_string());
    }
    if !seen.insert(id.to_string()) {
        return Some(format!("Error: Duplicate tool call id '{}'.", id));
    }
    None
}

impl fmt::Debug for AgentLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentLoop")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .field("tools", &self.tools)
            .field("messages", &self.conversation.len())
            .field("max_iterations", &self.max_iterations)
            .field("verbose", &self.verbose)
            .finish()
    }
}
