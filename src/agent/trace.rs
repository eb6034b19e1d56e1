//! Step-by-step record of a single agent turn.
//!
//! A [`TurnTrace`] is what verbose mode leaves behind: one event per step,
//! thought, tool call, observation and final answer, in the order they
//! happened. Hosts render it with `Display`.

use std::fmt;

use serde::Serialize;

/// Observations longer than this many characters are cut in the trace.
pub const OBSERVATION_PREVIEW_CHARS: usize = 100;

/// One entry in a turn trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A new model round started (1-based).
    Step { iteration: usize },
    /// Text the model produced alongside its decision.
    Thought { text: String },
    /// A tool call about to be dispatched.
    Action { tool: String, arguments: String },
    /// The tool result, already shortened for display.
    Observation { text: String },
    /// The model answered without requesting tools.
    FinalAnswer { text: String },
    /// The turn was cut off by the iteration cap.
    MaxIterations { iterations: usize },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step { iteration } => write!(f, "--- ReAct Step {} ---", iteration),
            Self::Thought { text } => write!(f, "THOUGHT: {}", text),
            Self::Action { tool, arguments } => {
                write!(f, "ACTION: Calling `{}` with {}", tool, arguments)
            }
            Self::Observation { text } => write!(f, "OBSERVATION: {}", text),
            Self::FinalAnswer { text } => write!(f, "FINAL ANSWER: {}", text),
            Self::MaxIterations { iterations } => {
                write!(f, "STOPPED: no final answer after {} steps", iterations)
            }
        }
    }
}

/// Ordered events for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TurnTrace {
    events: Vec<TraceEvent>,
}

impl TurnTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of model rounds the turn took.
    pub fn steps(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Step { .. }))
            .count()
    }

    /// Tool names in the order they were called.
    pub fn actions(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Action { tool, .. } => Some(tool.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for TurnTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            // Blank line before each step, like a section break
            if matches!(event, TraceEvent::Step { .. }) && i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", event)?;
        }
        Ok(())
    }
}
