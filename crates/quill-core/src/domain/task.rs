//! Tasks and pipeline run records.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::agent::Agent;

/// One ordered unit of pipeline work bound to exactly one agent.
///
/// Tasks are constructed before a run and executed exactly once; the only
/// mutation a task ever sees is receiving its result string.
#[derive(Debug, Clone)]
pub struct Task {
    /// Instruction text. The executor appends accumulated context to it when
    /// composing the effective prompt.
    pub description: String,
    /// Human-readable contract describing what a valid result looks like.
    /// Advisory only; never mechanically validated.
    pub expected_output: String,
    /// The owning agent.
    pub agent: Arc<Agent>,
    output: Option<String>,
}

impl Task {
    /// Create a task owned by `agent`.
    pub fn new(description: &str, expected_output: &str, agent: Arc<Agent>) -> Self {
        Task {
            description: description.to_string(),
            expected_output: expected_output.to_string(),
            agent,
            output: None,
        }
    }

    /// The result recorded for this task, if it has executed.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Record the task's result. A task executes exactly once.
    pub(crate) fn record_output(&mut self, text: String) {
        debug_assert!(self.output.is_none(), "task executed twice");
        self.output = Some(text);
    }
}

/// Output of one completed stage, tagged with the producing task's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    /// 0-based position of the producing task.
    pub index: usize,
    /// Role label of the producing agent.
    pub role: String,
    /// The completion text, verbatim.
    pub text: String,
}

/// A completed pipeline run: the executed tasks plus the ordered context log.
///
/// The context handed to task `i` during the run was the concatenation, in
/// order, of the outputs of tasks `0..i`. The run is plain data; nothing is
/// retained once the caller drops it.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub tasks: Vec<Task>,
    pub context: Vec<StageOutput>,
}

impl PipelineRun {
    /// The run's deliverable: the final stage's output text.
    pub fn final_output(&self) -> &str {
        self.context.last().map(|s| s.text.as_str()).unwrap_or_default()
    }
}
