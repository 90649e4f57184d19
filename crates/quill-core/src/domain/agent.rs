//! Agent and model binding value types.
//!
//! Agents are immutable once constructed and live for the duration of one
//! pipeline run. Several tasks may share one agent, and several agents may
//! share one binding, so both are handed around behind [`Arc`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fixed sampling parameters for one model binding.
///
/// Set once at construction and never mutated mid-run: reproducibility of
/// stage-to-stage comparisons depends on every call using the same values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub seed: i64,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        SamplingParams {
            temperature: 0.0,
            seed: 0,
            top_k: 10,
            top_p: 0.95,
        }
    }
}

/// Identity of an inference target: endpoint, model, and sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBinding {
    /// Base URL of the inference server, e.g. `http://localhost:11434`.
    pub base_url: String,
    /// Model identifier including tag, e.g. `gemma3:1b`.
    pub model: String,
    /// Sampling parameters used for every call against this binding.
    pub params: SamplingParams,
}

impl ModelBinding {
    /// Create a binding with default sampling parameters.
    pub fn new(base_url: &str, model: &str) -> Self {
        ModelBinding {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            params: SamplingParams::default(),
        }
    }

    /// Replace the sampling parameters.
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }
}

/// A fixed role/goal/persona identity used to frame work sent to a model.
///
/// The persona is advisory behavioral framing carried alongside the role; it
/// is not injected into prompts by the executor.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Role label, e.g. "Content Editor".
    pub role: String,
    /// Objective statement for this role.
    pub goal: String,
    /// Free-text behavioral framing.
    pub persona: String,
    /// Inference target shared with other agents in the same run.
    pub binding: Arc<ModelBinding>,
}

impl Agent {
    /// Create an agent bound to a shared model binding.
    pub fn new(role: &str, goal: &str, persona: &str, binding: Arc<ModelBinding>) -> Self {
        Agent {
            role: role.to_string(),
            goal: goal.to_string(),
            persona: persona.to_string(),
            binding,
        }
    }
}
