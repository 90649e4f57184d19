//! Domain models for quill.
//!
//! Canonical definitions for the core entities:
//! - `Agent`: immutable role/goal/persona identity bound to a model
//! - `Task`: one ordered unit of pipeline work
//! - `PipelineRun`: executed tasks plus the accumulated context log

pub mod agent;
pub mod error;
pub mod task;

// Re-export main types and errors
pub use agent::{Agent, ModelBinding, SamplingParams};
pub use error::{ClientError, ConfigError, PipelineError, ReadinessError};
pub use task::{PipelineRun, StageOutput, Task};
