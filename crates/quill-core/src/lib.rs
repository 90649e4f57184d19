//! Quill Core Library
//!
//! Sequential multi-agent content generation against a local
//! Ollama-compatible inference server. Re-exports the pipeline executor, the
//! model readiness bootstrap, and the domain model for programmatic access.

pub mod artifact;
pub mod blog;
pub mod client;
pub mod config;
pub mod domain;
pub mod obs;
pub mod pipeline;
pub mod readiness;

pub use artifact::{derive_filename, write_artifact};

pub use blog::blog_workflow;

pub use client::{InferenceClient, ModelCatalog, OllamaClient};

pub use config::{OllamaConfig, QuillConfig};

pub use domain::{
    Agent, ClientError, ConfigError, ModelBinding, PipelineError, PipelineRun, ReadinessError,
    SamplingParams, StageOutput, Task,
};

pub use obs::init_tracing;

pub use pipeline::PipelineExecutor;

pub use readiness::{ModelReadinessManager, ModelReadinessRecord, ModelStatus};

/// Quill version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
