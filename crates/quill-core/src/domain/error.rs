//! Error taxonomy for quill.
//!
//! Low-level transport failures are never swallowed; each layer wraps them
//! with the failing endpoint or stage so a run can be diagnosed without
//! re-running it.

use thiserror::Error;

/// Required settings missing or unreadable. Surfaced before any I/O.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("failed to read config file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A single inference call failed at the transport or protocol level.
///
/// Recoverable by the caller in principle; the pipeline executor treats it
/// as stage-fatal.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("model binding is incomplete: missing {0}")]
    IncompleteBinding(&'static str),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Bootstrap failures. Both variants are fatal: readiness cannot be skipped,
/// or the executor would fail deep inside a multi-stage run with a less
/// diagnosable error.
#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("inference server unreachable at {endpoint}: {source}")]
    EndpointUnreachable {
        endpoint: String,
        #[source]
        source: ClientError,
    },

    #[error("model '{model}' is missing and could not be pulled: {source}")]
    ModelUnavailable {
        model: String,
        #[source]
        source: ClientError,
    },
}

/// Pipeline execution failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline has no tasks")]
    EmptyPipeline,

    #[error("stage {index} ({role}) failed: {source}")]
    StageFailed {
        index: usize,
        role: String,
        #[source]
        source: ClientError,
    },
}
