//! Tracing initialisation and structured lifecycle events.
//!
//! [`init_tracing`] configures the global subscriber once per process with an
//! `EnvFilter` and optional JSON formatting. The `emit_*` functions tag run,
//! stage, and bootstrap lifecycle events with stable `event = "..."` fields
//! for log aggregation.

use tracing::{info, warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialise the global tracing subscriber.
///
/// * `json` — when `true`, emit newline-delimited JSON log lines.
/// * `level` — default verbosity when `RUST_LOG` is not set.
///
/// Safe to call more than once; only the first call takes effect (the global
/// subscriber can only be set once per process).
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .ok();
    }
}

/// Emit event: pipeline run started.
pub fn emit_run_started(run_id: &Uuid, stages: usize) {
    info!(event = "run.started", run_id = %run_id, stages = stages);
}

/// Emit event: one stage dispatched to the inference server.
pub fn emit_stage_started(run_id: &Uuid, index: usize, role: &str) {
    info!(event = "stage.started", run_id = %run_id, index = index, role = %role);
}

/// Emit event: one stage completed with its output size.
pub fn emit_stage_finished(run_id: &Uuid, index: usize, role: &str, output_chars: usize) {
    info!(
        event = "stage.finished",
        run_id = %run_id,
        index = index,
        role = %role,
        output_chars = output_chars,
    );
}

/// Emit event: run completed, all stages done.
pub fn emit_run_finished(run_id: &Uuid, duration_ms: u64, stages: usize) {
    info!(
        event = "run.finished",
        run_id = %run_id,
        duration_ms = duration_ms,
        stages = stages,
    );
}

/// Emit event: run aborted at a stage (warning level).
pub fn emit_run_failed(run_id: &Uuid, index: usize, role: &str) {
    warn!(event = "run.failed", run_id = %run_id, index = index, role = %role);
}

/// Emit event: model already present in the server catalog.
pub fn emit_model_ready(endpoint: &str, model: &str) {
    info!(event = "model.ready", endpoint = %endpoint, model = %model);
}

/// Emit event: model pulled onto the server during bootstrap.
pub fn emit_model_pulled(endpoint: &str, model: &str, status: &str) {
    info!(event = "model.pulled", endpoint = %endpoint, model = %model, status = %status);
}
