//! Sequential task pipeline executor.
//!
//! Runs an ordered list of tasks, feeding each stage's output forward as
//! context for the next, and returns the completed run. Strictly sequential:
//! stage `i + 1`'s prompt only exists once stage `i`'s output does, so each
//! inference call is awaited to completion before the next prompt is
//! composed, and the executor never issues two requests at once.
//!
//! There is no branching, no retry, and no reordering. A failed stage aborts
//! the remainder of the run with a stage-attributed error; earlier stage
//! outputs are not surfaced to the caller.

use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::client::InferenceClient;
use crate::domain::{PipelineError, PipelineRun, StageOutput, Task};
use crate::obs::{
    emit_run_failed, emit_run_finished, emit_run_started, emit_stage_finished, emit_stage_started,
};

/// Executes ordered task sequences against an inference client.
///
/// The executor assumes every task's binding has already been through the
/// readiness bootstrap; it does not check readiness itself.
pub struct PipelineExecutor<'a> {
    client: &'a dyn InferenceClient,
}

impl<'a> PipelineExecutor<'a> {
    pub fn new(client: &'a dyn InferenceClient) -> Self {
        PipelineExecutor { client }
    }

    /// Run `tasks` in order and return the completed run.
    ///
    /// The effective prompt for each stage is its description followed by
    /// every prior stage's output in execution order. The run's deliverable
    /// is the final stage's output ([`PipelineRun::final_output`]).
    pub async fn run(&self, tasks: Vec<Task>) -> Result<PipelineRun, PipelineError> {
        if tasks.is_empty() {
            return Err(PipelineError::EmptyPipeline);
        }

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("quill.run", run_id = %run_id);
        self.run_stages(run_id, tasks).instrument(span).await
    }

    async fn run_stages(
        &self,
        run_id: Uuid,
        mut tasks: Vec<Task>,
    ) -> Result<PipelineRun, PipelineError> {
        let started = Instant::now();
        emit_run_started(&run_id, tasks.len());

        let mut context: Vec<StageOutput> = Vec::with_capacity(tasks.len());

        for index in 0..tasks.len() {
            let role = tasks[index].agent.role.clone();
            emit_stage_started(&run_id, index, &role);

            let prompt = compose_prompt(&tasks[index].description, &context);
            let binding = tasks[index].agent.binding.clone();

            let text = match self.client.generate(&binding, &prompt).await {
                Ok(text) => text,
                Err(source) => {
                    emit_run_failed(&run_id, index, &role);
                    return Err(PipelineError::StageFailed {
                        index,
                        role,
                        source,
                    });
                }
            };

            emit_stage_finished(&run_id, index, &role, text.len());
            tasks[index].record_output(text.clone());
            context.push(StageOutput { index, role, text });
        }

        emit_run_finished(&run_id, started.elapsed().as_millis() as u64, tasks.len());

        Ok(PipelineRun {
            run_id,
            tasks,
            context,
        })
    }
}

/// Effective prompt for one stage: the description, then every prior output
/// in execution order, concatenated without separators.
fn compose_prompt(description: &str, context: &[StageOutput]) -> String {
    let mut prompt = String::with_capacity(
        description.len() + context.iter().map(|s| s.text.len()).sum::<usize>(),
    );
    prompt.push_str(description);
    for stage in context {
        prompt.push_str(&stage.text);
    }
    prompt
}
