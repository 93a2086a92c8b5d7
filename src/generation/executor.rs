//! Generation executor: fans out one pipeline per selected angle and joins them.
//! Aggregate-or-nothing: every pipeline succeeds and results come back in input order,
//! or the first failure is returned as a single batch failure.

use crate::angle::AngleDescriptor;
use crate::error::ApiError;
use crate::generation::state::{ProgressUpdate, RunState};
use crate::pipeline::{run_pipeline, PipelineResult};
use crate::provider::ImageModelClient;
use crate::source::SourceImage;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Runs a batch of pipelines against an injected model client.
pub struct GenerationExecutor {
    client: Arc<dyn ImageModelClient>,
}

impl GenerationExecutor {
    pub fn new(client: Arc<dyn ImageModelClient>) -> Self {
        Self { client }
    }

    /// Run one pipeline per entry of `selected_angles` concurrently.
    ///
    /// All pipelines are polled from the calling task, so run state is only touched
    /// between polls. `on_progress` fires after every success with a non-decreasing
    /// percentage that hits 100 on the last one. On the first failure the remaining
    /// pipelines are dropped and their results discarded.
    pub async fn generate_all<F>(
        &self,
        source: &SourceImage,
        selected_angles: &[AngleDescriptor],
        mut on_progress: F,
    ) -> Result<Vec<PipelineResult>, ApiError>
    where
        F: FnMut(ProgressUpdate),
    {
        let mut state = RunState::new(selected_angles.to_vec());
        let total = state.total_count();
        if total == 0 {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        info!(
            event = "generation_started",
            provider = self.client.provider_name(),
            total_count = total,
            source_bytes = source.bytes().len(),
            "Starting generation"
        );

        let client = self.client.as_ref();
        let mut pipelines = FuturesUnordered::new();
        for (index, angle) in selected_angles.iter().enumerate() {
            pipelines.push(async move { (index, run_pipeline(client, source, angle).await) });
        }

        while let Some((index, outcome)) = pipelines.next().await {
            let angle_name = state
                .angle(index)
                .map(|a| a.display_name.to_string())
                .unwrap_or_default();

            match outcome {
                Ok(result) => {
                    let update = state.record_success(index, result);
                    info!(
                        event = "pipeline_completed",
                        slot = index,
                        angle = %angle_name,
                        completed_count = update.completed,
                        total_count = update.total,
                        percent = update.percent,
                        "Pipeline completed"
                    );
                    on_progress(update);
                }
                Err(err) => {
                    state.record_failure(index);
                    warn!(
                        event = "pipeline_failed",
                        slot = index,
                        angle = %angle_name,
                        error = %err,
                        "Pipeline failed"
                    );
                    error!(
                        event = "generation_failed",
                        completed_count = state.completed_count(),
                        total_count = total,
                        abandoned = pipelines.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Generation failed"
                    );
                    return Err(ApiError::BatchFailed {
                        index,
                        angle: angle_name,
                        source: Box::new(err),
                    });
                }
            }
        }

        let results = state.into_results().ok_or_else(|| {
            ApiError::ProviderError("Generation finished with unfilled result slots".to_string())
        })?;

        info!(
            event = "generation_completed",
            total_count = total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generation completed"
        );
        Ok(results)
    }
}
