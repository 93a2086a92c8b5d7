//! Single generate entry point: validate the count, select angles, fan out.
//! CLI and other callers go through this; selection and execution stay in their modules.

use crate::angle::{select_angles, AngleDescriptor};
use crate::error::ApiError;
use crate::generation::executor::GenerationExecutor;
use crate::generation::state::ProgressUpdate;
use crate::pipeline::PipelineResult;
use crate::source::SourceImage;
use serde::Serialize;

/// One run's input: the photo and how many variants to produce.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub source: SourceImage,
    pub count: usize,
}

impl GenerateRequest {
    pub fn new(source: SourceImage, count: usize) -> Self {
        Self { source, count }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutcome {
    pub selected_angles: Vec<AngleDescriptor>,
    pub results: Vec<PipelineResult>,
}

/// Select `request.count` angles from `catalog` and generate one image per angle.
pub async fn run_generate<F>(
    executor: &GenerationExecutor,
    catalog: &[AngleDescriptor],
    request: &GenerateRequest,
    on_progress: F,
) -> Result<GenerateOutcome, ApiError>
where
    F: FnMut(ProgressUpdate),
{
    let selected_angles = select_angles(catalog, request.count)?;
    tracing::debug!(
        angles = ?selected_angles.iter().map(|a| a.prompt_seed).collect::<Vec<_>>(),
        "Angles selected"
    );

    let results = executor
        .generate_all(&request.source, &selected_angles, on_progress)
        .await?;

    Ok(GenerateOutcome {
        selected_angles,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::{CAMERA_ANGLES, MAX_IMAGES};
    use crate::provider::{ImageModelClient, RenderedImage};
    use crate::source::ImageMime;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingClient {
        describe_calls: Mutex<usize>,
    }

    #[async_trait]
    impl ImageModelClient for CountingClient {
        async fn describe(&self, prompt_seed: &str) -> Result<String, ApiError> {
            *self.describe_calls.lock() += 1;
            Ok(prompt_seed.to_string())
        }

        async fn render(
            &self,
            _image: &[u8],
            _mime_type: &str,
            _prompt: &str,
        ) -> Result<RenderedImage, ApiError> {
            Ok(RenderedImage {
                data: vec![1],
                mime_type: "image/png".to_string(),
            })
        }

        fn provider_name(&self) -> &str {
            "counting"
        }
    }

    fn request(count: usize) -> GenerateRequest {
        GenerateRequest::new(SourceImage::new(vec![1u8], ImageMime::Png), count)
    }

    #[tokio::test]
    async fn out_of_range_count_makes_no_remote_calls() {
        let client = Arc::new(CountingClient::default());
        let executor = GenerationExecutor::new(client.clone());
        let err = run_generate(&executor, &CAMERA_ANGLES, &request(0), |_| {})
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(*client.describe_calls.lock(), 0);
    }

    #[tokio::test]
    async fn full_count_uses_catalog_order() {
        let client = Arc::new(CountingClient::default());
        let executor = GenerationExecutor::new(client.clone());
        let outcome = run_generate(&executor, &CAMERA_ANGLES, &request(MAX_IMAGES), |_| {})
            .await
            .unwrap();
        assert_eq!(outcome.selected_angles, CAMERA_ANGLES.to_vec());
        assert_eq!(outcome.results.len(), MAX_IMAGES);
        assert_eq!(*client.describe_calls.lock(), MAX_IMAGES);
    }
}
