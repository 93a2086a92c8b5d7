//! Pipeline runner: describe then render for a single camera angle.

use crate::angle::AngleDescriptor;
use crate::error::ApiError;
use crate::provider::ImageModelClient;
use crate::source::SourceImage;
use base64::Engine;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// One generated image, labeled with the angle it was rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    pub id: Uuid,
    /// `data:<mime>;base64,<payload>`
    pub image_data: String,
    pub angle_name: String,
    pub mime_type: String,
}

impl PipelineResult {
    pub fn new(image: &[u8], mime_type: &str, angle_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_data: to_data_uri(image, mime_type),
            angle_name: angle_name.to_string(),
            mime_type: mime_type.to_string(),
        }
    }

    /// Decode the data URI back into image bytes.
    pub fn image_bytes(&self) -> Result<Vec<u8>, ApiError> {
        let payload = self
            .image_data
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .ok_or_else(|| ApiError::ProviderError("Result is not a base64 data URI".to_string()))?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ApiError::ProviderError(format!("Invalid image payload: {}", e)))
    }
}

pub fn to_data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Run describe → render for `angle`. Each step is attempted exactly once; a failure in
/// either is tagged with the step and angle and returned to the caller.
pub async fn run_pipeline(
    client: &dyn ImageModelClient,
    source: &SourceImage,
    angle: &AngleDescriptor,
) -> Result<PipelineResult, ApiError> {
    let prompt = client
        .describe(angle.prompt_seed)
        .await
        .map_err(|e| ApiError::DescribeFailed {
            angle: angle.display_name.to_string(),
            source: Box::new(e),
        })?;
    debug!(angle = angle.prompt_seed, prompt = %prompt, "Prompt generated");

    let rendered = client
        .render(source.bytes(), source.mime().as_str(), &prompt)
        .await
        .and_then(|image| {
            if image.data.is_empty() {
                Err(ApiError::MissingImage)
            } else {
                Ok(image)
            }
        })
        .map_err(|e| ApiError::RenderFailed {
            angle: angle.display_name.to_string(),
            source: Box::new(e),
        })?;
    debug!(
        angle = angle.prompt_seed,
        bytes = rendered.data.len(),
        "Image rendered"
    );

    Ok(PipelineResult::new(
        &rendered.data,
        &rendered.mime_type,
        angle.display_name,
    ))
}
