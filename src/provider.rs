//! Image Model Provider
//!
//! The two remote operations a pipeline consumes, behind one injected trait: `describe`
//! invents a scene prompt for a camera angle and `render` re-renders the source photo
//! from that prompt. `GeminiClient` implements both against the Generative Language
//! REST API; tests substitute their own implementations.

use crate::error::ApiError;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_DESCRIBE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_RENDER_MODEL: &str = "gemini-2.5-flash-image";

/// Environment variables consulted, in order, when no API key is configured.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const FALLBACK_IMAGE_MIME: &str = "image/png";

/// Image bytes returned by `render`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Remote generative-model capability used by the pipeline runner.
#[async_trait]
pub trait ImageModelClient: Send + Sync {
    /// Generate a free-text scene prompt for the given framing phrase.
    async fn describe(&self, prompt_seed: &str) -> Result<String, ApiError>;

    /// Re-render `image` according to `prompt`.
    async fn render(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<RenderedImage, ApiError>;

    fn provider_name(&self) -> &str;
}

/// Instruction sent to the text model for one camera angle.
pub fn describe_instruction(prompt_seed: &str) -> String {
    format!(
        "Based on the camera angle \"{angle}\", create a short, creative prompt for an AI image \
         generator to modify a user's photo. The prompt must describe a completely new and random \
         pose, facial expression, and emotion. The style should be photorealistic. For example: \
         \"A photorealistic image of the person with a joyful laugh, head tilted back, seen from \
         a {angle}.\" Only return the final prompt text.",
        angle = prompt_seed
    )
}

/// Provider connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; falls back to `GEMINI_API_KEY`, then `API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_describe_model")]
    pub describe_model: String,

    #[serde(default = "default_render_model")]
    pub render_model: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_describe_model() -> String {
    DEFAULT_DESCRIBE_MODEL.to_string()
}

fn default_render_model() -> String {
    DEFAULT_RENDER_MODEL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            describe_model: default_describe_model(),
            render_model: default_render_model(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.describe_model.trim().is_empty() {
            return Err("describe_model cannot be empty".to_string());
        }
        if self.render_model.trim().is_empty() {
            return Err("render_model cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("base_url must be an http(s) URL, got '{}'", self.base_url));
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Configured key, or the first non-empty key from the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .filter_map(|name| std::env::var(name).ok())
                    .find(|k| !k.trim().is_empty())
            })
    }
}

// Generative Language API request/response structures
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter())
            .into_iter()
            .flatten()
    }
}

// Helper function to map HTTP errors to ApiError
fn map_http_error(error: reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        status_error(status.as_u16(), error.to_string())
    } else if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn status_error(status: u16, detail: String) -> ApiError {
    match status {
        401 | 403 => ApiError::ProviderAuthFailed(format!("Authentication failed: {}", detail)),
        429 => ApiError::ProviderRateLimit(format!("Rate limit exceeded: {}", detail)),
        404 => ApiError::ProviderModelNotFound(format!("Model not found: {}", detail)),
        _ => ApiError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, detail
        )),
    }
}

/// Gemini client over the Generative Language REST API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    describe_model: String,
    render_model: String,
}

impl GeminiClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ApiError> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            ApiError::ConfigError(format!(
                "No API key configured. Set provider.api_key or one of: {}",
                API_KEY_ENV_VARS.join(", ")
            ))
        })?;

        let client = Client::builder()
            .no_proxy()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            describe_model: config.describe_model.clone(),
            render_model: config.render_model.clone(),
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!(model, url = %url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ImageModelClient for GeminiClient {
    async fn describe(&self, prompt_seed: &str) -> Result<String, ApiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(describe_instruction(prompt_seed)),
                    ..Default::default()
                }],
            }],
            generation_config: None,
        };

        let response = self.generate_content(&self.describe_model, &request).await?;
        let text: String = response
            .parts()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::ProviderError("No text in response".to_string()));
        }
        Ok(text.to_string())
    }

    async fn render(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<RenderedImage, ApiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: Some(mime_type.to_string()),
                            data: base64::engine::general_purpose::STANDARD.encode(image),
                        }),
                        ..Default::default()
                    },
                    Part {
                        text: Some(prompt.to_string()),
                        ..Default::default()
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            }),
        };

        let response = self.generate_content(&self.render_model, &request).await?;
        let inline = response
            .parts()
            .find_map(|p| p.inline_data.as_ref())
            .ok_or(ApiError::MissingImage)?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| ApiError::ProviderError(format!("Invalid image payload: {}", e)))?;
        if data.is_empty() {
            return Err(ApiError::MissingImage);
        }

        Ok(RenderedImage {
            data,
            mime_type: inline
                .mime_type
                .clone()
                .unwrap_or_else(|| FALLBACK_IMAGE_MIME.to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
