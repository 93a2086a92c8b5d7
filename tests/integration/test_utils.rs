//! Shared test utilities for integration tests
//!
//! A scripted model client: describe echoes its seed, render answers with a fixed
//! one-pixel PNG, and either step can be made to fail for a chosen seed.

use angleshot::error::ApiError;
use angleshot::provider::{ImageModelClient, RenderedImage};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// A 1x1 transparent PNG.
pub const ONE_PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Default)]
pub struct ScriptedClient {
    pub fail_describe_for: Option<&'static str>,
    pub empty_render_for: Option<&'static str>,
    pub render_delay_ms: HashMap<&'static str, u64>,
    pub describe_calls: Mutex<Vec<String>>,
    pub render_calls: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageModelClient for ScriptedClient {
    async fn describe(&self, prompt_seed: &str) -> Result<String, ApiError> {
        self.describe_calls.lock().push(prompt_seed.to_string());
        if self.fail_describe_for == Some(prompt_seed) {
            return Err(ApiError::ProviderRequestFailed(format!(
                "describe unavailable for {}",
                prompt_seed
            )));
        }
        Ok(prompt_seed.to_string())
    }

    async fn render(
        &self,
        _image: &[u8],
        _mime_type: &str,
        prompt: &str,
    ) -> Result<RenderedImage, ApiError> {
        if let Some(delay) = self.render_delay_ms.get(prompt) {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
        }
        self.render_calls.lock().push(prompt.to_string());
        let data = if self.empty_render_for == Some(prompt) {
            Vec::new()
        } else {
            ONE_PIXEL_PNG.to_vec()
        };
        Ok(RenderedImage {
            data,
            mime_type: "image/png".to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}
