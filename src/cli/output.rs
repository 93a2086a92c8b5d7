//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

pub const GENERATION_FAILED_MESSAGE: &str = "Generation failed. Please try again.";

/// Map domain/service errors to a string for CLI output.
/// Rejections before any remote call keep their reason; a failed batch gets one
/// generic line, with the per-pipeline cause left to the logs.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::BatchFailed { .. } => GENERATION_FAILED_MESSAGE.to_string(),
        other => other.to_string(),
    }
}
