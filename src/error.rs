//! Error types for angle generation.

use thiserror::Error;

/// Errors surfaced by selection, intake, the provider client and the fan-out executor.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Requested {requested} images; count must be between {min} and {max}")]
    SelectionPrecondition {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid source image: {0}")]
    InvalidSource(String),

    #[error("Describe failed for angle '{angle}': {source}")]
    DescribeFailed {
        angle: String,
        #[source]
        source: Box<ApiError>,
    },

    #[error("Render failed for angle '{angle}': {source}")]
    RenderFailed {
        angle: String,
        #[source]
        source: Box<ApiError>,
    },

    #[error("Generation failed at slot {index} ('{angle}'): {source}")]
    BatchFailed {
        index: usize,
        angle: String,
        #[source]
        source: Box<ApiError>,
    },

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Image generation failed, no image data received")]
    MissingImage,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// True when the run was rejected before any remote call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ApiError::SelectionPrecondition { .. }
                | ApiError::InvalidSource(_)
                | ApiError::ConfigError(_)
        )
    }

    /// Angle whose pipeline caused this failure, if any.
    pub fn failed_angle(&self) -> Option<&str> {
        match self {
            ApiError::BatchFailed { angle, .. }
            | ApiError::DescribeFailed { angle, .. }
            | ApiError::RenderFailed { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// Innermost error of a pipeline failure chain.
    pub fn root_cause(&self) -> &ApiError {
        match self {
            ApiError::BatchFailed { source, .. }
            | ApiError::DescribeFailed { source, .. }
            | ApiError::RenderFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
