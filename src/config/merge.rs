//! Merge rules: defaults, override order, conflict handling.

use crate::angle::MIN_IMAGES;
use crate::provider::{DEFAULT_BASE_URL, DEFAULT_DESCRIBE_MODEL, DEFAULT_RENDER_MODEL};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("provider.base_url", DEFAULT_BASE_URL)?
        .set_default("provider.describe_model", DEFAULT_DESCRIBE_MODEL)?
        .set_default("provider.render_model", DEFAULT_RENDER_MODEL)?
        .set_default("generation.default_count", MIN_IMAGES as u64)
}
