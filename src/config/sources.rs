//! Configuration sources, lowest precedence first: global file, workspace files, environment.

pub mod global_file;
pub mod workspace_file;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

/// Environment variable prefix; `ANGLESHOT__PROVIDER__API_KEY` sets `provider.api_key`.
pub const ENV_PREFIX: &str = "ANGLESHOT";

/// Add environment overrides to builder.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
