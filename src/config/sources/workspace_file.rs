//! Per-workspace config files under `<workspace>/config/`.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};

const ENV_NAME_VAR: &str = "ANGLESHOT_ENV";
const DEFAULT_ENV_NAME: &str = "development";

/// Files layered over the global config, lowest precedence first: `config.toml`, then
/// the file named after `ANGLESHOT_ENV` (e.g. `production.toml`).
fn layered_paths(workspace_root: &Path) -> [PathBuf; 2] {
    let config_dir = workspace_root.join("config");
    let env_name =
        std::env::var(ENV_NAME_VAR).unwrap_or_else(|_| DEFAULT_ENV_NAME.to_string());
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ]
}

/// Add whichever of the workspace files exist.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(layered_paths(workspace_root)
        .iter()
        .filter(|path| path.exists())
        .fold(builder, |builder, path| {
            builder.add_source(File::from(path.as_path()).required(false))
        }))
}
