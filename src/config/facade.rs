//! Config loader facade: the only way callers build an `AppConfig`.

use crate::config::merge::builder_with_defaults;
use crate::config::sources::{self, global_file, workspace_file};
use crate::config::AppConfig;
use crate::error::ApiError;
use config::File;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load layered configuration: defaults, global file, workspace files, environment.
    pub fn load(workspace_root: &Path) -> Result<AppConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::add_environment(builder);

        let config: AppConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Load from one explicit file; environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = sources::add_environment(builder);

        let config: AppConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
