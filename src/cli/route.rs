//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::angle::{validate_count, CAMERA_ANGLES};
use crate::cli::help::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_angles, format_config, format_generate_json, format_generate_text,
    format_progress_line,
};
use crate::config::{AppConfig, ConfigLoader};
use crate::error::ApiError;
use crate::export::save_results;
use crate::generation::{run_generate, GenerateRequest, GenerationExecutor};
use crate::provider::{GeminiClient, ImageModelClient};
use crate::source::SourceImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Runtime context for CLI execution: workspace, loaded config and the model client.
pub struct RunContext {
    workspace_root: PathBuf,
    config: AppConfig,
    client: Option<Arc<dyn ImageModelClient>>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already-loaded config.
    pub fn with_config(workspace_root: PathBuf, config: AppConfig) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(Self {
            workspace_root,
            config,
            client: None,
        })
    }

    /// Use `client` instead of building one from the provider config.
    pub fn with_client(mut self, client: Arc<dyn ImageModelClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        let result = self.execute_inner(command).await;
        match &result {
            Ok(_) => info!(
                command = name,
                duration_ms = started.elapsed().as_millis() as u64,
                "Command completed"
            ),
            Err(e) => error!(
                command = name,
                duration_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Command failed"
            ),
        }
        result
    }

    async fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                image,
                count,
                output,
                no_save,
                format,
            } => {
                self.handle_generate(image, *count, output.as_deref(), *no_save, format)
                    .await
            }
            Commands::Angles { format } => format_angles(&CAMERA_ANGLES, format),
            Commands::Config { format } => format_config(&self.config, format),
        }
    }

    async fn handle_generate(
        &self,
        image: &Path,
        count: Option<usize>,
        output: Option<&Path>,
        no_save: bool,
        format: &str,
    ) -> Result<String, ApiError> {
        if format != "text" && format != "json" {
            return Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                format
            )));
        }

        let source = SourceImage::from_path(&self.resolve(image))?;
        let count = count.unwrap_or(self.config.generation.default_count);
        validate_count(count, CAMERA_ANGLES.len())?;
        let request = GenerateRequest::new(source, count);

        let executor = GenerationExecutor::new(self.client()?);
        let outcome = run_generate(&executor, &CAMERA_ANGLES, &request, |update| {
            eprintln!("{}", format_progress_line(&update));
        })
        .await?;

        let written = if no_save {
            Vec::new()
        } else {
            save_results(&outcome.results, &self.output_dir(output))?
        };

        if format == "json" {
            format_generate_json(&outcome, &written)
        } else {
            Ok(format_generate_text(&outcome, &written))
        }
    }

    fn client(&self) -> Result<Arc<dyn ImageModelClient>, ApiError> {
        match &self.client {
            Some(client) => Ok(Arc::clone(client)),
            None => Ok(Arc::new(GeminiClient::new(&self.config.provider)?)),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    /// `--output`, then `generation.output_dir`, then `angleshot-<timestamp>` in the workspace.
    fn output_dir(&self, output: Option<&Path>) -> PathBuf {
        match output.or(self.config.generation.output_dir.as_deref()) {
            Some(dir) => self.resolve(dir),
            None => self.workspace_root.join(format!(
                "angleshot-{}",
                chrono::Local::now().format("%Y%m%d-%H%M%S")
            )),
        }
    }
}
