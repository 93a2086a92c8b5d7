//! CLI presentation: text and json formatters per command.

use crate::angle::AngleDescriptor;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::generation::{GenerateOutcome, ProgressUpdate};
use serde_json::json;
use std::path::PathBuf;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}

/// One stderr line per finished pipeline.
pub fn format_progress_line(update: &ProgressUpdate) -> String {
    format!(
        "[{}/{}] {:>3}% {}",
        update.completed, update.total, update.percent, update.angle_name
    )
}

pub fn format_generate_text(outcome: &GenerateOutcome, written: &[PathBuf]) -> String {
    let mut lines = vec![format!("Generated {} image(s):", outcome.results.len())];
    for (index, result) in outcome.results.iter().enumerate() {
        match written.get(index) {
            Some(path) => lines.push(format!(
                "  {}. {} -> {}",
                index + 1,
                result.angle_name,
                path.display()
            )),
            None => lines.push(format!("  {}. {} ({})", index + 1, result.angle_name, result.id)),
        }
    }
    lines.join("\n")
}

pub fn format_generate_json(
    outcome: &GenerateOutcome,
    written: &[PathBuf],
) -> Result<String, ApiError> {
    let results: Vec<_> = outcome
        .results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            json!({
                "id": result.id,
                "angle_name": result.angle_name,
                "mime_type": result.mime_type,
                "path": written.get(index).map(|p| p.display().to_string()),
            })
        })
        .collect();
    to_json(&json!({
        "selected_angles": outcome.selected_angles,
        "results": results,
    }))
}

pub fn format_angles(catalog: &[AngleDescriptor], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(&catalog);
    }
    let width = catalog
        .iter()
        .map(|a| a.prompt_seed.len())
        .max()
        .unwrap_or(0);
    let mut lines = vec![format!("Camera angles ({}):", catalog.len())];
    for (index, angle) in catalog.iter().enumerate() {
        lines.push(format!(
            "  {:>2}. {:<width$}  {}",
            index + 1,
            angle.prompt_seed,
            angle.display_name,
            width = width
        ));
    }
    Ok(lines.join("\n"))
}

pub fn format_config(config: &AppConfig, format: &str) -> Result<String, ApiError> {
    let shown = config.redacted();
    match format {
        "json" => to_json(&shown),
        "toml" => toml::to_string_pretty(&shown)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e))),
        other => Err(ApiError::ConfigError(format!(
            "Invalid format: {} (must be 'toml' or 'json')",
            other
        ))),
    }
}
