//! Result export: write generated images to a directory in result order.

use crate::error::ApiError;
use crate::pipeline::PipelineResult;
use crate::source::ImageMime;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "angleshot";

/// File name for the result at `index`: `angleshot-{n}-{angle}.{ext}`, whitespace in the
/// angle name replaced by underscores.
pub fn result_file_name(index: usize, result: &PipelineResult) -> String {
    let angle: String = result
        .angle_name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| !matches!(*c, '/' | '\\'))
        .collect();
    let extension = ImageMime::parse(&result.mime_type)
        .map(|m| m.extension())
        .unwrap_or("png");
    format!("{}-{}-{}.{}", FILE_PREFIX, index + 1, angle, extension)
}

/// Decode and write every result under `dir`, creating it if needed.
pub fn save_results(results: &[PipelineResult], dir: &Path) -> Result<Vec<PathBuf>, ApiError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(results.len());
    for (index, result) in results.iter().enumerate() {
        let path = dir.join(result_file_name(index, result));
        std::fs::write(&path, result.image_bytes()?)?;
        tracing::debug!(path = %path.display(), "Result written");
        written.push(path);
    }
    Ok(written)
}
