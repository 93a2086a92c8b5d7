//! Source image intake: type and size checks for the photo a run re-renders.

use crate::error::ApiError;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Largest accepted source file, in megabytes.
pub const MAX_FILE_SIZE_MB: usize = 10;

const MAX_FILE_SIZE_BYTES: usize = MAX_FILE_SIZE_MB * 1024 * 1024;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SOI: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Accepted source image types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "jpg",
            ImageMime::Png => "png",
        }
    }

    pub fn parse(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageMime::Jpeg),
            "image/png" => Some(ImageMime::Png),
            _ => None,
        }
    }

    /// Detect the type from leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_SIGNATURE) {
            Some(ImageMime::Png)
        } else if bytes.starts_with(JPEG_SOI) {
            Some(ImageMime::Jpeg)
        } else {
            None
        }
    }

    fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageMime::Jpeg),
            "png" => Some(ImageMime::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's photo for one run. Cloning shares the byte buffer.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Arc<[u8]>,
    mime: ImageMime,
}

impl SourceImage {
    /// Wrap already-validated bytes.
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime: ImageMime) -> Self {
        Self {
            bytes: bytes.into(),
            mime,
        }
    }

    /// Validate raw bytes: non-empty, within the size limit, JPEG or PNG by magic bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ApiError> {
        check_size(bytes.len())?;
        let mime = ImageMime::sniff(&bytes).ok_or_else(unsupported_type)?;
        Ok(Self::new(bytes, mime))
    }

    /// Read and validate a file. Magic bytes win; the extension is only a fallback.
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            ApiError::InvalidSource(format!("Cannot read {}: {}", path.display(), e))
        })?;
        check_size(metadata.len() as usize)?;

        let bytes = std::fs::read(path).map_err(|e| {
            ApiError::InvalidSource(format!("Cannot read {}: {}", path.display(), e))
        })?;
        check_size(bytes.len())?;

        let mime = ImageMime::sniff(&bytes)
            .or_else(|| ImageMime::from_extension(path))
            .ok_or_else(unsupported_type)?;
        Ok(Self::new(bytes, mime))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

}

fn check_size(len: usize) -> Result<(), ApiError> {
    if len == 0 {
        return Err(ApiError::InvalidSource("Image file is empty".to_string()));
    }
    if len > MAX_FILE_SIZE_BYTES {
        return Err(ApiError::InvalidSource(format!(
            "Image file cannot exceed {}MB",
            MAX_FILE_SIZE_MB
        )));
    }
    Ok(())
}

fn unsupported_type() -> ApiError {
    ApiError::InvalidSource("Only JPG or PNG files can be used".to_string())
}
