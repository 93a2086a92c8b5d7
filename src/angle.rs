//! Camera Angle Catalog
//!
//! Fixed catalog of framing descriptors and the selector that picks which of them a
//! generation run uses. A full-size request returns the catalog verbatim; anything
//! smaller is a uniform random subset drawn without replacement.

use crate::error::ApiError;
use rand::Rng;
use serde::Serialize;

/// Fewest images a run may request.
pub const MIN_IMAGES: usize = 1;

/// Most images a run may request; equals the catalog size.
pub const MAX_IMAGES: usize = 10;

/// One framing descriptor: a label shown to the user and the seed phrase sent to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AngleDescriptor {
    pub display_name: &'static str,
    pub prompt_seed: &'static str,
}

impl AngleDescriptor {
    pub const fn new(display_name: &'static str, prompt_seed: &'static str) -> Self {
        Self {
            display_name,
            prompt_seed,
        }
    }
}

pub const CAMERA_ANGLES: [AngleDescriptor; MAX_IMAGES] = [
    AngleDescriptor::new("클로즈업", "Close-up"),
    AngleDescriptor::new("미디엄 샷", "Medium shot"),
    AngleDescriptor::new("롱 샷 (전신)", "Long shot (full body)"),
    AngleDescriptor::new("아이레벨 샷", "Eye-level shot"),
    AngleDescriptor::new("하이 앵글", "High angle"),
    AngleDescriptor::new("로우 앵글", "Low angle"),
    AngleDescriptor::new("익스트림 클로즈업", "Extreme close-up"),
    AngleDescriptor::new("버드아이 뷰", "Bird's-eye view"),
    AngleDescriptor::new("더치 앵글", "Dutch angle"),
    AngleDescriptor::new("오버 더 숄더 샷", "Over-the-shoulder shot"),
];

/// Check a requested count against the selection bounds for `catalog_len`.
pub fn validate_count(requested: usize, catalog_len: usize) -> Result<(), ApiError> {
    let max = catalog_len.min(MAX_IMAGES);
    if requested < MIN_IMAGES || requested > max {
        return Err(ApiError::SelectionPrecondition {
            requested,
            min: MIN_IMAGES,
            max,
        });
    }
    Ok(())
}

/// Select `n` distinct angles from `catalog` using the thread-local RNG.
pub fn select_angles(catalog: &[AngleDescriptor], n: usize) -> Result<Vec<AngleDescriptor>, ApiError> {
    select_angles_with_rng(catalog, n, &mut rand::rng())
}

/// Select `n` distinct angles from `catalog`.
///
/// `n == catalog.len()` returns the catalog in order without touching `rng`.
/// Otherwise a partial Fisher–Yates shuffle over catalog indices picks the subset;
/// the order of the returned entries is unspecified.
pub fn select_angles_with_rng<R: Rng + ?Sized>(
    catalog: &[AngleDescriptor],
    n: usize,
    rng: &mut R,
) -> Result<Vec<AngleDescriptor>, ApiError> {
    validate_count(n, catalog.len())?;

    if n == catalog.len() {
        return Ok(catalog.to_vec());
    }

    let mut indices: Vec<usize> = (0..catalog.len()).collect();
    for i in 0..n {
        let j = rng.random_range(i..indices.len());
        indices.swap(i, j);
    }

    Ok(indices[..n].iter().map(|&i| catalog[i]).collect())
}
