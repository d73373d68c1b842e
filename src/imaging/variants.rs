//! WebP variants of the primary image.
//!
//! Every variant is derived from the primary PNG after the logo is applied,
//! so each one carries the watermark. Scaled variants are resized to their
//! exact target size with Lanczos3; the aspect ratio is not preserved.

use super::calculations::variant_path;
use super::codec::{ImagingError, SavedFile, load_image, save_webp};
use super::params::{Quality, VariantSpec};
use image::imageops::FilterType;
use std::path::Path;
use tracing::debug;

/// Encode every variant next to `primary`.
///
/// Stops at the first failure. Files already written stay on disk.
pub fn encode_variants(
    primary: &Path,
    specs: &[VariantSpec],
    quality: Quality,
) -> Result<Vec<SavedFile>, ImagingError> {
    let source = load_image(primary)?;

    specs
        .iter()
        .map(|spec| {
            let out = variant_path(primary, &spec.suffix);
            match spec.size {
                Some((w, h)) => {
                    let resized = source.resize_exact(w, h, FilterType::Lanczos3);
                    save_webp(&resized, &out, quality.value())?;
                }
                None => save_webp(&source, &out, quality.value())?,
            }
            debug!(path = %out.display(), "encoded variant");
            SavedFile::from_path(&out)
        })
        .collect()
}
