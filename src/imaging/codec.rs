//! Decoding and encoding helpers shared by the post-processing steps.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, WebP) | `image::ImageReader` with content sniffing |
//! | Encode → PNG | `image::DynamicImage::save_with_format` |
//! | Encode → lossy WebP | `webp::Encoder` (libwebp) |
//!
//! The API labels its payload with a MIME type we do not trust, and the
//! primary file is always named `.png`, so decoding sniffs the format from
//! the bytes instead of the extension.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Logo not found: {0}")]
    LogoNotFound(PathBuf),
    #[error("Could not render logo: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("Image height {0}px is too small for a logo")]
    LogoTooSmall(u32),
    #[error("WebP encode failed: {0}")]
    Encode(String),
}

/// An artifact written to disk, for progress output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub name: String,
    pub bytes: u64,
}

impl SavedFile {
    pub fn new(path: &Path, bytes: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, bytes }
    }

    /// Describe a file that was just written.
    pub fn from_path(path: &Path) -> Result<Self, ImagingError> {
        Ok(Self::new(path, std::fs::metadata(path)?.len()))
    }

    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

impl fmt::Display for SavedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} KB)", self.name, self.kilobytes())
    }
}

/// Load and decode an image, detecting its format from content.
pub fn load_image(path: &Path) -> Result<DynamicImage, ImagingError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

/// Flatten to opaque RGB and write as PNG, replacing `path`.
pub fn save_opaque_png(img: &DynamicImage, path: &Path) -> Result<(), ImagingError> {
    DynamicImage::ImageRgb8(img.to_rgb8()).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Encode as lossy WebP at `quality` (1–100) and write to `path`.
pub fn save_webp(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), ImagingError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let encoder = webp::Encoder::from_image(&rgb).map_err(|e| ImagingError::Encode(e.to_string()))?;
    let encoded = encoder.encode(quality as f32);
    std::fs::write(path, &*encoded)?;
    Ok(())
}
