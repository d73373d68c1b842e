//! Pure calculation functions for logo geometry and variant naming.
//!
//! All functions here are pure and testable without any I/O or images.
//! Percentages use integer math that floors, so a 1200×630 image with the
//! default placement gets a 151px logo inset by 48px and 25px.

use std::path::{Path, PathBuf};

/// Side of the square logo for an image of the given height.
///
/// # Examples
/// ```
/// # use og_images::imaging::calculations::logo_side;
/// assert_eq!(logo_side(630, 24), 151);
/// assert_eq!(logo_side(1024, 24), 245);
/// ```
pub fn logo_side(image_height: u32, height_percent: u32) -> u32 {
    percent_of(image_height, height_percent)
}

/// Top-left corner of a logo anchored to the bottom-right of the canvas.
///
/// The inset is `margin_percent` of the canvas width horizontally and of the
/// canvas height vertically. The result can be negative when the logo and
/// its margin do not fit; compositing clips it.
pub fn logo_origin(canvas: (u32, u32), logo: (u32, u32), margin_percent: u32) -> (i64, i64) {
    let (canvas_w, canvas_h) = canvas;
    let (logo_w, logo_h) = logo;
    let margin_x = percent_of(canvas_w, margin_percent);
    let margin_y = percent_of(canvas_h, margin_percent);
    (
        i64::from(canvas_w) - i64::from(logo_w) - i64::from(margin_x),
        i64::from(canvas_h) - i64::from(logo_h) - i64::from(margin_y),
    )
}

/// WebP path for a variant: `og/post.png` + `-800w` → `og/post-800w.webp`.
pub fn variant_path(primary: &Path, suffix: &str) -> PathBuf {
    let stem = primary
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    primary.with_file_name(format!("{stem}{suffix}.webp"))
}

fn percent_of(value: u32, percent: u32) -> u32 {
    (u64::from(value) * u64::from(percent) / 100) as u32
}
