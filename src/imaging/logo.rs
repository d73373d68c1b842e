//! Logo watermark.
//!
//! The site logo is a single-color SVG (black on transparent). It is
//! rasterized with `resvg` to a square sized from the image height, turned
//! white, and alpha-composited into the bottom-right corner of the generated
//! image, which the prompt asks the model to leave empty.

use super::calculations::{logo_origin, logo_side};
use super::codec::{ImagingError, load_image, save_opaque_png};
use super::params::LogoPlacement;
use image::{DynamicImage, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::path::Path;

/// Stamp the logo onto the image at `image_path`, overwriting it as opaque PNG.
///
/// On error the file is left exactly as it was.
pub fn overlay_logo(
    image_path: &Path,
    logo_svg: &Path,
    placement: LogoPlacement,
) -> Result<(), ImagingError> {
    let mut canvas = load_image(image_path)?.to_rgba8();

    let side = logo_side(canvas.height(), placement.height_percent);
    if side == 0 {
        return Err(ImagingError::LogoTooSmall(canvas.height()));
    }

    let mut logo = rasterize_svg(logo_svg, side)?;
    whiten(&mut logo);

    let (x, y) = logo_origin(canvas.dimensions(), logo.dimensions(), placement.margin_percent);
    image::imageops::overlay(&mut canvas, &logo, x, y);

    save_opaque_png(&DynamicImage::ImageRgba8(canvas), image_path)
}

/// Render an SVG file into a `side`×`side` RGBA bitmap.
///
/// The drawing is stretched to fill the square, matching what
/// `rsvg-convert -w N -h N` produces.
pub fn rasterize_svg(svg_path: &Path, side: u32) -> Result<RgbaImage, ImagingError> {
    if !svg_path.is_file() {
        return Err(ImagingError::LogoNotFound(svg_path.to_path_buf()));
    }
    let data = std::fs::read(svg_path)?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())?;

    let mut pixmap = tiny_skia::Pixmap::new(side, side).ok_or(ImagingError::LogoTooSmall(side))?;
    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        side as f32 / size.width(),
        side as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let raw: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(side, side, raw).ok_or(ImagingError::LogoTooSmall(side))
}

/// Paint every visible pixel solid white, keeping its alpha.
pub fn whiten(logo: &mut RgbaImage) {
    for pixel in logo.pixels_mut() {
        let alpha = pixel[3];
        if alpha > 0 {
            *pixel = Rgba([255, 255, 255, alpha]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{write_logo_svg, write_solid_png};

    const DARK: [u8; 3] = [30, 30, 30];

    #[test]
    fn whiten_keeps_alpha() {
        let mut img = RgbaImage::from_vec(
            3,
            1,
            vec![0, 0, 0, 255, 10, 20, 30, 128, 50, 60, 70, 0],
        )
        .unwrap();
        whiten(&mut img);

        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 128]);
        // Fully transparent pixels are left alone
        assert_eq!(img.get_pixel(2, 0).0, [50, 60, 70, 0]);
    }

    #[test]
    fn rasterize_fills_requested_square() {
        let tmp = tempfile::TempDir::new().unwrap();
        let svg = tmp.path().join("logo.svg");
        write_logo_svg(&svg);

        let logo = rasterize_svg(&svg, 48).unwrap();
        assert_eq!(logo.dimensions(), (48, 48));
        // Centre of a filled square is opaque black
        assert_eq!(logo.get_pixel(24, 24).0, [0, 0, 0, 255]);
    }

    #[test]
    fn rasterize_missing_logo_is_error() {
        assert!(matches!(
            rasterize_svg(Path::new("/nonexistent/logo.svg"), 10),
            Err(ImagingError::LogoNotFound(_))
        ));
    }

    #[test]
    fn rasterize_invalid_svg_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let svg = tmp.path().join("broken.svg");
        std::fs::write(&svg, "<svg <<< not xml").unwrap();
        assert!(matches!(rasterize_svg(&svg, 10), Err(ImagingError::Svg(_))));
    }

    #[test]
    fn overlay_places_white_logo_bottom_right() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = tmp.path().join("post.png");
        let svg = tmp.path().join("logo.svg");
        write_solid_png(&image, 200, 100, DARK);
        write_logo_svg(&svg);

        overlay_logo(&image, &svg, LogoPlacement::default()).unwrap();

        // side = 24, origin = (200 - 24 - 8, 100 - 24 - 4) = (168, 72)
        let result = load_image(&image).unwrap().to_rgb8();
        assert_eq!(result.dimensions(), (200, 100));
        assert_eq!(result.get_pixel(180, 84).0, [255, 255, 255]);
        assert_eq!(result.get_pixel(10, 10).0, DARK);
        // Margin strip right of the logo stays untouched
        assert_eq!(result.get_pixel(196, 84).0, DARK);
    }

    #[test]
    fn overlay_failure_leaves_image_untouched() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = tmp.path().join("post.png");
        write_solid_png(&image, 64, 64, DARK);
        let before = std::fs::read(&image).unwrap();

        let result = overlay_logo(
            &image,
            &tmp.path().join("missing.svg"),
            LogoPlacement::default(),
        );

        assert!(result.is_err());
        assert_eq!(std::fs::read(&image).unwrap(), before);
    }

    #[test]
    fn overlay_tiny_image_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let image = tmp.path().join("tiny.png");
        let svg = tmp.path().join("logo.svg");
        write_solid_png(&image, 3, 3, DARK);
        write_logo_svg(&svg);

        assert!(matches!(
            overlay_logo(&image, &svg, LogoPlacement::default()),
            Err(ImagingError::LogoTooSmall(3))
        ));
    }
}
