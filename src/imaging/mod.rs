//! Post-processing of generated images.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Logo raster** | `resvg` + `tiny-skia` |
//! | **Composite** | `image::imageops::overlay` |
//! | **Resize → WebP** | Lanczos3 + `webp::Encoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for logo geometry and variant names (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Codec**: Load/save helpers and [`ImagingError`]
//! - **Logo** / **Variants**: The two steps applied to every primary image

pub mod calculations;
pub mod codec;
pub mod logo;
pub mod params;
pub mod variants;

pub use codec::{ImagingError, SavedFile};
pub use logo::overlay_logo;
pub use params::{LogoPlacement, Quality, VariantSpec, variant_specs};
pub use variants::encode_variants;
