//! Parameter types for image post-processing.
//!
//! These structs describe *what* to do, not *how*: [`logo`](super::logo) and
//! [`variants`](super::variants) consume them and do the pixel work.
//!
//! - [`Quality`]: Lossy encoding quality (1–100). Clamped on construction.
//! - [`LogoPlacement`]: Logo size and corner inset, both as percentages.
//! - [`VariantSpec`]: One WebP output: optional target size and file suffix.

use crate::config::{LogoConfig, VariantsConfig};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Where and how large the watermark is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    /// Square logo side as a percentage of the image height.
    pub height_percent: u32,
    /// Inset from the right and bottom edges, as a percentage of width and height.
    pub margin_percent: u32,
}

impl Default for LogoPlacement {
    fn default() -> Self {
        Self::from(&LogoConfig::default())
    }
}

impl From<&LogoConfig> for LogoPlacement {
    fn from(config: &LogoConfig) -> Self {
        Self {
            height_percent: config.height_percent,
            margin_percent: config.margin_percent,
        }
    }
}

/// A single WebP variant of the primary image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    /// Exact output size; `None` keeps the source dimensions.
    pub size: Option<(u32, u32)>,
    /// Inserted between the stem and `.webp`, e.g. `-800w`. Empty for full size.
    pub suffix: String,
}

impl VariantSpec {
    pub fn full() -> Self {
        Self {
            size: None,
            suffix: String::new(),
        }
    }

    /// Downscaled variant named after its width: `800x420` → `-800w`.
    pub fn scaled(width: u32, height: u32) -> Self {
        Self {
            size: Some((width, height)),
            suffix: format!("-{width}w"),
        }
    }
}

/// Full-size, medium and small variants, in that order.
pub fn variant_specs(config: &VariantsConfig) -> Vec<VariantSpec> {
    let [mw, mh] = config.medium;
    let [sw, sh] = config.small;
    vec![
        VariantSpec::full(),
        VariantSpec::scaled(mw, mh),
        VariantSpec::scaled(sw, sh),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_from_default_config() {
        let config = VariantsConfig::default();
        assert_eq!(Quality::new(config.quality).value(), 85);
    }

    #[test]
    fn logo_placement_default_values() {
        let p = LogoPlacement::default();
        assert_eq!(p.height_percent, 24);
        assert_eq!(p.margin_percent, 4);
    }

    #[test]
    fn default_variant_specs() {
        let specs = variant_specs(&VariantsConfig::default());
        assert_eq!(
            specs,
            vec![
                VariantSpec::full(),
                VariantSpec {
                    size: Some((800, 420)),
                    suffix: "-800w".to_string()
                },
                VariantSpec {
                    size: Some((400, 210)),
                    suffix: "-400w".to_string()
                },
            ]
        );
    }
}
