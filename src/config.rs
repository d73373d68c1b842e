//! Generator configuration.
//!
//! Handles loading and validating `og-images.toml`. Stock defaults
//! match the blog layout the tool was written for; a config file in the
//! project root overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! blog_dir = "src/content/blog"                          # Markdown posts
//! og_dir = "public/og"                                   # Generated images
//! logo_svg = "public/safari-pinned-tab.svg"              # Watermark logo
//! style_reference = "scripts/assets/og-style-reference.png"
//!
//! [api]
//! endpoint = "https://generativelanguage.googleapis.com/v1beta/models"
//! model = "gemini-3-pro-image-preview"
//! timeout_secs = 60
//!
//! [logo]
//! height_percent = 24       # Logo side as % of image height
//! margin_percent = 4        # Inset from the bottom-right corner
//!
//! [variants]
//! quality = 85              # WebP quality (1-100)
//! medium = [800, 420]
//! small = [400, 210]
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Credential
//!
//! The API key never lives in the config file. It is read from the
//! `GEMINI_API_KEY` environment variable (a `.env` file is loaded by `main`
//! before this happens) and stored in [`Settings`] next to the parsed config.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the optional config file in the project root.
pub const CONFIG_FILE: &str = "og-images.toml";

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("GEMINI_API_KEY not found in environment or .env file")]
    MissingApiKey,
}

/// Generator configuration loaded from `og-images.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Input and output locations, relative to the project root.
    pub paths: PathsConfig,
    /// Image generation endpoint settings.
    pub api: ApiConfig,
    /// Watermark size and placement.
    pub logo: LogoConfig,
    /// WebP variant sizes and quality.
    pub variants: VariantsConfig,
}

impl GeneratorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logo.height_percent == 0 || self.logo.height_percent > 100 {
            return Err(ConfigError::Validation(
                "logo.height_percent must be 1-100".into(),
            ));
        }
        if self.logo.margin_percent > 49 {
            return Err(ConfigError::Validation(
                "logo.margin_percent must be 0-49".into(),
            ));
        }
        if self.variants.quality == 0 || self.variants.quality > 100 {
            return Err(ConfigError::Validation(
                "variants.quality must be 1-100".into(),
            ));
        }
        if self.variants.medium.contains(&0) || self.variants.small.contains(&0) {
            return Err(ConfigError::Validation(
                "variants dimensions must be non-zero".into(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.api.model.trim().is_empty() {
            return Err(ConfigError::Validation("api.model must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub blog_dir: PathBuf,
    pub og_dir: PathBuf,
    pub logo_svg: PathBuf,
    pub style_reference: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            blog_dir: "src/content/blog".into(),
            og_dir: "public/og".into(),
            logo_svg: "public/safari-pinned-tab.svg".into(),
            style_reference: "scripts/assets/og-style-reference.png".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the models collection; `/<model>:generateContent` is appended.
    pub endpoint: String,
    pub model: String,
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Full URL of the `generateContent` method for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-3-pro-image-preview".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    /// Side of the square logo as a percentage of the image height.
    pub height_percent: u32,
    /// Inset from the right/bottom edges as a percentage of width/height.
    pub margin_percent: u32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            height_percent: 24,
            margin_percent: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantsConfig {
    pub quality: u32,
    /// `[width, height]` of the medium variant.
    pub medium: [u32; 2],
    /// `[width, height]` of the small variant.
    pub small: [u32; 2],
}

impl Default for VariantsConfig {
    fn default() -> Self {
        Self {
            quality: 85,
            medium: [800, 420],
            small: [400, 210],
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from the project root.
///
/// A missing `og-images.toml` yields the stock defaults. Keys absent from the
/// file keep their defaults through `#[serde(default)]` on every section.
pub fn load_config(root: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        GeneratorConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Everything a run needs: project root, parsed config and the credential.
///
/// Built once in `main` and passed by reference to every stage.
#[derive(Debug, Clone)]
pub struct Settings {
    pub root: PathBuf,
    pub config: GeneratorConfig,
    pub api_key: String,
}

impl Settings {
    pub fn new(root: impl Into<PathBuf>, config: GeneratorConfig, api_key: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            config,
            api_key: api_key.into(),
        }
    }

    /// Read the credential from the environment, then load the config file.
    ///
    /// The credential is checked first so a missing key aborts before any
    /// file is touched.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let api_key = api_key_from(std::env::var(API_KEY_VAR).ok())?;
        let config = load_config(root)?;
        Ok(Self::new(root, config, api_key))
    }

    pub fn blog_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.blog_dir)
    }

    pub fn og_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.og_dir)
    }

    pub fn logo_svg(&self) -> PathBuf {
        self.root.join(&self.config.paths.logo_svg)
    }

    pub fn style_reference(&self) -> PathBuf {
        self.root.join(&self.config.paths.style_reference)
    }
}

/// Accept a credential only when it is present and non-blank.
fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingApiKey)
}
