//! # og-images
//!
//! Generates Open Graph preview images for the posts of a static blog.
//! Each published markdown post gets an AI-drawn illustration from the Gemini
//! image API, stamped with the site logo and exported as a PNG plus three
//! WebP sizes for social cards and thumbnails.
//!
//! # Pipeline
//!
//! ```text
//! src/content/blog/*.md ─→ frontmatter ─→ prompt ─→ Gemini ─→ public/og/<slug>.png
//!                                                               │
//!                                                   logo overlay (bottom-right, white)
//!                                                               │
//!                                     <slug>.webp, <slug>-800w.webp, <slug>-400w.webp
//! ```
//!
//! Posts whose PNG already exists are skipped, so the tool can run on every
//! build and only pay for new posts. Passing a slug regenerates that one post.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `og-images.toml` loading, validation and the [`config::Settings`] bundle |
//! | [`frontmatter`] | Line-based `key: value` header parser |
//! | [`posts`] | Blog directory scan, draft filtering, slug → output path |
//! | [`prompt`] | Fixed prompt template filled with title and imagery hint |
//! | [`generation`] | Gemini wire format, [`generation::ImageGenerator`] trait and HTTP client |
//! | [`imaging`] | Logo rasterization and compositing, WebP variants |
//! | [`run`] | Per-post orchestration, skip logic and the run summary |
//! | [`output`] | CLI output formatting for run progress |
//!
//! # Failure Model
//!
//! A post either generates, is skipped, or fails. Failing to reach the API or
//! to get an image back fails that post only; the run carries on and exits
//! non-zero at the end. Problems after the PNG is written (logo, WebP) are
//! warnings: the post still counts as generated.

pub mod config;
pub mod frontmatter;
pub mod generation;
pub mod imaging;
pub mod output;
pub mod posts;
pub mod prompt;
pub mod run;

#[cfg(test)]
pub(crate) mod test_helpers;
