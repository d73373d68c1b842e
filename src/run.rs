//! The generation run: scan posts, pick targets, generate and post-process.
//!
//! ```text
//! scan_posts ─→ select(target) ─→ for each post:
//!                                   exists && no target? ─→ skipped
//!                                   build_prompt → generate ─→ write <slug>.png
//!                                   overlay_logo ┐
//!                                   encode_variants ┴→ soft failures only warn
//! ```
//!
//! Every post ends in exactly one of generated, skipped or failed. A failed
//! post never stops the run; the caller turns the final [`RunSummary`] into
//! the exit code.
//!
//! Progress is reported as [`RunEvent`]s over an optional channel so the CLI
//! can print while the run is in flight.

use crate::config::Settings;
use crate::generation::{GenerationError, GenerationRequest, ImageGenerator};
use crate::imaging::{
    ImagingError, LogoPlacement, Quality, SavedFile, encode_variants, overlay_logo,
    variant_specs,
};
use crate::posts::{Post, ScanError, scan_posts};
use crate::prompt::build_prompt;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that stop the run before any post is processed.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("No post found with slug: {0}")]
    UnknownSlug(String),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// A post that could not be generated. Counted as failed.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Could not write image: {0}")]
    Io(#[from] std::io::Error),
}

/// A post-processing step that failed after the primary image was saved.
#[derive(Error, Debug)]
pub enum SoftFailure {
    #[error("Could not overlay logo: {0}")]
    LogoOverlay(#[source] ImagingError),
    #[error("Could not create WebP versions: {0}")]
    Variants(#[source] ImagingError),
}

/// Progress reported while the run is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    PostStarted { index: usize, title: String },
    Skipped,
    Generating,
    Saved(SavedFile),
    LogoApplied,
    Warning(String),
    Failed(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated: {}, Skipped: {}, Failed: {}",
            self.generated, self.skipped, self.failed
        )
    }
}

/// Generate OG images for every published post, or only for `target`.
///
/// Without a target, posts whose primary image already exists are skipped.
/// A target always regenerates. An unknown target returns
/// [`RunError::UnknownSlug`] before the generator is called.
pub fn run(
    settings: &Settings,
    target: Option<&str>,
    generator: &impl ImageGenerator,
    progress: Option<Sender<RunEvent>>,
) -> Result<RunSummary, RunError> {
    let emit = |event: RunEvent| {
        if let Some(tx) = &progress {
            tx.send(event).ok();
        }
    };

    let posts = scan_posts(&settings.blog_dir(), &settings.og_dir())?;
    let posts = select(posts, target)?;
    info!(posts = posts.len(), target = target.unwrap_or("all"), "starting run");

    let style_reference = load_style_reference(&settings.style_reference());

    let mut summary = RunSummary::default();
    for (i, post) in posts.iter().enumerate() {
        emit(RunEvent::PostStarted {
            index: i + 1,
            title: post.title.clone(),
        });

        if target.is_none() && post.has_output() {
            debug!(slug = %post.slug, "output exists, skipping");
            emit(RunEvent::Skipped);
            summary.skipped += 1;
            continue;
        }

        match generate_post(settings, post, generator, style_reference.as_deref(), &emit) {
            Ok(()) => summary.generated += 1,
            Err(e) => {
                error!(slug = %post.slug, error = %e, "generation failed");
                emit(RunEvent::Failed(e.to_string()));
                summary.failed += 1;
            }
        }
    }

    info!(
        generated = summary.generated,
        skipped = summary.skipped,
        failed = summary.failed,
        "run finished"
    );
    Ok(summary)
}

/// Narrow the post list to `target`, if one was given.
fn select(posts: Vec<Post>, target: Option<&str>) -> Result<Vec<Post>, RunError> {
    let Some(slug) = target else {
        return Ok(posts);
    };
    let selected: Vec<Post> = posts.into_iter().filter(|p| p.slug == slug).collect();
    if selected.is_empty() {
        return Err(RunError::UnknownSlug(slug.to_string()));
    }
    Ok(selected)
}

/// Read the style reference once. Missing is normal; unreadable warns.
fn load_style_reference(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "loaded style reference");
            Some(bytes)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read style reference, sending prompt only");
            None
        }
    }
}

fn generate_post(
    settings: &Settings,
    post: &Post,
    generator: &impl ImageGenerator,
    style_reference: Option<&[u8]>,
    emit: &dyn Fn(RunEvent),
) -> Result<(), PipelineError> {
    let prompt = build_prompt(&post.title, post.imagery_hint.as_deref());

    emit(RunEvent::Generating);
    let bytes = generator.generate(&GenerationRequest {
        prompt: &prompt,
        style_reference,
    })?;

    if let Some(parent) = post.output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&post.output_path, &bytes)?;
    emit(RunEvent::Saved(SavedFile::new(
        &post.output_path,
        bytes.len() as u64,
    )));

    post_process(settings, &post.output_path, emit);
    Ok(())
}

/// Logo then variants. Neither can fail the post.
fn post_process(settings: &Settings, primary: &Path, emit: &dyn Fn(RunEvent)) {
    let soft = |failure: SoftFailure| {
        warn!(path = %primary.display(), "{failure}");
        emit(RunEvent::Warning(failure.to_string()));
    };

    let placement = LogoPlacement::from(&settings.config.logo);
    match overlay_logo(primary, &settings.logo_svg(), placement) {
        Ok(()) => emit(RunEvent::LogoApplied),
        Err(e) => soft(SoftFailure::LogoOverlay(e)),
    }

    let variants = &settings.config.variants;
    match encode_variants(primary, &variant_specs(variants), Quality::new(variants.quality)) {
        Ok(files) => files.into_iter().for_each(|f| emit(RunEvent::Saved(f))),
        Err(e) => soft(SoftFailure::Variants(e)),
    }
}
