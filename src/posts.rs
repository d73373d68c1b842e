//! Blog post discovery.
//!
//! Lists the markdown files in the blog directory and turns each published
//! one into a [`Post`]:
//!
//! ```text
//! src/content/blog/
//! ├── hello-world.md        → slug "hello-world" → public/og/hello-world.png
//! ├── napkin-sketches.md    → slug "napkin-sketches"
//! └── upcoming.md           → draft: true, excluded
//! ```
//!
//! Only the top level of the directory is scanned. Files are visited in
//! name order so runs are reproducible.

use crate::frontmatter::parse_frontmatter;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read blog directory {0}: {1}")]
    BlogDir(PathBuf, #[source] std::io::Error),
    #[error("Cannot read post {0}: {1}")]
    Post(PathBuf, #[source] std::io::Error),
}

/// A published blog post and the OG image path it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// File stem of the markdown document.
    pub slug: String,
    /// `title` field, or the slug when missing.
    pub title: String,
    /// `description` field, or empty.
    pub description: String,
    /// `ogPrompt` field: custom imagery instructions for this post.
    pub imagery_hint: Option<String>,
    /// Canonical primary image: `<og_dir>/<slug>.png`.
    pub output_path: PathBuf,
}

impl Post {
    /// Whether the primary image from an earlier run is already on disk.
    pub fn has_output(&self) -> bool {
        self.output_path.exists()
    }
}

/// Canonical primary image path for a slug.
pub fn output_path_for(og_dir: &Path, slug: &str) -> PathBuf {
    og_dir.join(format!("{slug}.png"))
}

/// Enumerate the published posts in `blog_dir`.
pub fn scan_posts(blog_dir: &Path, og_dir: &Path) -> Result<Vec<Post>, ScanError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(blog_dir)
        .map_err(|e| ScanError::BlogDir(blog_dir.to_path_buf(), e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "md"))
        .collect();

    md_files.sort();

    let mut posts = Vec::new();
    for path in &md_files {
        let content =
            fs::read_to_string(path).map_err(|e| ScanError::Post(path.clone(), e))?;
        if let Some(post) = post_from_document(path, &content, og_dir) {
            posts.push(post);
        }
    }
    Ok(posts)
}

/// Build a [`Post`] from one document, or `None` when it is a draft.
fn post_from_document(path: &Path, content: &str, og_dir: &Path) -> Option<Post> {
    let mut fm = parse_frontmatter(content);

    if fm
        .get("draft")
        .is_some_and(|d| d.eq_ignore_ascii_case("true"))
    {
        return None;
    }

    let slug = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Some(Post {
        title: fm.remove("title").unwrap_or_else(|| slug.clone()),
        description: fm.remove("description").unwrap_or_default(),
        imagery_hint: fm.remove("ogPrompt").filter(|p| !p.is_empty()),
        output_path: output_path_for(og_dir, &slug),
        slug,
    })
}
