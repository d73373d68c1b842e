//! Generation prompt for OG images.
//!
//! Every image shares one house style (charcoal background, white and orange
//! `#f48031` palette, chunky brush lettering, napkin-doodle composition). The
//! style reference image sent alongside the prompt carries most of it; the
//! text restates the rules the model tends to drift from, then names the
//! title and the per-post imagery.

/// Imagery instruction used when a post has no `ogPrompt`.
pub const DEFAULT_IMAGERY: &str = "Simple sketchy illustrations relevant to the title";

/// Build the prompt for one post.
///
/// The title is inserted verbatim between double quotes. Quotes or newlines
/// inside it are passed through untouched.
pub fn build_prompt(title: &str, imagery_hint: Option<&str>) -> String {
    let imagery = imagery_hint
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(DEFAULT_IMAGERY);

    format!(
        r#"Create an Open Graph image matching the EXACT style of the reference image I'm providing.

Title for this new image: "{title}"

MATCH THE REFERENCE IMAGE EXACTLY FOR:
- The chunky, bold, playful hand-lettered font style - thick brushy strokes, casual and warm, like the reference image's title text
- The dark charcoal background
- The white and orange (#f48031) color scheme
- The loose, sketchy line quality
- The overall napkin-sketch aesthetic

FONT IS CRITICAL: Use the same chunky, thick, hand-brushed lettering style as the reference image. NOT thin, NOT elegant, NOT serif - chunky casual brush strokes.

SPECIFIC IMAGERY FOR THIS POST:
{imagery}

CRITICAL RULES:
- ONLY include the title text, absolutely NO other words or labels
- Add loose scribbles and sketch lines that bleed RIGHT OFF the edges of the image - very whimsical, like someone was doodling and ran out of paper
- Leave bottom-right corner empty (logo added later)
- Do NOT draw people or faces
- Keep it loose, playful, and whimsical like a quick napkin doodle"#
    )
}
