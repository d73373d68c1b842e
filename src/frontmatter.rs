//! Minimal frontmatter parsing for blog posts.
//!
//! Posts open with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: "Napkin Sketches"
//! description: Drawing on the back of things
//! draft: false
//! ogPrompt: A coffee cup with a pen resting on it
//! ---
//! Body text...
//! ```
//!
//! This is not YAML. Each header line is split at the first `:`
//! into a trimmed key and a trimmed value with surrounding quotes removed.
//! Lines without a `:` are ignored, nested structures are not understood, and
//! no value is coerced into anything but a string. A document without a
//! header yields an empty map.

use std::collections::BTreeMap;

/// Marker line that opens and closes the header block.
const DELIMITER: &str = "---";

/// Parsed header fields, keyed by field name.
pub type Frontmatter = BTreeMap<String, String>;

/// Extract the frontmatter fields from a document.
///
/// The header must start on the very first line and its closing marker must
/// be terminated by a newline. Anything else returns an empty map.
pub fn parse_frontmatter(content: &str) -> Frontmatter {
    header_block(content)
        .map(|block| block.lines().filter_map(parse_line).collect())
        .unwrap_or_default()
}

/// Locate the text between the opening and closing `---` lines.
fn header_block(content: &str) -> Option<&str> {
    let (first, rest) = content.split_once('\n')?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = 0;
    let mut remaining = rest;
    while let Some((line, tail)) = remaining.split_once('\n') {
        if line.trim_end() == DELIMITER {
            return Some(&rest[..offset]);
        }
        offset += line.len() + 1;
        remaining = tail;
    }
    None
}

/// Split one header line into `(key, value)`.
fn parse_line(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let value = value.trim().trim_matches('"').trim_matches('\'');
    Some((key.trim().to_string(), value.to_string()))
}
