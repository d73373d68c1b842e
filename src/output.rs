//! CLI output formatting for a generation run.
//!
//! # Information-First Display
//!
//! Each post leads with its positional index and title; what happened to it
//! follows as indented context lines. File names and sizes appear only for
//! artifacts that were actually written.
//!
//! # Output Format
//!
//! ```text
//! ============================================================
//! OG Image Generator (Gemini)
//! ============================================================
//!
//! 001 Hello World
//!     Skipped (already exists)
//!
//! 002 Napkin Sketches
//!     Generating image...
//!     Saved: napkin-sketches.png (812.4 KB)
//!     Added logo overlay
//!     Saved: napkin-sketches.webp (96.1 KB)
//!     Saved: napkin-sketches-800w.webp (41.7 KB)
//!     Saved: napkin-sketches-400w.webp (14.2 KB)
//!
//! ============================================================
//! Done! Generated: 1, Skipped: 1, Failed: 0
//! ```
//!
//! # Architecture
//!
//! Each piece has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::run::{RunEvent, RunSummary};

const RULE_WIDTH: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn format_banner() -> Vec<String> {
    vec![rule(), "OG Image Generator (Gemini)".to_string(), rule()]
}

pub fn print_banner() {
    for line in format_banner() {
        println!("{}", line);
    }
}

/// Format a single run progress event as display lines.
pub fn format_event(event: &RunEvent) -> Vec<String> {
    match event {
        RunEvent::PostStarted { index, title } => {
            vec![String::new(), format!("{} {}", format_index(*index), title)]
        }
        RunEvent::Skipped => vec![format!("{}Skipped (already exists)", indent(1))],
        RunEvent::Generating => vec![format!("{}Generating image...", indent(1))],
        RunEvent::Saved(file) => vec![format!("{}Saved: {}", indent(1), file)],
        RunEvent::LogoApplied => vec![format!("{}Added logo overlay", indent(1))],
        RunEvent::Warning(msg) => vec![format!("{}Warning: {}", indent(1), msg)],
        RunEvent::Failed(msg) => vec![format!("{}Error: {}", indent(1), msg)],
    }
}

pub fn print_event(event: &RunEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}

pub fn format_summary(summary: &RunSummary) -> Vec<String> {
    vec![String::new(), rule(), format!("Done! {}", summary)]
}

pub fn print_summary(summary: &RunSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
