//! Markdown cleanup: deterministic removal of extraction artifacts.
//!
//! The model pipeline leaves recognisable debris in its markdown output —
//! runs of blank lines where figures were dropped, one specific garbled
//! heading where the OCR pass misread a page-number spread, decorative
//! `O-O-O-O` separators transcribed literally, and duplicated bare image
//! references. This module applies a fixed, ordered list of substitution
//! rules that remove the debris without touching content.
//!
//! ## Rule Order
//!
//! Rules run in a defined order within each pass: structural deletions
//! before whitespace collapsing, and the final-newline normalisation last.
//! The pass repeats until the text stops changing — collapsing blank lines
//! can expose a new adjacent duplicate-image pair, so a single pass is not a
//! fixpoint on its own. Every rule only deletes characters, which bounds the
//! iteration; cleaning already-clean text is a no-op.

use crate::error::DumpError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Apply all cleanup rules until the text reaches a fixpoint.
///
/// Rules (applied in order, per pass):
/// 1. Collapse 3+ consecutive newlines down to 2
/// 2. Strip the known garbled heading line (a page-number OCR artifact)
/// 3. Strip repeated `O-O-O-O-O…` separator artifacts
/// 4. Drop adjacent duplicate bare image reference pairs
/// 5. Collapse runs of 2+ spaces to one
/// 6. Ensure the file ends with exactly one newline
pub fn clean_markdown(input: &str) -> String {
    let mut text = clean_pass(input);
    loop {
        let next = clean_pass(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn clean_pass(input: &str) -> String {
    let s = collapse_blank_lines(input);
    let s = strip_garbled_heading(&s);
    let s = strip_dash_separators(&s);
    let s = drop_duplicate_images(&s);
    let s = collapse_spaces(&s);
    ensure_final_newline(&s)
}

// ── Rule 1: Collapse excessive blank lines ───────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

// ── Rule 2: Strip the garbled heading ────────────────────────────────────────
//
// The 108/109 page spread of the source rulebook comes out of OCR as a bogus
// heading line. The pattern is anchored to that exact artifact so nothing
// legitimate can match.

static RE_GARBLED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# The perverse Edge.*?108 109\s*$").unwrap());

fn strip_garbled_heading(input: &str) -> String {
    RE_GARBLED_HEADING.replace_all(input, "").to_string()
}

// ── Rule 3: Strip repeated dash separators ───────────────────────────────────

static RE_DASH_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"O-O-O-O-O+").unwrap());

fn strip_dash_separators(input: &str) -> String {
    RE_DASH_SEPARATOR.replace_all(input, "").to_string()
}

// ── Rule 4: Drop adjacent duplicate bare image references ────────────────────
//
// The pipeline sometimes emits the same figure twice in a row as bare
// `![](...)` references separated by a blank line. Both carry no caption, so
// the pair collapses to a single newline.

static RE_DUPLICATE_IMAGES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n!\[\]\([^)]+\)\n\n!\[\]\([^)]+\)\n").unwrap());

fn drop_duplicate_images(input: &str) -> String {
    RE_DUPLICATE_IMAGES.replace_all(input, "\n").to_string()
}

// ── Rule 5: Collapse runs of spaces ──────────────────────────────────────────

static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

fn collapse_spaces(input: &str) -> String {
    RE_SPACES.replace_all(input, " ").to_string()
}

// ── Rule 6: Ensure file ends with single newline ─────────────────────────────

fn ensure_final_newline(input: &str) -> String {
    let trimmed = input.trim_end();
    if trimmed.is_empty() {
        String::from("\n")
    } else {
        format!("{}\n", trimmed)
    }
}

// ── File drivers ─────────────────────────────────────────────────────────────

/// Clean a markdown file in place.
///
/// Returns `Ok(true)` when the file was rewritten and `Ok(false)` when the
/// cleaned text was identical to the original — in that case the file is not
/// touched at all.
///
/// # Errors
/// [`DumpError::NotFound`] when the file is absent; I/O errors carry the
/// path.
pub fn clean_markdown_file(path: &Path) -> Result<bool, DumpError> {
    if !path.exists() {
        return Err(DumpError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| DumpError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let cleaned = clean_markdown(&text);
    if cleaned == text {
        debug!("No changes needed for {}", path.display());
        return Ok(false);
    }

    std::fs::write(path, &cleaned).map_err(|e| DumpError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Cleaned {}", path.display());
    Ok(true)
}

/// Clean every `*.md` file directly inside a directory.
///
/// Returns the processed paths with their rewrite flags, sorted by name.
pub fn clean_directory(dir: &Path) -> Result<Vec<(PathBuf, bool)>, DumpError> {
    if !dir.is_dir() {
        return Err(DumpError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| DumpError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DumpError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "md") {
            files.push(path);
        }
    }
    files.sort();

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let changed = clean_markdown_file(&path)?;
        results.push((path, changed));
    }
    Ok(results)
}

// ── Tests ────────────────────────────────────────────────────────────────────
