//! Extraction-quality report generation.
//!
//! ## Why heuristics?
//!
//! The model pipeline never fails loudly on a page it mangled — it produces
//! markdown regardless. What it *does* leave behind is diagnostics: per-page
//! error counts, token usage, block-type counts, and the document outline.
//! This module turns those diagnostics into a deterministic, ordered list of
//! warnings plus a three-tier verdict, so a bad extraction is caught before
//! anyone reads 80 pages of garbled rules.
//!
//! Every check is a quality smell, not a correctness proof: a rulebook with a
//! thin outline may be fine, and a page with few text blocks may simply be
//! art. The thresholds below encode what a typical rulebook extraction looks
//! like when it went well.
//!
//! The generator is pure — it takes [`ExtractionMetadata`] and returns a
//! [`QualityReport`]; file discovery and printing live in
//! [`crate::validate`] and the CLI.

use crate::metadata::{ExtractionMetadata, PageStat};
use std::fmt;

// ── Thresholds ───────────────────────────────────────────────────────────

/// A rulebook outline with fewer entries than this is suspicious.
pub const TOC_MIN_ENTRIES: usize = 50;

/// Heading nesting beyond this depth usually means the outline was misparsed.
pub const TOC_MAX_HEADING_LEVEL: u32 = 6;

/// Content pages with fewer `"Text"` blocks than this likely lost text.
pub const PAGE_MIN_TEXT_BLOCKS: u64 = 5;

/// Pages 1–2 are assumed cover/title pages; the low-text check skips them.
pub const COVER_PAGE_LIMIT: u32 = 2;

/// Token usage above this marks a page the model found unusually complex.
pub const PAGE_HIGH_TOKEN_USAGE: u64 = 10_000;

// ── Report types ─────────────────────────────────────────────────────────

/// Aggregate statistics over all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub total_pages: usize,
    pub total_errors: u64,
    pub total_tokens: u64,
    /// Integer-truncating `total_tokens / total_pages`; 0 for an empty
    /// document.
    pub average_tokens_per_page: u64,
}

/// Three-tier overall quality classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No errors and fewer than 5 warnings.
    Good,
    /// Fewer than 5 errors and fewer than 10 warnings.
    MinorIssues,
    /// Everything else.
    SignificantIssues,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Good => write!(f, "Extraction quality looks good!"),
            Verdict::MinorIssues => write!(f, "Minor issues detected, but mostly acceptable"),
            Verdict::SignificantIssues => {
                write!(f, "Significant issues detected, consider re-extraction")
            }
        }
    }
}

/// The full quality report for one metadata file.
#[derive(Debug, Clone)]
pub struct QualityReport {
    /// Outline warnings, in check order.
    pub toc_warnings: Vec<String>,
    /// Per-page warnings, concatenated in page-sequence order.
    pub page_warnings: Vec<String>,
    pub summary: ExtractionSummary,
    pub verdict: Verdict,
}

impl QualityReport {
    /// Total warning count across TOC and page checks.
    pub fn warning_count(&self) -> usize {
        self.toc_warnings.len() + self.page_warnings.len()
    }
}

// ── Evaluation ───────────────────────────────────────────────────────────

/// Evaluate extraction metadata into a [`QualityReport`].
///
/// Deterministic: warnings appear in check order (TOC first, then pages in
/// sequence order), and the verdict tiers are tested in order with first
/// match winning. Never panics on a schema-valid document.
pub fn evaluate(meta: &ExtractionMetadata) -> QualityReport {
    let toc_warnings = check_toc(meta);

    let mut page_warnings = Vec::new();
    for page in &meta.page_stats {
        check_page(page, &mut page_warnings);
    }

    let summary = summarize(meta);
    let verdict = classify(&summary, toc_warnings.len() + page_warnings.len());

    QualityReport {
        toc_warnings,
        page_warnings,
        summary,
        verdict,
    }
}

/// Outline checks. An empty outline short-circuits: the size and depth
/// checks only make sense when there is an outline to measure.
fn check_toc(meta: &ExtractionMetadata) -> Vec<String> {
    let toc = &meta.table_of_contents;
    if toc.is_empty() {
        return vec!["No table of contents found".to_string()];
    }

    let mut warnings = Vec::new();

    if toc.len() < TOC_MIN_ENTRIES {
        warnings.push(format!(
            "TOC has only {} entries (seems low for rulebook)",
            toc.len()
        ));
    }

    let max_level = toc.iter().map(|e| e.heading_level).max().unwrap_or(0);
    if max_level > TOC_MAX_HEADING_LEVEL {
        warnings.push(format!(
            "TOC has heading levels > {}: max is {}",
            TOC_MAX_HEADING_LEVEL, max_level
        ));
    }

    warnings
}

/// Per-page checks. Each condition fires independently — a single page can
/// emit up to three warnings, and no page suppresses another's.
fn check_page(page: &PageStat, warnings: &mut Vec<String>) {
    let errors = page.block_metadata.llm_error_count;
    if errors > 0 {
        warnings.push(format!("Page {}: {} LLM errors", page.page_id, errors));
    }

    let text_blocks = page.text_blocks();
    if text_blocks < PAGE_MIN_TEXT_BLOCKS && page.page_id > COVER_PAGE_LIMIT {
        warnings.push(format!(
            "Page {}: Only {} text blocks (possible extraction issue)",
            page.page_id, text_blocks
        ));
    }

    let tokens = page.block_metadata.llm_tokens_used;
    if tokens > PAGE_HIGH_TOKEN_USAGE {
        warnings.push(format!(
            "Page {}: High token usage ({}) - complex page",
            page.page_id, tokens
        ));
    }
}

fn summarize(meta: &ExtractionMetadata) -> ExtractionSummary {
    let total_pages = meta.page_stats.len();
    let total_errors: u64 = meta
        .page_stats
        .iter()
        .map(|p| p.block_metadata.llm_error_count)
        .sum();
    let total_tokens: u64 = meta
        .page_stats
        .iter()
        .map(|p| p.block_metadata.llm_tokens_used)
        .sum();

    // Division by zero is a policy here, not an error: an empty document
    // averages to zero.
    let average_tokens_per_page = if total_pages == 0 {
        0
    } else {
        total_tokens / total_pages as u64
    };

    ExtractionSummary {
        total_pages,
        total_errors,
        total_tokens,
        average_tokens_per_page,
    }
}

/// First match wins. The tiers are independently necessary: zero errors with
/// five warnings still drops out of `Good` on warning count alone.
fn classify(summary: &ExtractionSummary, warning_count: usize) -> Verdict {
    if summary.total_errors == 0 && warning_count < 5 {
        Verdict::Good
    } else if summary.total_errors < 5 && warning_count < 10 {
        Verdict::MinorIssues
    } else {
        Verdict::SignificantIssues
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

impl QualityReport {
    /// Render the report as human-readable text.
    ///
    /// `source` names the metadata file the report was derived from.
    pub fn render(&self, source: &str) -> String {
        let mut out = String::with_capacity(512);
        out.push_str(&format!("Validating extraction from {}\n\n", source));

        if !self.toc_warnings.is_empty() {
            out.push_str("Table of Contents Issues:\n");
            for w in &self.toc_warnings {
                out.push_str(&format!("  ⚠ {}\n", w));
            }
            out.push('\n');
        }

        if self.page_warnings.is_empty() {
            out.push_str("✓ No page extraction issues found\n");
        } else {
            out.push_str("Page Extraction Issues:\n");
            for w in &self.page_warnings {
                out.push_str(&format!("  ⚠ {}\n", w));
            }
        }

        out.push_str("\nSummary:\n");
        out.push_str(&format!("  Total pages: {}\n", self.summary.total_pages));
        out.push_str(&format!("  Total LLM errors: {}\n", self.summary.total_errors));
        out.push_str(&format!(
            "  Total tokens used: {}\n",
            group_thousands(self.summary.total_tokens)
        ));
        out.push_str(&format!(
            "  Average tokens/page: {}\n",
            group_thousands(self.summary.average_tokens_per_page)
        ));

        out.push_str("\nOverall Assessment:\n");
        out.push_str(&format!("  {}\n", self.verdict));

        out
    }
}

/// Format an integer with `,` thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// ── Tests ────────────────────────────────────────────────────────────────
