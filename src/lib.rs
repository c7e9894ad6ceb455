//! # rulebook-dump
//!
//! Convert a board-game rulebook PDF and its FAQ page into cleaned Markdown,
//! and validate the extraction quality.
//!
//! ## Why this crate?
//!
//! Model-based PDF converters produce markdown that is *mostly* right —
//! and silently wrong in recognisable ways: garbled headings, duplicated
//! figures, pages where the text never made it out, outlines nested twelve
//! levels deep. This crate wraps the converter with the boring-but-necessary
//! plumbing around it: a fixed output layout, deterministic artifact
//! cleanup, spoiler-preserving FAQ conversion, and a metadata validator that
//! says whether an extraction is worth keeping before anyone reads it.
//!
//! ## The four operations
//!
//! ```text
//! extract   PDF ──(external model pipeline)──▶ <name>.md + <name>_meta.json + images/
//! clean     markdown ──(ordered regex rules)──▶ markdown, rewritten only on change
//! faq       spoiler HTML ──(details rewrite + htmd)──▶ markdown
//! validate  *_meta.json ──(heuristics)──▶ warnings + summary + verdict
//! ```
//!
//! Each operation is a stateless batch run: explicit config in, files or a
//! report out. They compose only through the output directory layout.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rulebook_dump::{evaluate, ExtractionMetadata};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let meta = ExtractionMetadata::from_path("dump_output/Rulebook/Rulebook_meta.json")?;
//!     let report = evaluate(&meta);
//!     println!("{}", report.render("Rulebook_meta.json"));
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `rulebook-dump` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! rulebook-dump = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod clean;
pub mod config;
pub mod error;
pub mod extract;
pub mod faq;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod validate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use clean::{clean_directory, clean_markdown, clean_markdown_file};
pub use config::{ExtractConfig, ExtractConfigBuilder, FaqConfig, ValidateConfig};
pub use error::DumpError;
pub use extract::extract_document;
pub use faq::{convert_faq_file, faq_to_markdown, FaqStats};
pub use metadata::{BlockMetadata, ExtractionMetadata, PageStat, TocEntry};
pub use pipeline::layout::ExtractionArtifacts;
pub use pipeline::model::{CommandPipeline, ModelOptions, ModelOutput, ModelPipeline};
pub use report::{evaluate, ExtractionSummary, QualityReport, Verdict};
pub use validate::{discover_metadata, validate_file};
