//! Error types for the rulebook-dump library.
//!
//! One flat error enum covers the whole crate: every utility is a single
//! batch operation that either completes or fails outright, so there is no
//! fatal/non-fatal split to model. The taxonomy follows the failure modes of
//! the four operations:
//!
//! * **NotFound** — an input file or directory is absent; the operation
//!   aborts before producing any output.
//! * **Parse / Html** — malformed JSON metadata or an HTML rewrite failure;
//!   surfaced with the offending path or detail, no partial output.
//! * **Extraction** — the external model pipeline failed; logged at the top
//!   level and propagated so the process exits non-zero.
//! * **OutputWrite / Io** — filesystem failures with the path attached.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the rulebook-dump library.
#[derive(Debug, Error)]
pub enum DumpError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file or directory was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    NotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Parse errors ──────────────────────────────────────────────────────
    /// Metadata JSON did not match the expected schema.
    #[error("Failed to parse metadata '{path}': {detail}")]
    Parse { path: PathBuf, detail: String },

    /// The FAQ HTML could not be rewritten or converted.
    #[error("HTML conversion failed: {detail}")]
    Html { detail: String },

    // ── Pipeline errors ───────────────────────────────────────────────────
    /// The external document-conversion model pipeline failed.
    #[error("Extraction pipeline failed: {detail}")]
    Extraction { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Other filesystem failure with the path attached.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
