//! Extraction metadata schema and loader.
//!
//! The model pipeline writes one `<name>_meta.json` per document. The schema
//! here is deliberately explicit: required fields are required, and the one
//! field the pipeline sometimes omits (`llm_tokens_used`) defaults to 0.
//! A file that does not match the schema fails at the load boundary with a
//! descriptive parse error instead of failing deep inside the report
//! generator.
//!
//! The structure is read-only after load: the validator derives a report
//! from it and discards it. Nothing here is persisted back.

use crate::error::DumpError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Per-document extraction metadata, as produced by the model pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Document outline entries, in document order. Absent → empty.
    #[serde(default)]
    pub table_of_contents: Vec<TocEntry>,

    /// Per-page extraction diagnostics, in page order. Absent → empty.
    #[serde(default)]
    pub page_stats: Vec<PageStat>,
}

/// One outline entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading text. Not all pipelines emit it.
    #[serde(default)]
    pub title: String,

    /// Nesting depth, 1-based.
    pub heading_level: u32,
}

/// Extraction diagnostics for a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStat {
    /// Page number, 1-based. Assumed (not enforced) monotonically
    /// increasing and unique within the sequence.
    pub page_id: u32,

    /// Model diagnostics for this page.
    pub block_metadata: BlockMetadata,

    /// Count of content blocks per block-type name, e.g. `"Text"`.
    pub block_counts: BTreeMap<String, u64>,
}

impl PageStat {
    /// Number of `"Text"` blocks detected on this page.
    pub fn text_blocks(&self) -> u64 {
        self.block_counts.get("Text").copied().unwrap_or(0)
    }
}

/// Model-level diagnostics attached to each page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Number of model errors encountered while extracting this page.
    pub llm_error_count: u64,

    /// Tokens the model spent on this page. Missing → 0.
    #[serde(default)]
    pub llm_tokens_used: u64,
}

impl ExtractionMetadata {
    /// Load metadata from a JSON file, failing fast on schema mismatches.
    ///
    /// # Errors
    /// [`DumpError::NotFound`] when the file is absent;
    /// [`DumpError::Parse`] when the JSON is malformed or does not match the
    /// schema. No partial metadata is ever returned.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DumpError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DumpError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|e| DumpError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&raw).map_err(|e| DumpError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }
}
