//! On-disk output layout for an extracted document.
//!
//! Everything for one document lands under `<output_dir>/<doc_name>/`:
//!
//! ```text
//! dump_output/Rulebook-2025/
//! ├── Rulebook-2025.md
//! ├── Rulebook-2025_meta.json
//! └── images/            (only when images were extracted)
//!     └── img_p3_1.png
//! ```
//!
//! The `_meta.json` suffix is what the validator discovers later; the two
//! utilities only meet through this naming convention.

use crate::error::DumpError;
use crate::pipeline::model::ModelOutput;
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths written for one extracted document.
#[derive(Debug, Clone)]
pub struct ExtractionArtifacts {
    /// The per-document directory.
    pub doc_dir: PathBuf,
    pub markdown_path: PathBuf,
    pub metadata_path: PathBuf,
    /// Number of image files written.
    pub image_count: usize,
}

/// Write a converter result to disk under the fixed layout.
pub fn write_outputs(
    doc_name: &str,
    output_dir: &Path,
    output: &ModelOutput,
    extract_images: bool,
) -> Result<ExtractionArtifacts, DumpError> {
    let doc_dir = output_dir.join(doc_name);
    std::fs::create_dir_all(&doc_dir).map_err(|e| DumpError::OutputWrite {
        path: doc_dir.clone(),
        source: e,
    })?;

    let markdown_path = doc_dir.join(format!("{}.md", doc_name));
    std::fs::write(&markdown_path, &output.markdown).map_err(|e| DumpError::OutputWrite {
        path: markdown_path.clone(),
        source: e,
    })?;
    info!("Saved markdown: {}", markdown_path.display());

    let metadata_path = doc_dir.join(format!("{}_meta.json", doc_name));
    let json = serde_json::to_string_pretty(&output.metadata).map_err(|e| DumpError::Parse {
        path: metadata_path.clone(),
        detail: e.to_string(),
    })?;
    std::fs::write(&metadata_path, json).map_err(|e| DumpError::OutputWrite {
        path: metadata_path.clone(),
        source: e,
    })?;
    info!("Saved metadata: {}", metadata_path.display());

    let mut image_count = 0;
    if extract_images && !output.images.is_empty() {
        let img_dir = doc_dir.join("images");
        std::fs::create_dir_all(&img_dir).map_err(|e| DumpError::OutputWrite {
            path: img_dir.clone(),
            source: e,
        })?;
        for (name, bytes) in &output.images {
            let img_path = img_dir.join(name);
            std::fs::write(&img_path, bytes).map_err(|e| DumpError::OutputWrite {
                path: img_path.clone(),
                source: e,
            })?;
            image_count += 1;
        }
        info!("Saved {} image(s) to {}", image_count, img_dir.display());
    }

    Ok(ExtractionArtifacts {
        doc_dir,
        markdown_path,
        metadata_path,
        image_count,
    })
}
