//! Extraction entry point: drive the model pipeline over one PDF.
//!
//! The orchestration is three stages — validate the input, run the external
//! converter, write the output layout. Pipeline failures are logged here at
//! the top level and then propagated, so a converter crash both shows up in
//! the log and fails the process.

use crate::config::ExtractConfig;
use crate::error::DumpError;
use crate::pipeline::input;
use crate::pipeline::layout::{write_outputs, ExtractionArtifacts};
use crate::pipeline::model::{ModelOptions, ModelPipeline};
use tracing::{error, info};

/// Extract one rulebook PDF to markdown, metadata, and images on disk.
///
/// # Errors
/// [`DumpError::NotFound`] / [`DumpError::NotAPdf`] for bad input,
/// [`DumpError::Extraction`] when the external pipeline fails (logged before
/// propagating), and I/O errors from the output layout. Nothing is written
/// unless the converter succeeded.
pub fn extract_document(
    config: &ExtractConfig,
    pipeline: &dyn ModelPipeline,
) -> Result<ExtractionArtifacts, DumpError> {
    info!("Starting extraction: {}", config.pdf_path.display());

    // ── Step 1: Validate input ───────────────────────────────────────────
    let pdf_path = input::resolve_pdf(&config.pdf_path)?;
    let pdf_bytes = std::fs::read(&pdf_path).map_err(|e| DumpError::Io {
        path: pdf_path.clone(),
        source: e,
    })?;

    // ── Step 2: Run the external converter ───────────────────────────────
    let opts = ModelOptions {
        languages: config.languages.clone(),
        max_pages: config.max_pages,
    };
    let output = pipeline.convert(&pdf_bytes, &opts).map_err(|e| {
        error!("Extraction failed for {}: {}", pdf_path.display(), e);
        e
    })?;

    // ── Step 3: Write the output layout ──────────────────────────────────
    let artifacts = write_outputs(
        &config.doc_name(),
        &config.output_dir,
        &output,
        config.extract_images,
    )?;

    info!(
        "Extraction complete: {} ({} image(s))",
        artifacts.doc_dir.display(),
        artifacts.image_count
    );
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ExtractionMetadata;
    use crate::pipeline::model::ModelOutput;
    use std::collections::BTreeMap;

    struct StaticPipeline {
        output: ModelOutput,
    }

    impl ModelPipeline for StaticPipeline {
        fn convert(&self, _pdf: &[u8], _opts: &ModelOptions) -> Result<ModelOutput, DumpError> {
            Ok(self.output.clone())
        }
    }

    struct FailingPipeline;

    impl ModelPipeline for FailingPipeline {
        fn convert(&self, _pdf: &[u8], _opts: &ModelOptions) -> Result<ModelOutput, DumpError> {
            Err(DumpError::Extraction {
                detail: "model ran out of patience".to_string(),
            })
        }
    }

    fn write_pdf(dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("Rulebook.pdf");
        std::fs::write(&path, b"%PDF-1.7 test").unwrap();
        path
    }

    #[test]
    fn successful_extraction_writes_layout() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = write_pdf(dir.path());
        let out = dir.path().join("out");

        let mut images = BTreeMap::new();
        images.insert("img_1.png".to_string(), vec![1, 2, 3]);
        let pipeline = StaticPipeline {
            output: ModelOutput {
                markdown: "# Rulebook\n".to_string(),
                images,
                metadata: ExtractionMetadata::default(),
            },
        };

        let config = ExtractConfig::builder(&pdf, &out).build().unwrap();
        let artifacts = extract_document(&config, &pipeline).unwrap();

        assert!(artifacts.markdown_path.exists());
        assert!(artifacts.metadata_path.exists());
        assert_eq!(artifacts.image_count, 1);
        assert_eq!(
            std::fs::read_to_string(&artifacts.markdown_path).unwrap(),
            "# Rulebook\n"
        );
    }

    #[test]
    fn pipeline_failure_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = write_pdf(dir.path());
        let out = dir.path().join("out");

        let config = ExtractConfig::builder(&pdf, &out).build().unwrap();
        let err = extract_document(&config, &FailingPipeline).unwrap_err();

        assert!(matches!(err, DumpError::Extraction { .. }));
        assert!(!out.exists(), "no partial output on pipeline failure");
    }

    #[test]
    fn missing_pdf_aborts_before_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExtractConfig::builder(dir.path().join("absent.pdf"), dir.path().join("out"))
            .build()
            .unwrap();
        let err = extract_document(&config, &FailingPipeline).unwrap_err();
        assert!(matches!(err, DumpError::NotFound { .. }));
    }
}
