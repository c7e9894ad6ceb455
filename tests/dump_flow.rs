//! Integration tests for the dump workflow: extract → clean → validate,
//! plus the FAQ conversion. Everything runs against temp directories with an
//! in-memory model pipeline — no external converter is involved.

use rulebook_dump::{
    clean_markdown_file, convert_faq_file, discover_metadata, evaluate, extract_document,
    validate_file, BlockMetadata, DumpError, ExtractConfig, ExtractionMetadata, FaqConfig,
    ModelOptions, ModelOutput, ModelPipeline, PageStat, TocEntry, ValidateConfig, Verdict,
};
use std::collections::BTreeMap;
use std::path::Path;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// A model pipeline that returns a canned result and records the options it
/// was called with.
struct CannedPipeline {
    output: ModelOutput,
}

impl ModelPipeline for CannedPipeline {
    fn convert(&self, pdf: &[u8], _opts: &ModelOptions) -> Result<ModelOutput, DumpError> {
        assert!(pdf.starts_with(b"%PDF"), "driver must pass raw PDF bytes");
        Ok(self.output.clone())
    }
}

fn page_stat(page_id: u32, errors: u64, tokens: u64, text_blocks: u64) -> PageStat {
    let mut block_counts = BTreeMap::new();
    block_counts.insert("Text".to_string(), text_blocks);
    PageStat {
        page_id,
        block_metadata: BlockMetadata {
            llm_error_count: errors,
            llm_tokens_used: tokens,
        },
        block_counts,
    }
}

fn sample_metadata() -> ExtractionMetadata {
    ExtractionMetadata {
        table_of_contents: (0..60)
            .map(|i| TocEntry {
                title: format!("Section {}", i + 1),
                heading_level: 1 + (i % 4) as u32,
            })
            .collect(),
        page_stats: vec![
            page_stat(1, 0, 800, 12),
            page_stat(2, 0, 700, 0),
            page_stat(3, 0, 900, 14),
        ],
    }
}

fn write_pdf(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("Rulebook-2025.pdf");
    std::fs::write(&path, b"%PDF-1.7\ntest body").unwrap();
    path
}

// ── Extract → validate round trip ────────────────────────────────────────────

#[test]
fn extracted_metadata_is_discoverable_and_validates_clean() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path());
    let out = dir.path().join("dump_output");

    let pipeline = CannedPipeline {
        output: ModelOutput {
            markdown: "# Rulebook\n\nSetup text.\n".to_string(),
            images: BTreeMap::new(),
            metadata: sample_metadata(),
        },
    };

    let config = ExtractConfig::builder(&pdf, &out).build().unwrap();
    let artifacts = extract_document(&config, &pipeline).unwrap();

    // The validator finds exactly the metadata file the extractor wrote.
    let found = discover_metadata(&ValidateConfig::new(artifacts.doc_dir.clone())).unwrap();
    assert_eq!(found, vec![artifacts.metadata_path.clone()]);

    let report = validate_file(&found[0]).unwrap();
    assert_eq!(report.verdict, Verdict::Good);
    assert_eq!(report.summary.total_pages, 3);
    // Page 2 has zero text blocks but is within the cover-page range.
    assert!(report.page_warnings.is_empty());
}

#[test]
fn extract_writes_images_under_the_document_dir() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path());
    let out = dir.path().join("dump_output");

    let mut images = BTreeMap::new();
    images.insert("img_p3_1.png".to_string(), vec![0x89, 0x50]);
    images.insert("img_p4_1.png".to_string(), vec![0x89, 0x50]);

    let pipeline = CannedPipeline {
        output: ModelOutput {
            markdown: "# Rulebook\n".to_string(),
            images,
            metadata: sample_metadata(),
        },
    };

    let config = ExtractConfig::builder(&pdf, &out).build().unwrap();
    let artifacts = extract_document(&config, &pipeline).unwrap();

    assert_eq!(artifacts.image_count, 2);
    assert!(artifacts.doc_dir.join("images/img_p3_1.png").exists());
    assert!(artifacts
        .doc_dir
        .ends_with("dump_output/Rulebook-2025"));
}

// ── Extract → clean round trip ───────────────────────────────────────────────

#[test]
fn cleaning_extracted_markdown_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path());
    let out = dir.path().join("dump_output");

    let pipeline = CannedPipeline {
        output: ModelOutput {
            markdown: "# Rulebook\n\n\n\nSetup  takes   two minutes.\nO-O-O-O-O\n".to_string(),
            images: BTreeMap::new(),
            metadata: sample_metadata(),
        },
    };

    let config = ExtractConfig::builder(&pdf, &out).build().unwrap();
    let artifacts = extract_document(&config, &pipeline).unwrap();

    assert!(clean_markdown_file(&artifacts.markdown_path).unwrap());
    let cleaned = std::fs::read_to_string(&artifacts.markdown_path).unwrap();
    assert_eq!(cleaned, "# Rulebook\n\nSetup takes two minutes.\n");

    // Cleaning again observes a clean file and skips the write.
    assert!(!clean_markdown_file(&artifacts.markdown_path).unwrap());
}

// ── Validator over a problematic document ────────────────────────────────────

#[test]
fn degraded_extraction_is_flagged() {
    let dir = tempfile::tempdir().unwrap();
    let meta = ExtractionMetadata {
        table_of_contents: vec![],
        page_stats: vec![
            page_stat(3, 2, 12_000, 1),
            page_stat(4, 3, 11_000, 0),
        ],
    };
    let path = dir.path().join("Broken_meta.json");
    std::fs::write(&path, serde_json::to_string_pretty(&meta).unwrap()).unwrap();

    let report = validate_file(&path).unwrap();
    assert_eq!(report.toc_warnings.len(), 1);
    assert_eq!(report.page_warnings.len(), 6);
    assert_eq!(report.summary.total_errors, 5);
    assert_eq!(report.verdict, Verdict::SignificantIssues);

    let rendered = report.render("Broken_meta.json");
    assert!(rendered.contains("No table of contents found"));
    assert!(rendered.contains("consider re-extraction"));
}

#[test]
fn validator_report_matches_pure_evaluation() {
    let meta = sample_metadata();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Book_meta.json");
    std::fs::write(&path, serde_json::to_string(&meta).unwrap()).unwrap();

    let from_file = validate_file(&path).unwrap();
    let direct = evaluate(&meta);
    assert_eq!(from_file.verdict, direct.verdict);
    assert_eq!(from_file.summary, direct.summary);
}

// ── FAQ conversion ───────────────────────────────────────────────────────────

#[test]
fn faq_conversion_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let html_path = dir.path().join("faq.html");
    std::fs::write(
        &html_path,
        concat!(
            "<html><body>",
            "<h1>FAQ</h1>",
            "<p>Q: Can the boss open doors?</p>",
            r#"<span class="hidden">No, bosses never open doors.</span>"#,
            r#"<p>See <a href="https://example.net/errata">the errata</a>.</p>"#,
            r#"<img src="boss.png">"#,
            "</body></html>"
        ),
    )
    .unwrap();

    let output_path = dir.path().join("dump_output/faq.md");
    let config = FaqConfig::new(&html_path, &output_path);
    let stats = convert_faq_file(&config).unwrap();

    let md = std::fs::read_to_string(&output_path).unwrap();
    assert!(md.contains("# FAQ"));
    assert!(md.contains("<details>"));
    assert!(md.contains("<summary>SPOILER</summary>"));
    assert!(md.contains("No, bosses never open doors."));
    assert!(md.contains("[the errata](https://example.net/errata)"));
    assert!(!md.contains("boss.png"));
    assert_eq!(stats.markdown_bytes, md.len());
}
