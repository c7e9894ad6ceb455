//! Configuration types for the four dump operations.
//!
//! Every operation takes its input and output locations through an explicit
//! config struct rather than process-wide path conventions. That keeps each
//! operation a pure function of its arguments and makes the file drivers
//! trivially testable against temp directories.
//!
//! The extractor has enough knobs to warrant a builder; the FAQ converter and
//! validator get plain structs.

use crate::error::DumpError;
use std::path::PathBuf;

/// Configuration for a rulebook PDF extraction.
///
/// Built via [`ExtractConfig::builder()`].
///
/// # Example
/// ```rust
/// use rulebook_dump::ExtractConfig;
///
/// let config = ExtractConfig::builder("Rulebook-2025.pdf", "dump_output")
///     .max_pages(40)
///     .language("en")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Path to the source rulebook PDF.
    pub pdf_path: PathBuf,

    /// Directory under which the per-document output directory is created.
    pub output_dir: PathBuf,

    /// Write extracted images to an `images/` subdirectory. Default: true.
    pub extract_images: bool,

    /// Limit extraction to the first N pages. Default: no limit.
    pub max_pages: Option<usize>,

    /// Languages passed to the model pipeline. Default: `["en"]`.
    pub languages: Vec<String>,
}

impl ExtractConfig {
    /// Create a new builder with the two required locations.
    pub fn builder(pdf_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: ExtractConfig {
                pdf_path: pdf_path.into(),
                output_dir: output_dir.into(),
                extract_images: true,
                max_pages: None,
                languages: vec!["en".to_string()],
            },
        }
    }

    /// The document name: the PDF file stem, used to name the output
    /// directory and the files inside it.
    pub fn doc_name(&self) -> String {
        self.pdf_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn extract_images(mut self, v: bool) -> Self {
        self.config.extract_images = v;
        self
    }

    pub fn max_pages(mut self, n: usize) -> Self {
        self.config.max_pages = Some(n);
        self
    }

    /// Replace the language list with a single language.
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.config.languages = vec![lang.into()];
        self
    }

    pub fn languages(mut self, langs: Vec<String>) -> Self {
        self.config.languages = langs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractConfig, DumpError> {
        let c = &self.config;
        if c.pdf_path.as_os_str().is_empty() {
            return Err(DumpError::InvalidConfig("PDF path must not be empty".into()));
        }
        if c.output_dir.as_os_str().is_empty() {
            return Err(DumpError::InvalidConfig(
                "Output directory must not be empty".into(),
            ));
        }
        if c.max_pages == Some(0) {
            return Err(DumpError::InvalidConfig("max_pages must be ≥ 1".into()));
        }
        if c.languages.is_empty() {
            return Err(DumpError::InvalidConfig(
                "At least one language is required".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Input and output locations for the FAQ conversion.
#[derive(Debug, Clone)]
pub struct FaqConfig {
    /// Path to the FAQ HTML file.
    pub html_path: PathBuf,

    /// Path of the markdown file to write. Parent directories are created
    /// as needed.
    pub output_path: PathBuf,
}

impl FaqConfig {
    pub fn new(html_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            html_path: html_path.into(),
            output_path: output_path.into(),
        }
    }
}

/// Location of the metadata files to validate.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    /// Directory scanned for `*_meta.json` files.
    pub meta_dir: PathBuf,
}

impl ValidateConfig {
    pub fn new(meta_dir: impl Into<PathBuf>) -> Self {
        Self {
            meta_dir: meta_dir.into(),
        }
    }
}
