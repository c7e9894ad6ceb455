//! The external document-conversion model boundary.
//!
//! Turning PDF pages into markdown is delegated entirely to a model-based
//! converter that lives outside this process. The crate only depends on the
//! shape of its result: markdown text, named image payloads, and a metadata
//! object matching [`ExtractionMetadata`]. Everything behind
//! [`ModelPipeline::convert`] — page rendering, model calls, batching — is
//! the converter's business.
//!
//! The trait seam keeps the extractor testable: integration tests drive the
//! driver with an in-memory pipeline and never touch a real converter.

use crate::error::DumpError;
use crate::metadata::ExtractionMetadata;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Options forwarded to the converter.
#[derive(Debug, Clone)]
pub struct ModelOptions {
    /// Document languages, e.g. `["en"]`.
    pub languages: Vec<String>,
    /// Convert only the first N pages when set.
    pub max_pages: Option<usize>,
}

/// Everything the converter produces for one document.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    /// The full markdown text.
    pub markdown: String,
    /// Extracted images, name → bytes, in name order.
    pub images: BTreeMap<String, Vec<u8>>,
    /// Extraction diagnostics matching the validator's schema.
    pub metadata: ExtractionMetadata,
}

/// The external conversion model, as an opaque function.
pub trait ModelPipeline {
    /// Convert a PDF into markdown, images, and metadata.
    ///
    /// # Errors
    /// [`DumpError::Extraction`] for any converter failure. Implementations
    /// must not leave partial output behind.
    fn convert(&self, pdf: &[u8], opts: &ModelOptions) -> Result<ModelOutput, DumpError>;
}

// ── Subprocess implementation ────────────────────────────────────────────

/// JSON envelope the converter command prints on stdout.
#[derive(Debug, Deserialize)]
struct Envelope {
    markdown: String,
    /// Image name → base64-encoded bytes.
    #[serde(default)]
    images: BTreeMap<String, String>,
    #[serde(default)]
    metadata: ExtractionMetadata,
}

/// Runs the converter as a subprocess.
///
/// Contract: the command receives the PDF on stdin plus
/// `--languages <comma-separated>` and (when set) `--max-pages <N>` as
/// arguments, and prints a JSON envelope on stdout:
///
/// ```json
/// {
///   "markdown": "# Rulebook…",
///   "images": { "img_p3_1.png": "<base64>" },
///   "metadata": { "table_of_contents": [], "page_stats": [] }
/// }
/// ```
///
/// A spawn failure, non-zero exit, or malformed envelope all surface as
/// [`DumpError::Extraction`].
#[derive(Debug, Clone)]
pub struct CommandPipeline {
    program: String,
}

impl CommandPipeline {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ModelPipeline for CommandPipeline {
    fn convert(&self, pdf: &[u8], opts: &ModelOptions) -> Result<ModelOutput, DumpError> {
        info!("Invoking converter: {}", self.program);

        let mut cmd = Command::new(&self.program);
        cmd.arg("--languages").arg(opts.languages.join(","));
        if let Some(n) = opts.max_pages {
            cmd.arg("--max-pages").arg(n.to_string());
        }

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DumpError::Extraction {
                detail: format!("failed to spawn '{}': {}", self.program, e),
            })?;

        // Scope the handle so stdin closes and the converter sees EOF.
        {
            let stdin = child.stdin.as_mut().ok_or_else(|| DumpError::Extraction {
                detail: "converter stdin unavailable".to_string(),
            })?;
            stdin.write_all(pdf).map_err(|e| DumpError::Extraction {
                detail: format!("failed to send PDF to converter: {}", e),
            })?;
        }

        let output = child.wait_with_output().map_err(|e| DumpError::Extraction {
            detail: format!("converter did not complete: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DumpError::Extraction {
                detail: format!(
                    "converter exited with {}: {}",
                    output.status,
                    stderr.trim()
                ),
            });
        }

        let envelope: Envelope =
            serde_json::from_slice(&output.stdout).map_err(|e| DumpError::Extraction {
                detail: format!("invalid converter envelope: {}", e),
            })?;

        let mut images = BTreeMap::new();
        for (name, encoded) in envelope.images {
            let bytes = BASE64.decode(&encoded).map_err(|e| DumpError::Extraction {
                detail: format!("image '{}' is not valid base64: {}", name, e),
            })?;
            images.insert(name, bytes);
        }
        debug!(
            "Converter returned {} bytes of markdown, {} image(s)",
            envelope.markdown.len(),
            images.len()
        );

        Ok(ModelOutput {
            markdown: envelope.markdown,
            images,
            metadata: envelope.metadata,
        })
    }
}
