//! FAQ conversion: spoiler-marked HTML to markdown.
//!
//! The FAQ page hides answers behind `<span class="hidden">` elements that a
//! stylesheet reveals on hover. A plain HTML→markdown conversion would flatten
//! those spans into visible text and spoil the answers. The conversion here
//! runs in two stages, mirroring the shape of the source page:
//!
//! 1. **Rewrite** — every `span.hidden` is wrapped in a
//!    `<details><summary>SPOILER</summary>…</details>` disclosure. The
//!    rewrite is streaming (`lol_html`), so the rest of the document passes
//!    through byte-for-byte.
//! 2. **Convert** — the whole document goes through `htmd` with a fixed
//!    configuration: links and emphasis preserved, images dropped, no line
//!    wrapping. `details`/`summary` and table tags are re-emitted as inline
//!    HTML — markdown renderers treat them as collapsible disclosures and
//!    verbatim tables respectively.

use crate::config::FaqConfig;
use crate::error::DumpError;
use htmd::{Element, HtmlToMarkdown};
use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use tracing::info;

/// Label shown on every collapsed spoiler.
const SPOILER_LABEL: &str = "SPOILER";

/// Wrap every `span.hidden` element in a collapsible disclosure.
pub fn wrap_hidden_spans(html: &str) -> Result<String, DumpError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("span.hidden", |el| {
                el.before(
                    &format!("<details><summary>{}</summary>", SPOILER_LABEL),
                    ContentType::Html,
                );
                el.after("</details>", ContentType::Html);
                el.remove_and_keep_content();
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| DumpError::Html {
        detail: e.to_string(),
    })
}

/// Emit a tag as inline HTML around its already-converted content.
fn passthrough(tag: &'static str) -> impl Fn(Element) -> Option<String> + Send + Sync + 'static {
    move |el: Element| Some(format!("<{tag}>{}</{tag}>", el.content))
}

/// Convert spoiler-marked FAQ HTML to markdown.
pub fn faq_to_markdown(html: &str) -> Result<String, DumpError> {
    let wrapped = wrap_hidden_spans(html)?;

    let converter = HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "img"])
        .add_handler(vec!["summary"], passthrough("summary"))
        .add_handler(vec!["details"], |el: Element| {
            Some(format!("\n\n<details>{}</details>\n\n", el.content))
        })
        .add_handler(vec!["table"], |el: Element| {
            Some(format!("\n\n<table>{}</table>\n\n", el.content))
        })
        .add_handler(vec!["thead"], passthrough("thead"))
        .add_handler(vec!["tbody"], passthrough("tbody"))
        .add_handler(vec!["tr"], passthrough("tr"))
        .add_handler(vec!["th"], passthrough("th"))
        .add_handler(vec!["td"], passthrough("td"))
        .build();

    converter.convert(&wrapped).map_err(|e| DumpError::Html {
        detail: e.to_string(),
    })
}

/// Byte sizes of the conversion, for the driver's summary line.
#[derive(Debug, Clone, Copy)]
pub struct FaqStats {
    pub original_bytes: usize,
    pub markdown_bytes: usize,
}

impl FaqStats {
    /// Size reduction as a percentage of the original.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.markdown_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}

/// Convert an FAQ HTML file to a markdown file.
///
/// Parent directories of the output path are created as needed.
///
/// # Errors
/// [`DumpError::NotFound`] when the HTML file is absent;
/// [`DumpError::Html`] when the rewrite or conversion fails — in either case
/// nothing is written.
pub fn convert_faq_file(config: &FaqConfig) -> Result<FaqStats, DumpError> {
    let html_path = &config.html_path;
    if !html_path.exists() {
        return Err(DumpError::NotFound {
            path: html_path.to_path_buf(),
        });
    }

    let html = std::fs::read_to_string(html_path).map_err(|e| DumpError::Io {
        path: html_path.to_path_buf(),
        source: e,
    })?;

    let markdown = faq_to_markdown(&html)?;

    if let Some(parent) = config.output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DumpError::OutputWrite {
            path: config.output_path.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(&config.output_path, &markdown).map_err(|e| DumpError::OutputWrite {
        path: config.output_path.to_path_buf(),
        source: e,
    })?;

    info!(
        "Converted FAQ: {} bytes HTML -> {} bytes markdown",
        html.len(),
        markdown.len()
    );

    Ok(FaqStats {
        original_bytes: html.len(),
        markdown_bytes: markdown.len(),
    })
}
