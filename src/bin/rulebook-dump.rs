//! CLI binary for rulebook-dump.
//!
//! A thin shim over the library crate that maps subcommands to config
//! structs and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rulebook_dump::{
    clean_directory, clean_markdown_file, convert_faq_file, discover_metadata, extract_document,
    validate_file, CommandPipeline, ExtractConfig, FaqConfig, ValidateConfig,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract a rulebook PDF (writes dump_output/<name>/)
  rulebook-dump extract Rulebook-2025.pdf --converter marker-convert

  # First 20 pages only, no images
  rulebook-dump extract --max-pages 20 --no-images Rulebook-2025.pdf --converter marker-convert

  # Clean extraction artifacts from the generated markdown
  rulebook-dump clean dump_output/Rulebook-2025/

  # Convert the FAQ page, preserving spoilers
  rulebook-dump faq rulebook-faq.html -o dump_output/faq.md

  # Validate extraction quality
  rulebook-dump validate dump_output/Rulebook-2025/

CONVERTER CONTRACT:
  The extract subcommand drives an external model-based converter command.
  It receives the PDF on stdin plus --languages and optional --max-pages
  arguments, and must print a JSON envelope on stdout:
    {"markdown": "...", "images": {"name.png": "<base64>"}, "metadata": {...}}

ENVIRONMENT VARIABLES:
  RULEBOOK_CONVERTER   Converter command for the extract subcommand
  RUST_LOG             Override log filtering (tracing-subscriber EnvFilter)
"#;

/// Rulebook PDF/FAQ to Markdown conversion and extraction-quality validation.
#[derive(Parser, Debug)]
#[command(
    name = "rulebook-dump",
    version,
    about = "Convert rulebook PDFs and FAQ pages to cleaned Markdown, and validate extraction quality",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract a rulebook PDF via the external model converter
    Extract {
        /// Path to the rulebook PDF
        pdf: PathBuf,

        /// Directory under which the per-document output directory is created
        #[arg(short, long, default_value = "dump_output")]
        output: PathBuf,

        /// Converter command implementing the envelope contract
        #[arg(long, env = "RULEBOOK_CONVERTER")]
        converter: String,

        /// Document languages, comma separated
        #[arg(long, default_value = "en")]
        languages: String,

        /// Convert only the first N pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Do not write extracted images
        #[arg(long)]
        no_images: bool,
    },

    /// Remove extraction artifacts from markdown (file or directory)
    Clean {
        /// Markdown file, or a directory whose *.md files are cleaned
        path: PathBuf,
    },

    /// Convert a spoiler-marked FAQ HTML page to markdown
    Faq {
        /// Path to the FAQ HTML file
        html: PathBuf,

        /// Markdown file to write
        #[arg(short, long, default_value = "dump_output/faq.md")]
        output: PathBuf,
    },

    /// Validate extraction metadata and print a quality report
    Validate {
        /// Directory containing *_meta.json files
        #[arg(default_value = "dump_output")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            pdf,
            output,
            converter,
            languages,
            max_pages,
            no_images,
        } => run_extract(pdf, output, converter, languages, max_pages, no_images, cli.quiet),
        Commands::Clean { path } => run_clean(path, cli.quiet),
        Commands::Faq { html, output } => run_faq(html, output, cli.quiet),
        Commands::Validate { dir } => run_validate(dir),
    }
}

fn run_extract(
    pdf: PathBuf,
    output: PathBuf,
    converter: String,
    languages: String,
    max_pages: Option<usize>,
    no_images: bool,
    quiet: bool,
) -> Result<()> {
    let langs: Vec<String> = languages
        .split(',')
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    let mut builder = ExtractConfig::builder(&pdf, &output)
        .extract_images(!no_images)
        .languages(langs);
    if let Some(n) = max_pages {
        builder = builder.max_pages(n);
    }
    let config = builder.build().context("Invalid configuration")?;

    let pipeline = CommandPipeline::new(converter);
    let artifacts = extract_document(&config, &pipeline).context("Extraction failed")?;

    if !quiet {
        println!("{} Saved markdown: {}", green("✓"), artifacts.markdown_path.display());
        println!("{} Saved metadata: {}", green("✓"), artifacts.metadata_path.display());
        if artifacts.image_count > 0 {
            println!(
                "{} Saved {} image(s) to {}",
                green("✓"),
                artifacts.image_count,
                artifacts.doc_dir.join("images").display()
            );
        }
        println!(
            "\n{} Extraction complete: {}",
            green("✔"),
            bold(&artifacts.doc_dir.display().to_string())
        );
    }
    Ok(())
}

fn run_clean(path: PathBuf, quiet: bool) -> Result<()> {
    let results: Vec<(PathBuf, bool)> = if path.is_dir() {
        clean_directory(&path).context("Cleanup failed")?
    } else {
        let changed = clean_markdown_file(&path).context("Cleanup failed")?;
        vec![(path, changed)]
    };

    if !quiet {
        for (file, changed) in &results {
            if *changed {
                println!("{} Cleaned {}", green("✓"), file.display());
            } else {
                println!("{} No changes needed for {}", dim("·"), file.display());
            }
        }
    }
    Ok(())
}

fn run_faq(html: PathBuf, output: PathBuf, quiet: bool) -> Result<()> {
    let config = FaqConfig::new(html, &output);
    let stats = convert_faq_file(&config).context("FAQ conversion failed")?;

    if !quiet {
        println!("{} Converted FAQ to markdown", green("✓"));
        println!("  Original: {} bytes", stats.original_bytes);
        println!("  Markdown: {} bytes", stats.markdown_bytes);
        println!("  Reduction: {:.1}%", stats.reduction_percent());
        println!("  Output: {}", output.display());
    }
    Ok(())
}

fn run_validate(dir: PathBuf) -> Result<()> {
    let config = ValidateConfig::new(&dir);
    let files = discover_metadata(&config).context("Metadata discovery failed")?;

    for (i, path) in files.iter().enumerate() {
        if i > 0 {
            println!("{}", dim(&"=".repeat(80)));
        }
        let report = validate_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        print!("{}", report.render(&source));

        if report.warning_count() > 0 {
            eprintln!(
                "{} {} warning(s) for {}",
                red("⚠"),
                report.warning_count(),
                source
            );
        }
    }
    Ok(())
}
