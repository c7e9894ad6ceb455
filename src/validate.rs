//! Validation driver: metadata file discovery and per-file evaluation.
//!
//! The report generator itself is pure ([`crate::report::evaluate`]); this
//! module is the thin layer that finds `*_meta.json` files on disk and loads
//! them. Printing stays in the CLI.

use crate::config::ValidateConfig;
use crate::error::DumpError;
use crate::metadata::ExtractionMetadata;
use crate::report::{evaluate, QualityReport};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Suffix identifying extraction metadata files in the output directory.
pub const META_SUFFIX: &str = "_meta.json";

/// List the metadata files in a directory, sorted by name.
///
/// # Errors
/// [`DumpError::NotFound`] when the directory is absent or contains no
/// metadata files — an empty output directory means there is nothing to
/// validate, which the caller should hear about rather than silently
/// succeed on.
pub fn discover_metadata(config: &ValidateConfig) -> Result<Vec<PathBuf>, DumpError> {
    let dir = &config.meta_dir;
    if !dir.is_dir() {
        return Err(DumpError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| DumpError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DumpError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_meta = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(META_SUFFIX));
        if is_meta {
            debug!("Found metadata file: {}", path.display());
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(DumpError::NotFound {
            path: dir.join(format!("*{}", META_SUFFIX)),
        });
    }

    files.sort();
    info!("Discovered {} metadata file(s) in {}", files.len(), dir.display());
    Ok(files)
}

/// Load one metadata file and evaluate it.
pub fn validate_file(path: &Path) -> Result<QualityReport, DumpError> {
    let meta = ExtractionMetadata::from_path(path)?;
    Ok(evaluate(&meta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_not_found() {
        let config = ValidateConfig::new("no/such/dir");
        assert!(matches!(
            discover_metadata(&config),
            Err(DumpError::NotFound { .. })
        ));
    }

    #[test]
    fn discovery_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_meta.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a_meta.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.md"), "x").unwrap();
        std::fs::write(dir.path().join("other.json"), "{}").unwrap();

        let config = ValidateConfig::new(dir.path());
        let files = discover_metadata(&config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a_meta.json", "b_meta.json"]);
    }

    #[test]
    fn empty_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = ValidateConfig::new(dir.path());
        assert!(matches!(
            discover_metadata(&config),
            Err(DumpError::NotFound { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_meta.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            validate_file(&path),
            Err(DumpError::Parse { .. })
        ));
    }
}
