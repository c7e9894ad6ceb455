//! Input validation: confirm a user-supplied path is a readable PDF.
//!
//! The magic-byte check runs before the model pipeline so callers get a
//! meaningful error for a mis-typed path or a renamed text file, rather than
//! whatever the external converter produces when fed garbage.

use crate::error::DumpError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate a local PDF path: existence, read permission, `%PDF` magic bytes.
pub fn resolve_pdf(path: &Path) -> Result<PathBuf, DumpError> {
    if !path.exists() {
        return Err(DumpError::NotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(DumpError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DumpError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(DumpError::NotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Resolved PDF: {}", path.display());
    Ok(path.to_path_buf())
}
