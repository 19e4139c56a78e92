use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::CatalogError;

/// Serializes `value` as pretty JSON (UTF-8, trailing newline) and replaces
/// `path` atomically.
///
/// The bytes go to a temp file in the destination directory, are synced, and
/// the temp file is then renamed over `path`. On any error the temp file is
/// removed when it drops and `path` keeps its previous contents.
///
/// # Errors
///
/// Returns [`CatalogError::Serialize`] if `value` cannot be encoded,
/// [`CatalogError::Io`] for temp-file I/O, and [`CatalogError::Persist`] if
/// the final rename fails.
pub fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    what: &str,
) -> Result<(), CatalogError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| CatalogError::Serialize {
        what: what.to_string(),
        source,
    })?;
    text.push('\n');

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| CatalogError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CatalogError::io(dir, e))?;
    tmp.write_all(text.as_bytes())
        .map_err(|e| CatalogError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| CatalogError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| CatalogError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), bytes = text.len(), what, "wrote file atomically");
    Ok(())
}
