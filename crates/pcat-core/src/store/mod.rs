//! Reading and writing the catalog document.
//!
//! The canonical shape is a single object with a `categories` array. Files
//! produced by the old maintenance writer (a bare array followed by a
//! loosely appended footer) are still readable through [`legacy`], but
//! nothing in this crate writes that shape.

mod legacy;
mod write;

use std::path::Path;

use serde_json::Value;

use crate::catalog::{Catalog, Category, CURRENT_SCHEMA_VERSION};
use crate::error::CatalogError;

pub use write::write_json_atomic;

/// Which on-disk shape a catalog was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Canonical,
    Legacy,
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub format: SourceFormat,
}

/// Reads a catalog, accepting the canonical shape or the legacy shape.
///
/// A missing `schema_version` is read as version 1 and upgraded in memory.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] / [`CatalogError::Io`] when the file
/// cannot be read, [`CatalogError::UnsupportedSchemaVersion`] for documents
/// from a newer writer, [`CatalogError::Invalid`] for a JSON object that does
/// not match the model, and [`CatalogError::Unreadable`] when the text is
/// neither valid JSON nor repairable legacy output.
pub fn read_catalog(path: &Path) -> Result<LoadedCatalog, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    parse_catalog(&text, path)
}

/// Best-effort variant of [`read_catalog`]: any failure is logged and an
/// empty catalog is returned.
#[must_use]
pub fn load_catalog_or_empty(path: &Path) -> Catalog {
    match read_catalog(path) {
        Ok(loaded) => loaded.catalog,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "catalog unreadable; continuing with an empty catalog"
            );
            Catalog::default()
        }
    }
}

/// Writes `catalog` in the canonical shape, replacing `path` atomically.
///
/// # Errors
///
/// Returns [`CatalogError`] if serialization or the atomic replace fails;
/// the previous file is left untouched in that case.
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    write_json_atomic(path, catalog, "catalog")?;
    tracing::info!(
        path = %path.display(),
        categories = catalog.categories.len(),
        products = catalog.product_count(),
        "catalog saved"
    );
    Ok(())
}

pub(crate) fn parse_catalog(text: &str, path: &Path) -> Result<LoadedCatalog, CatalogError> {
    let display = || path.display().to_string();

    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(json_err) => {
            let catalog = legacy::repair(text).map_err(|legacy| CatalogError::Unreadable {
                path: display(),
                canonical: json_err.to_string(),
                legacy,
            })?;
            tracing::warn!(
                path = %path.display(),
                categories = catalog.categories.len(),
                has_footer = catalog.footer.is_some(),
                "read legacy catalog layout; the next save rewrites it in canonical form"
            );
            return Ok(LoadedCatalog {
                catalog,
                format: SourceFormat::Legacy,
            });
        }
    };

    if let Value::Object(obj) = &value {
        let found = obj
            .get("schema_version")
            .and_then(Value::as_u64)
            .unwrap_or(u64::from(CURRENT_SCHEMA_VERSION));
        if found > u64::from(CURRENT_SCHEMA_VERSION) {
            return Err(CatalogError::UnsupportedSchemaVersion {
                path: display(),
                found: u32::try_from(found).unwrap_or(u32::MAX),
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
    }

    match value {
        Value::Object(_) => {
            let mut catalog: Catalog =
                serde_json::from_value(value).map_err(|source| CatalogError::Invalid {
                    path: display(),
                    source,
                })?;
            catalog.schema_version = CURRENT_SCHEMA_VERSION;
            Ok(LoadedCatalog {
                catalog,
                format: SourceFormat::Canonical,
            })
        }
        // A bare array that happens to be valid JSON: categories without a footer.
        Value::Array(_) => {
            let categories: Vec<Category> =
                serde_json::from_value(value).map_err(|source| CatalogError::Invalid {
                    path: display(),
                    source,
                })?;
            Ok(LoadedCatalog {
                catalog: Catalog {
                    categories,
                    ..Catalog::default()
                },
                format: SourceFormat::Legacy,
            })
        }
        other => Err(CatalogError::Invalid {
            path: display(),
            source: <serde_json::Error as serde::de::Error>::custom(format!(
                "expected an object or array at the top level, found {}",
                json_kind(&other)
            )),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
