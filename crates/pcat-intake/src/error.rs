use std::path::Path;

use pcat_core::CatalogError;
use pcat_extract::ExtractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read spreadsheet {path}: {source}")]
    Spreadsheet {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("spreadsheet {path} has no worksheet")]
    NoWorksheet { path: String },

    #[error("spreadsheet {source_name} has no '{column}' column")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },

    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("image mapping {path} is not valid: {source}")]
    MappingParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("target category '{0}' not found in catalog")]
    CategoryNotFound(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl IntakeError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        IntakeError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
