use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("rules validation failed: {0}")]
    Validation(String),
}

/// Why the legacy (bare array + trailing object) repair gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegacyRepairError {
    #[error("array-closing line not found")]
    MissingArrayEnd,

    #[error("array region is not valid JSON after de-indentation: {0}")]
    InvalidArray(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {path}")]
    NotFound { path: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {path} does not match the catalog model: {source}")]
    Invalid {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {path} is neither canonical ({canonical}) nor legacy ({legacy})")]
    Unreadable {
        path: String,
        canonical: String,
        #[source]
        legacy: LegacyRepairError,
    },

    #[error("catalog {path} has schema version {found}; this build supports up to {supported}")]
    UnsupportedSchemaVersion {
        path: String,
        found: u32,
        supported: u32,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("category '{0}' not found")]
    CategoryNotFound(String),
}

impl CatalogError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            CatalogError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            CatalogError::Io {
                path: path.display().to_string(),
                source,
            }
        }
    }
}
