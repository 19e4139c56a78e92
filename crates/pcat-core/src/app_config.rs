use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Paths and knobs shared by every batch job.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// The catalog document every job reads and rewrites.
    pub catalog_path: PathBuf,
    /// YAML file holding the heuristic tables (see [`crate::Rules`]).
    pub rules_path: PathBuf,
    /// Directory scanned for supplier image archives.
    pub products_dir: PathBuf,
    /// Destination root for extracted product images.
    pub images_dir: PathBuf,
    /// Public URL of `images_dir`, either site-relative (`/images/products`)
    /// or absolute. Catalog image links are built from this, never from the
    /// disk path.
    pub images_base_url: String,
    /// Supplier spreadsheet export. Only jobs that read it require it.
    pub spreadsheet_path: Option<PathBuf>,
    pub image_mapping_path: PathBuf,
    pub report_path: PathBuf,
    /// Fixed BGN per EUR rate.
    pub bgn_to_eur_rate: Decimal,
}

impl AppConfig {
    /// Returns the spreadsheet path or an error naming the env var to set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::MissingEnvVar`] when `PCAT_SPREADSHEET_PATH`
    /// was not provided.
    pub fn require_spreadsheet(&self) -> Result<&std::path::Path, crate::ConfigError> {
        self.spreadsheet_path
            .as_deref()
            .ok_or_else(|| crate::ConfigError::MissingEnvVar("PCAT_SPREADSHEET_PATH".to_string()))
    }
}
