pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod field;
pub mod rules;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    Catalog, Category, Effect, Ingredient, Product, PublicData, SystemData, Variant,
    CURRENT_SCHEMA_VERSION, PRODUCT_CATEGORY,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CatalogError, ConfigError, LegacyRepairError};
pub use field::{Field, Section};
pub use rules::{load_rules, parse_rules, Rules};
pub use store::{
    load_catalog_or_empty, read_catalog, save_catalog, write_json_atomic, LoadedCatalog,
    SourceFormat,
};
