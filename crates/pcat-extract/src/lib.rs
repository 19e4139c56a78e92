pub mod currency;
pub mod effects;
pub mod error;
pub mod facts;
pub mod validate;

pub use currency::{convert_bgn_to_eur, convert_catalog_prices, PriceConversion, EUR};
pub use effects::{unify_catalog, EffectAudit, EffectUnifier, UnifiedEffect, INFERRED_SOURCE, TOP_EFFECTS};
pub use error::ExtractError;
pub use facts::{
    application_type, archive_product_id, product_id_from_image_url, FactExtractor, ProductFacts,
};
pub use validate::{validate_catalog, validate_product, Issue, ProductIssues, ValidationReport};

#[cfg(test)]
mod test_support;
