//! Supplier intake: spreadsheet rows, image archives, new products, and
//! gap-filling for existing ones.

pub mod archives;
pub mod builder;
pub mod enrich;
pub mod error;
pub mod mapping;
pub mod overrides;
pub mod spreadsheet;

pub use archives::{intake_images, ImageIntake, ImageKind};
pub use builder::{add_new_products, AddedProducts};
pub use enrich::{enrich_catalog, Enrichment};
pub use error::IntakeError;
pub use mapping::{ImageMapping, MappingEntry, ProductImages};
pub use overrides::apply_overrides;
pub use spreadsheet::{Spreadsheet, SpreadsheetRow};

#[cfg(test)]
mod test_support;
