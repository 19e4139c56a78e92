//! Fills gaps in existing products from the supplier spreadsheet.
//!
//! Only empty fields are written; authored data is never replaced.

use std::path::Path;

use pcat_core::rules::GenericIngredients;
use pcat_core::{Catalog, Field};
use pcat_extract::FactExtractor;

use crate::mapping::{image_url, stored_path};
use crate::spreadsheet::Spreadsheet;

/// Characters of the catalog name used to find the spreadsheet row.
pub const NAME_PREFIX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub product_id: String,
    pub fields: Vec<&'static str>,
}

/// Enriches every product in every product category.
///
/// The row is the first whose name contains the first
/// [`NAME_PREFIX_CHARS`] characters of the product name. Manufacturer, dose
/// and capsule counts, and the label image come from that row. A label file
/// already extracted under `images_dir/product_<n>/` is preferred over the
/// supplier URL and is linked under `images_base_url`. Empty ingredient
/// lists get the generic set for the name.
pub fn enrich_catalog(
    catalog: &mut Catalog,
    sheet: &Spreadsheet,
    extractor: &FactExtractor,
    generic: &GenericIngredients,
    images_dir: &Path,
    images_base_url: &str,
) -> Vec<Enrichment> {
    let mut changes = Vec::new();

    for category in catalog.product_categories_mut() {
        for product in category.products.iter_mut().flatten() {
            let mut fields = Vec::new();
            let prefix: String = product.name().chars().take(NAME_PREFIX_CHARS).collect();

            if let Some(row) = sheet.find_by_name(&prefix) {
                let facts = extractor.extract(&row.product);
                let system = &mut product.system_data;

                if is_blank(&system.manufacturer) {
                    if let Some(manufacturer) = facts.manufacturer {
                        system.manufacturer.set(manufacturer);
                        fields.push("manufacturer");
                    }
                }
                if is_unset(&system.doses_count) {
                    if let Some(doses) = facts.doses {
                        system.doses_count.set(doses);
                        fields.push("doses_count");
                    }
                }
                if is_unset(&system.capsules_count) {
                    if let Some(capsules) = facts.capsules {
                        system.capsules_count.set(capsules);
                        fields.push("capsules_count");
                    }
                }

                let public = &mut product.public_data;
                if is_blank(&public.label_image) && !row.label.is_empty() {
                    let label =
                        label_image(&product.product_id, &row.label, images_dir, images_base_url);
                    public.label_image.set(label);
                    fields.push("label_image");
                }
            } else {
                tracing::debug!(product_id = %product.product_id, "no spreadsheet row");
            }

            if product.public_data.ingredients.as_slice().is_empty() {
                let ingredients = generic.for_name(product.name());
                if !ingredients.is_empty() {
                    product.public_data.ingredients.set(ingredients.to_vec());
                    fields.push("ingredients");
                }
            }

            if !fields.is_empty() {
                tracing::info!(product_id = %product.product_id, fields = ?fields, "product enriched");
                changes.push(Enrichment {
                    product_id: product.product_id.clone(),
                    fields,
                });
            }
        }
    }
    changes
}

/// Local copy of the label when one was extracted, else the supplier URL.
fn label_image(product_id: &str, label_url: &str, images_dir: &Path, images_base_url: &str) -> String {
    let number = product_id.rsplit('-').next().unwrap_or(product_id);
    let file_name = label_url.rsplit('/').next().unwrap_or(label_url);
    if !file_name.is_empty() {
        let product_dir = format!("product_{number}");
        if images_dir.join(&product_dir).join(file_name).is_file() {
            return image_url(images_base_url, &stored_path(&product_dir, file_name));
        }
    }
    label_url.to_string()
}

fn is_blank(text: &Field<String>) -> bool {
    text.as_deref().is_none_or(str::is_empty)
}

fn is_unset(count: &Field<u32>) -> bool {
    count.copied().is_none_or(|c| c == 0)
}

#[cfg(test)]
#[path = "enrich_test.rs"]
mod tests;
