//! Creates catalog products for the configured supplier archives.

use pcat_core::rules::{NewProductTemplate, ProductMapping};
use pcat_core::{Catalog, Field, Product, PublicData, Rules, SystemData};
use pcat_extract::{application_type, FactExtractor};
use serde_json::{Map, Value};

use crate::mapping::{image_url, ImageMapping, ProductImages};
use crate::spreadsheet::{Spreadsheet, SpreadsheetRow};
use crate::IntakeError;

/// Dose count below which one capsule a day is suggested.
const SINGLE_CAPSULE_BELOW_DOSES: u32 = 60;

#[derive(Debug, Default)]
pub struct AddedProducts {
    /// `(category id, product id)` for each product appended.
    pub added: Vec<(String, String)>,
    pub skipped: usize,
}

/// Catalog id for a supplier product id.
#[must_use]
pub fn catalog_product_id(archive_id: &str) -> String {
    format!("prod-{archive_id}")
}

/// Intake advice derived from the dose count.
#[must_use]
pub fn protocol_hint(doses: Option<u32>) -> String {
    let count = match doses {
        Some(d) if d < SINGLE_CAPSULE_BELOW_DOSES => "1",
        _ => "2-3",
    };
    format!("Приемайте {count} капсули дневно с храна.")
}

/// Builds one product from its spreadsheet row and extracted images.
///
/// Image links are `images_base_url` joined with the mapping paths. Facts
/// the name does not give are written as `null`.
#[must_use]
pub fn build_product(
    mapping: &ProductMapping,
    row: &SpreadsheetRow,
    images: &ProductImages,
    images_base_url: &str,
    template: &NewProductTemplate,
    extractor: &FactExtractor,
) -> Product {
    let facts = extractor.extract(&row.product);
    let name = extractor.display_name(&row.product, Some(&mapping.manufacturer));

    let link = |path: Option<&String>| Field::nullable(path.map(|p| image_url(images_base_url, p)));

    let mut system_extra = Map::new();
    system_extra.insert("synergy_products".to_string(), Value::Array(Vec::new()));

    Product {
        product_id: catalog_product_id(&mapping.archive_id),
        public_data: PublicData {
            tagline: template
                .tagline
                .replace("{manufacturer}", &mapping.manufacturer)
                .into(),
            price: extractor.price_or_zero(&row.price).into(),
            description: template.description.replace("{name}", &name).into(),
            image_url: link(images.main.first()),
            label_image: link(images.label.first()),
            effects: template.effects.clone().into(),
            ingredients: Field::Value(Vec::new()),
            faq: Field::Value(Vec::new()),
            variants: Field::Value(Vec::new()),
            name: name.into(),
            ..PublicData::default()
        }
        .into(),
        system_data: SystemData {
            manufacturer: mapping.manufacturer.clone().into(),
            application_type: application_type(&facts).to_string().into(),
            capsules_count: Field::nullable(facts.capsules),
            doses_count: Field::nullable(facts.doses),
            weight_grams: Field::nullable(facts.grams),
            goals: template.goals.clone().into(),
            target_profile: Field::nullable(template.target_profile.clone()),
            protocol_hint: protocol_hint(facts.doses).into(),
            safety_warnings: Field::nullable(template.safety_warnings.clone()),
            inventory: Field::nullable(template.inventory),
            extra: system_extra,
        }
        .into(),
        extra: Map::new(),
    }
}

/// Appends a product for every configured mapping that is not in the
/// catalog yet.
///
/// The spreadsheet row is found by product id, falling back to the
/// configured search term. Mappings with no row or no extracted images are
/// skipped with a warning.
///
/// # Errors
///
/// Returns [`IntakeError::CategoryNotFound`] if a mapping targets a category
/// the catalog does not have. The catalog may already hold earlier additions
/// when this happens, so callers should not save it.
pub fn add_new_products(
    catalog: &mut Catalog,
    rules: &Rules,
    sheet: &Spreadsheet,
    images: &ImageMapping,
    images_base_url: &str,
    extractor: &FactExtractor,
) -> Result<AddedProducts, IntakeError> {
    let mut result = AddedProducts::default();

    for mapping in &rules.product_mappings {
        let archive_id = mapping.archive_id.as_str();
        let Some(row) = sheet
            .find_by_product_id(archive_id)
            .or_else(|| sheet.find_by_name(&mapping.search_term))
        else {
            tracing::warn!(archive_id, search_term = %mapping.search_term, "no spreadsheet row");
            result.skipped += 1;
            continue;
        };
        let Some(entry) = images.get(archive_id).filter(|e| !e.images.is_empty()) else {
            tracing::warn!(archive_id, "no extracted images");
            result.skipped += 1;
            continue;
        };

        let product_id = catalog_product_id(archive_id);
        if catalog.find_product(&product_id).is_some() {
            tracing::info!(product_id = %product_id, "already in catalog");
            result.skipped += 1;
            continue;
        }

        let product = build_product(
            mapping,
            row,
            &entry.images,
            images_base_url,
            &rules.new_product,
            extractor,
        );
        let category = catalog
            .category_mut(&mapping.category)
            .ok_or_else(|| IntakeError::CategoryNotFound(mapping.category.clone()))?;
        tracing::info!(
            product_id = %product_id,
            category = %mapping.category,
            name = %product.name(),
            price = product.public_data.price.copied().unwrap_or_default(),
            "product added"
        );
        category.push_product(product);
        result.added.push((mapping.category.clone(), product_id));
    }
    Ok(result)
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
