//! Completeness checks for catalog products.

use std::fmt;

use chrono::{DateTime, Utc};
use pcat_core::rules::FlagshipRule;
use pcat_core::{Catalog, Product};
use serde::Serialize;

/// Shortest description accepted, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 50;
/// Shortest protocol hint accepted, in characters.
pub const MIN_PROTOCOL_HINT_CHARS: usize = 10;

/// A missing or unusable field. Variants are declared in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Issue {
    Description,
    Price,
    Manufacturer,
    CapsuleCount,
    PowderWeight,
    DoseCount,
    Ingredients,
    ProtocolHint,
    MainImage,
    LabelImage,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Issue::Description => "Липсва подробно общо описание (минимум 50 символа)",
            Issue::Price => "Липсва цена или цената е невалидна",
            Issue::Manufacturer => "Липсва производител",
            Issue::CapsuleCount => "Липсва брой капсули/таблетки",
            Issue::PowderWeight => "Липсва грамаж на прах",
            Issue::DoseCount => "Липсва брой дози",
            Issue::Ingredients => "Липсва състав (ingredients)",
            Issue::ProtocolHint => "Липсват препоръки за прием",
            Issue::MainImage => "Липсва основна снимка",
            Issue::LabelImage => "Липсва снимка на етикета",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductIssues {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    pub total_products: usize,
    pub products_with_issues: usize,
    pub issues: Vec<ProductIssues>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.products_with_issues == 0
    }
}

/// Issues for one non-flagship product, in reporting order.
#[must_use]
pub fn validate_product(product: &Product) -> Vec<Issue> {
    let public = &product.public_data;
    let system = &product.system_data;
    let mut issues = Vec::new();

    if char_len(public.description.as_deref()) < MIN_DESCRIPTION_CHARS {
        issues.push(Issue::Description);
    }
    if !public.price.copied().is_some_and(|p| p > 0.0) {
        issues.push(Issue::Price);
    }
    if is_blank(system.manufacturer.as_deref()) {
        issues.push(Issue::Manufacturer);
    }

    let application = system.application_type.as_deref().unwrap_or("");
    if application.contains("Capsule") || application.contains("Tablet") {
        if is_unset(system.capsules_count.copied()) {
            issues.push(Issue::CapsuleCount);
        }
    } else if application.contains("Powder") && is_unset(system.weight_grams.copied()) {
        issues.push(Issue::PowderWeight);
    }

    if is_unset(system.doses_count.copied()) {
        issues.push(Issue::DoseCount);
    }
    if public.ingredients.as_slice().is_empty() {
        issues.push(Issue::Ingredients);
    }
    if char_len(system.protocol_hint.as_deref()) < MIN_PROTOCOL_HINT_CHARS {
        issues.push(Issue::ProtocolHint);
    }
    if is_blank(public.image_url.as_deref()) {
        issues.push(Issue::MainImage);
    }
    if is_blank(public.label_image.as_deref()) {
        issues.push(Issue::LabelImage);
    }
    issues
}

/// Checks every product in every product category. Flagship categories are
/// counted but not checked.
#[must_use]
pub fn validate_catalog(
    catalog: &Catalog,
    flagship: &FlagshipRule,
    generated_at: DateTime<Utc>,
) -> ValidationReport {
    let mut total_products = 0;
    let mut flagged = Vec::new();

    for category in catalog.product_categories() {
        let skip = flagship.is_flagship(category);
        for product in category.products() {
            total_products += 1;
            if skip {
                continue;
            }
            let issues = validate_product(product);
            if issues.is_empty() {
                continue;
            }
            tracing::debug!(
                product_id = %product.product_id,
                category = category.title(),
                issues = issues.len(),
                "product incomplete"
            );
            flagged.push(ProductIssues {
                product_id: product.product_id.clone(),
                name: product.name().to_string(),
                category: category.title().to_string(),
                issues: issues.iter().map(ToString::to_string).collect(),
            });
        }
    }

    ValidationReport {
        generated_at,
        total_products,
        products_with_issues: flagged.len(),
        issues: flagged,
    }
}

fn char_len(text: Option<&str>) -> usize {
    text.map_or(0, |t| t.chars().count())
}

fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(str::is_empty)
}

fn is_unset(count: Option<u32>) -> bool {
    count.is_none_or(|c| c == 0)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
