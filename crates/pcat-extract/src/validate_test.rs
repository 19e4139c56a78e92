use chrono::TimeZone;
use pcat_core::{Catalog, Field, Ingredient, Product};

use super::*;
use crate::test_support::{category, product, rules};

fn complete_product(id: &str) -> Product {
    let mut p = product(id, "Thermo Caps");
    p.public_data.description.set(
        "Термогенен продукт за отслабване и повече енергия през целия ден.".to_string(),
    );
    p.public_data.price.set(45.9);
    p.public_data.image_url.set("/images/products/product_1/main.jpg".to_string());
    p.public_data.label_image.set("/images/products/product_1/label.jpg".to_string());
    p.public_data
        .ingredients
        .set(vec![Ingredient::new("Зелен чай", "500 мг", "")]);
    p.system_data.manufacturer.set("Nutriversum".to_string());
    p.system_data.application_type.set("Oral / Capsules".to_string());
    p.system_data.capsules_count.set(120);
    p.system_data.doses_count.set(60);
    p.system_data.protocol_hint.set("1 капсула дневно".to_string());
    p
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

#[test]
fn complete_product_has_no_issues() {
    assert!(validate_product(&complete_product("prod-1")).is_empty());
}

#[test]
fn missing_price_ingredients_and_image_in_order() {
    let mut p = complete_product("prod-1");
    p.public_data.price = Field::Absent;
    p.public_data.ingredients.set(Vec::new());
    p.public_data.image_url = Field::Absent;

    let issues = validate_product(&p);
    assert_eq!(
        issues,
        vec![Issue::Price, Issue::Ingredients, Issue::MainImage]
    );
    let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "Липсва цена или цената е невалидна",
            "Липсва състав (ingredients)",
            "Липсва основна снимка",
        ]
    );
}

#[test]
fn flagship_category_is_not_checked() {
    let rules = rules();
    let mut p = complete_product("prod-1");
    p.public_data.price = Field::Absent;
    p.public_data.ingredients.set(Vec::new());
    p.public_data.image_url = Field::Absent;

    let mut regular = Catalog::default();
    regular
        .categories
        .push(category("fat-burners", "Фет бърнъри", vec![p.clone()]));
    let report = validate_catalog(&regular, &rules.flagship, generated_at());
    assert_eq!(report.products_with_issues, 1);
    assert_eq!(report.issues[0].issues.len(), 3);

    let mut flagship = Catalog::default();
    flagship
        .categories
        .push(category("top", "Нашите БЕСТСЕЛЪРИ", vec![p.clone()]));
    flagship
        .categories
        .push(category("weight-loss-products", "Отслабване", vec![p]));
    let report = validate_catalog(&flagship, &rules.flagship, generated_at());
    assert_eq!(report.total_products, 2);
    assert!(report.is_clean());
}

#[test]
fn character_thresholds_count_chars_not_bytes() {
    let mut p = complete_product("prod-1");
    // 49 Cyrillic letters: 98 bytes but still too short.
    p.public_data.description.set("д".repeat(MIN_DESCRIPTION_CHARS - 1));
    p.system_data.protocol_hint.set("1 дневно".to_string());
    assert_eq!(
        validate_product(&p),
        vec![Issue::Description, Issue::ProtocolHint]
    );
}

#[test]
fn application_type_selects_count_check() {
    let mut capsules = complete_product("prod-1");
    capsules.system_data.capsules_count = Field::Absent;
    assert_eq!(validate_product(&capsules), vec![Issue::CapsuleCount]);

    let mut powder = complete_product("prod-2");
    powder.system_data.application_type.set("Oral / Powder".to_string());
    powder.system_data.weight_grams.set(0);
    assert_eq!(validate_product(&powder), vec![Issue::PowderWeight]);

    let mut unknown = complete_product("prod-3");
    unknown.system_data.application_type = Field::Absent;
    unknown.system_data.capsules_count = Field::Absent;
    assert!(validate_product(&unknown).is_empty());
}

#[test]
fn non_positive_price_and_empty_strings_count_as_missing() {
    let mut p = complete_product("prod-1");
    p.public_data.price.set(0.0);
    p.system_data.manufacturer.set(String::new());
    p.public_data.label_image.set(String::new());
    assert_eq!(
        validate_product(&p),
        vec![Issue::Price, Issue::Manufacturer, Issue::LabelImage]
    );
}

#[test]
fn report_serializes_expected_shape() {
    let mut p = complete_product("prod-7");
    p.system_data.doses_count = Field::Absent;
    let mut catalog = Catalog::default();
    catalog
        .categories
        .push(category("fat-burners", "Фет бърнъри", vec![p]));

    let report = validate_catalog(&catalog, &rules().flagship, generated_at());
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "generated_at": "2026-03-01T09:00:00Z",
            "total_products": 1,
            "products_with_issues": 1,
            "issues": [{
                "product_id": "prod-7",
                "name": "Thermo Caps",
                "category": "Фет бърнъри",
                "issues": ["Липсва брой дози"]
            }]
        })
    );
}
