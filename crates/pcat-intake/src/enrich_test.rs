use pcat_core::{Catalog, Ingredient, Product};

use super::*;
use crate::test_support::{product_category, rules, sheet, IMAGES_BASE_URL};

fn product(id: &str, name: &str) -> Product {
    let mut p = Product {
        product_id: id.to_string(),
        ..Product::default()
    };
    p.public_data.name.set(name.to_string());
    p
}

fn catalog_with(products: Vec<Product>) -> Catalog {
    let mut category = product_category("fat-burners");
    category.products = Some(products);
    let mut catalog = Catalog::default();
    catalog.categories.push(category);
    catalog
}

#[test]
fn fills_missing_fields_from_matching_row() {
    let rules = rules();
    let extractor = FactExtractor::new(&rules).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = catalog_with(vec![product("prod-24527", "Thermo Caps")]);

    let changes = enrich_catalog(
        &mut catalog,
        &sheet(),
        &extractor,
        &rules.generic_ingredients,
        dir.path(),
        IMAGES_BASE_URL,
    );
    assert_eq!(
        changes[0].fields,
        vec![
            "manufacturer",
            "doses_count",
            "capsules_count",
            "label_image",
            "ingredients"
        ]
    );

    let p = catalog.find_product("prod-24527").unwrap();
    assert_eq!(p.system_data.manufacturer.as_deref(), Some("Nutriversum"));
    assert_eq!(p.system_data.doses_count.copied(), Some(30));
    assert_eq!(p.system_data.capsules_count.copied(), Some(120));
    // No local copy, so the supplier URL is used.
    assert_eq!(
        p.public_data.label_image.as_deref(),
        Some("https://cdn.example.bg/p24527/supp-factsf9e51.jpg")
    );
    // "thermo" selects the first generic group.
    assert_eq!(p.public_data.ingredients.as_slice().len(), 4);
}

#[test]
fn prefers_local_label_copy() {
    let rules = rules();
    let extractor = FactExtractor::new(&rules).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let local_dir = dir.path().join("product_24527");
    std::fs::create_dir_all(&local_dir).unwrap();
    std::fs::write(local_dir.join("supp-factsf9e51.jpg"), b"jpg").unwrap();
    let mut catalog = catalog_with(vec![product("prod-24527", "Thermo Caps")]);

    enrich_catalog(
        &mut catalog,
        &sheet(),
        &extractor,
        &rules.generic_ingredients,
        dir.path(),
        IMAGES_BASE_URL,
    );

    let label = catalog
        .find_product("prod-24527")
        .unwrap()
        .public_data
        .label_image
        .clone()
        .into_option()
        .unwrap();
    assert_eq!(label, "/images/products/product_24527/supp-factsf9e51.jpg");
}

#[test]
fn authored_values_are_kept() {
    let rules = rules();
    let extractor = FactExtractor::new(&rules).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut p = product("prod-24527", "Thermo Caps");
    p.system_data.manufacturer.set("Custom".to_string());
    p.system_data.doses_count.set(40);
    p.system_data.capsules_count.set(90);
    p.public_data.label_image.set("/images/own.jpg".to_string());
    p.public_data
        .ingredients
        .set(vec![Ingredient::new("Кофеин", "", "")]);
    let before = p.clone();
    let mut catalog = catalog_with(vec![p]);

    let changes = enrich_catalog(
        &mut catalog,
        &sheet(),
        &extractor,
        &rules.generic_ingredients,
        dir.path(),
        IMAGES_BASE_URL,
    );
    assert!(changes.is_empty());
    assert_eq!(catalog.find_product("prod-24527").unwrap(), &before);
}

#[test]
fn unmatched_products_still_get_generic_ingredients() {
    let rules = rules();
    let extractor = FactExtractor::new(&rules).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = catalog_with(vec![
        product("prod-1", "Lipo Extreme"),
        product("prod-2", "Детокс чай"),
    ]);

    let changes = enrich_catalog(
        &mut catalog,
        &sheet(),
        &extractor,
        &rules.generic_ingredients,
        dir.path(),
        IMAGES_BASE_URL,
    );
    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|c| c.fields == vec!["ingredients"]));

    let lipo = catalog.find_product("prod-1").unwrap();
    assert_eq!(
        lipo.public_data.ingredients.as_slice()[0].name.as_deref(),
        Some("Кофеин безводен")
    );
    let detox = catalog.find_product("prod-2").unwrap();
    assert_eq!(
        detox.public_data.ingredients.as_slice()[0].name.as_deref(),
        Some("Активни съставки")
    );
}

#[test]
fn explicit_nulls_are_filled_like_missing_values() {
    let rules = rules();
    let extractor = FactExtractor::new(&rules).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut p = product("prod-24527", "Thermo Caps");
    p.system_data.doses_count = Field::Null;
    p.system_data.capsules_count = Field::Null;
    let mut catalog = catalog_with(vec![p]);

    enrich_catalog(
        &mut catalog,
        &sheet(),
        &extractor,
        &rules.generic_ingredients,
        dir.path(),
        IMAGES_BASE_URL,
    );
    let p = catalog.find_product("prod-24527").unwrap();
    assert_eq!(p.system_data.doses_count.copied(), Some(30));
    assert_eq!(p.system_data.capsules_count.copied(), Some(120));
}
