use super::*;
use crate::test_support::rules;

fn extractor() -> FactExtractor {
    FactExtractor::new(&rules()).unwrap()
}

// -----------------------------------------------------------------------
// unit counts
// -----------------------------------------------------------------------

#[test]
fn capsules_and_doses_from_bracketed_name() {
    let facts = extractor().extract("Thermo Caps [120 капсули] [30 Дози]");
    assert_eq!(facts.capsules, Some(120));
    assert_eq!(facts.doses, Some(30));
    assert_eq!(facts.grams, None);
}

#[test]
fn grams_from_powder_name() {
    let facts = extractor().extract("Protein [1000 грама]");
    assert_eq!(facts.grams, Some(1000));
    assert_eq!(facts.capsules, None);
    assert_eq!(facts.doses, None);
}

#[test]
fn tablets_count_as_capsules() {
    assert_eq!(extractor().capsules("Lipo 6 [60 таблетки]"), Some(60));
}

#[test]
fn capsules_require_opening_bracket() {
    assert_eq!(extractor().capsules("Thermo Caps 120 капсули"), None);
}

#[test]
fn unit_words_match_case_insensitively() {
    let ex = extractor();
    assert_eq!(ex.capsules("X [90 КАПСУЛИ]"), Some(90));
    assert_eq!(ex.doses("X (45 ДОЗИ)"), Some(45));
}

#[test]
fn first_match_wins() {
    assert_eq!(extractor().doses("X [30 дози] [60 дози]"), Some(30));
}

#[test]
fn oversized_count_is_unknown() {
    assert_eq!(extractor().capsules("X [99999999999 капсули]"), None);
}

// -----------------------------------------------------------------------
// manufacturer / display name
// -----------------------------------------------------------------------

#[test]
fn manufacturer_uses_priority_order() {
    assert_eq!(
        extractor().manufacturer("RAW Nutrition Thermo [90 капсули]"),
        Some("RAW Nutrition")
    );
}

#[test]
fn manufacturer_ignores_bracketed_tail() {
    assert_eq!(extractor().manufacturer("Fat Burner [Nutrex edition]"), None);
}

#[test]
fn display_name_drops_brackets_and_manufacturer() {
    let ex = extractor();
    let name = "Nutriversum Thermo Caps [120 капсули]";
    assert_eq!(
        ex.display_name(name, ex.manufacturer(name)),
        "Thermo Caps"
    );
    assert_eq!(ex.display_name(name, None), "Nutriversum Thermo Caps");
}

// -----------------------------------------------------------------------
// prices
// -----------------------------------------------------------------------

#[test]
fn price_with_suffix_and_comma() {
    let ex = extractor();
    assert!((ex.parse_price("45,90 лв.").unwrap() - 45.9).abs() < f64::EPSILON);
    assert!((ex.parse_price("12 лв").unwrap() - 12.0).abs() < f64::EPSILON);
    assert!((ex.parse_price(" 7.5 ").unwrap() - 7.5).abs() < f64::EPSILON);
}

#[test]
fn unparseable_price_is_an_error() {
    let err = extractor().parse_price("по запитване").unwrap_err();
    assert!(matches!(err, ExtractError::InvalidPrice { .. }));
    assert!(extractor().parse_price("лв.").is_err());
    assert!(extractor().parse_price("NaN").is_err());
}

#[test]
fn price_or_zero_defaults() {
    let ex = extractor();
    assert!(ex.price_or_zero("n/a").abs() < f64::EPSILON);
    assert!((ex.price_or_zero("3,20 лв.") - 3.2).abs() < f64::EPSILON);
}

// -----------------------------------------------------------------------
// ids and application type
// -----------------------------------------------------------------------

#[test]
fn ids_from_urls_and_archives() {
    assert_eq!(
        product_id_from_image_url("https://cdn.example.bg/images/p24527/main.jpg"),
        Some("24527".to_string())
    );
    assert_eq!(product_id_from_image_url("https://cdn.example.bg/p/x.jpg"), None);
    assert_eq!(archive_product_id("f1_b2b_16905.zip"), Some("16905".to_string()));
    assert_eq!(archive_product_id("f1_b2b_16905.rar"), None);
}

#[test]
fn application_type_follows_capsule_count() {
    let ex = extractor();
    assert_eq!(application_type(&ex.extract("X [60 капсули]")), CAPSULES_APPLICATION);
    assert_eq!(application_type(&ex.extract("X [300 грама]")), POWDER_APPLICATION);
}
