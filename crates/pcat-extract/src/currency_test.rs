use pcat_core::{Catalog, Field};
use rust_decimal::Decimal;

use super::*;
use crate::test_support::{category, product};

fn rate() -> Decimal {
    Decimal::from_str("1.95583").unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn one_hundred_leva() {
    let eur = convert_bgn_to_eur(100.0, rate()).unwrap();
    assert!((eur - 51.13).abs() < 1e-9);
}

#[test]
fn rounding_is_half_up() {
    let one = Decimal::ONE;
    assert_eq!(convert_decimal(dec("2.675"), one).unwrap(), dec("2.68"));
    assert_eq!(convert_decimal(dec("2.665"), one).unwrap(), dec("2.67"));
    assert_eq!(convert_decimal(dec("-2.665"), one).unwrap(), dec("-2.67"));
}

#[test]
fn float_input_is_taken_at_face_value() {
    // As a binary float 2.675 sits just below the midpoint.
    let eur = convert_bgn_to_eur(2.675, Decimal::ONE).unwrap();
    assert!((eur - 2.68).abs() < 1e-9);
}

#[test]
fn non_positive_rate_is_rejected() {
    assert!(matches!(
        convert_bgn_to_eur(10.0, Decimal::ZERO),
        Err(ExtractError::InvalidRate(_))
    ));
}

#[test]
fn non_finite_amount_is_rejected() {
    assert!(matches!(
        convert_bgn_to_eur(f64::NAN, rate()),
        Err(ExtractError::UnrepresentableAmount { .. })
    ));
}

#[test]
fn catalog_conversion_is_idempotent() {
    let mut priced = product("prod-1", "A");
    priced.public_data.price.set(100.0);
    let mut free = product("prod-2", "B");
    free.public_data.price.set(0.0);
    let unpriced = product("prod-3", "C");

    let mut catalog = Catalog::default();
    catalog
        .categories
        .push(category("c", "Фет бърнъри", vec![priced, free, unpriced]));

    let first = convert_catalog_prices(&mut catalog, rate()).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].product_id, "prod-1");

    let p = catalog.find_product("prod-1").unwrap();
    assert_eq!(p.public_data.price_bgn, Field::Value(100.0));
    assert_eq!(p.public_data.price, Field::Value(51.13));
    assert_eq!(p.public_data.currency.as_deref(), Some(EUR));
    assert!(catalog.find_product("prod-2").unwrap().public_data.currency.is_absent());

    let snapshot = catalog.clone();
    let second = convert_catalog_prices(&mut catalog, rate()).unwrap();
    assert!(second.is_empty());
    assert_eq!(catalog, snapshot);
}
