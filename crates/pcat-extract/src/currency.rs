//! BGN → EUR price conversion.
//!
//! Amounts are divided and rounded in `Decimal`, half-up (midpoint away from
//! zero) to two places, so `2.675` becomes `2.68` regardless of how the
//! binary float happens to sit.

use std::str::FromStr;

use pcat_core::Catalog;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::ExtractError;

pub const EUR: &str = "EUR";

/// Decimal places kept after conversion.
const CENTS: u32 = 2;

/// `amount / rate`, rounded half-up to cents.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidRate`] for a rate that is not positive and
/// [`ExtractError::UnrepresentableAmount`] for a non-finite or out-of-range
/// amount.
pub fn convert_bgn_to_eur(amount: f64, rate: Decimal) -> Result<f64, ExtractError> {
    let eur = convert_decimal(to_decimal(amount)?, rate)?;
    eur.to_f64()
        .ok_or(ExtractError::UnrepresentableAmount { amount })
}

/// Decimal-in, decimal-out form of [`convert_bgn_to_eur`].
///
/// # Errors
///
/// Returns [`ExtractError::InvalidRate`] when `rate` is zero or negative.
pub fn convert_decimal(amount: Decimal, rate: Decimal) -> Result<Decimal, ExtractError> {
    if rate <= Decimal::ZERO {
        return Err(ExtractError::InvalidRate(rate));
    }
    Ok((amount / rate).round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero))
}

/// Shortest decimal that prints like the float, so `45.9` is `45.9` and not
/// `45.89999…`.
fn to_decimal(amount: f64) -> Result<Decimal, ExtractError> {
    if !amount.is_finite() {
        return Err(ExtractError::UnrepresentableAmount { amount });
    }
    Decimal::from_str(&amount.to_string())
        .or_else(|_| Decimal::from_scientific(&format!("{amount:e}")))
        .map_err(|_| ExtractError::UnrepresentableAmount { amount })
}

/// One product whose price was converted.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceConversion {
    pub product_id: String,
    pub bgn: f64,
    pub eur: f64,
}

/// Converts every positive, not-yet-EUR price in the catalog.
///
/// The BGN amount is kept in `price_bgn`. Products already in EUR and
/// products without a positive price are left alone, so running this twice
/// changes nothing the second time.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidRate`] if `rate` is not positive. A single
/// unconvertible amount is logged and skipped.
pub fn convert_catalog_prices(
    catalog: &mut Catalog,
    rate: Decimal,
) -> Result<Vec<PriceConversion>, ExtractError> {
    if rate <= Decimal::ZERO {
        return Err(ExtractError::InvalidRate(rate));
    }

    let mut converted = Vec::new();
    for category in catalog.product_categories_mut() {
        for product in category.products.iter_mut().flatten() {
            let data = &mut product.public_data;
            if data.currency.as_deref() == Some(EUR) {
                continue;
            }
            let Some(bgn) = data.price.copied().filter(|p| *p > 0.0) else {
                continue;
            };
            let eur = match convert_bgn_to_eur(bgn, rate) {
                Ok(eur) => eur,
                Err(e) => {
                    tracing::warn!(product_id = %product.product_id, error = %e, "price not converted");
                    continue;
                }
            };
            data.price_bgn.set(bgn);
            data.price.set(eur);
            data.currency.set(EUR.to_string());
            converted.push(PriceConversion {
                product_id: product.product_id.clone(),
                bgn,
                eur,
            });
        }
    }
    Ok(converted)
}

#[cfg(test)]
#[path = "currency_test.rs"]
mod tests;
