use pcat_core::AppConfig;
use pcat_extract::convert_catalog_prices;

use crate::catalog;

pub(crate) fn run_convert_prices(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let mut catalog = catalog::load(&config.catalog_path)?;
    let converted = convert_catalog_prices(&mut catalog, config.bgn_to_eur_rate)?;

    for c in &converted {
        println!("  {:<14} {:>9.2} BGN -> {:>8.2} EUR", c.product_id, c.bgn, c.eur);
    }
    println!(
        "converted {} prices at {} BGN/EUR",
        converted.len(),
        config.bgn_to_eur_rate
    );
    if converted.is_empty() {
        return Ok(());
    }
    catalog::finish(&config.catalog_path, &catalog, dry_run)
}
