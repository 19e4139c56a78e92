use pcat_core::{AppConfig, Rules};
use pcat_extract::unify_catalog;

use crate::catalog;

/// Runs the effect unifier over the whole catalog and prints, per product,
/// the kept effects and the labels each one was merged from.
pub(crate) fn run_unify_effects(
    config: &AppConfig,
    rules: &Rules,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut catalog = catalog::load(&config.catalog_path)?;
    let audits = unify_catalog(&mut catalog, rules);

    for audit in &audits {
        let marker = if audit.flagship { " (flagship)" } else { "" };
        println!("{} [{}]{marker}", audit.product_id, audit.category);
        for effect in &audit.after {
            println!(
                "  {:<24} {:>5}  <- {}",
                effect.label,
                effect.value,
                effect.sources.join(", ")
            );
        }
        let dropped = audit.before.len().saturating_sub(audit.after.len());
        if dropped > 0 {
            println!("  ({dropped} labels merged or dropped)");
        }
    }
    println!("unified effects for {} products", audits.len());

    catalog::finish(&config.catalog_path, &catalog, dry_run)
}
