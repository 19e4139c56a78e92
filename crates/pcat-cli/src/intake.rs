//! Supplier intake jobs: images, new products, enrichment, overrides.

use anyhow::Context;
use pcat_core::{AppConfig, Rules};
use pcat_extract::FactExtractor;
use pcat_intake::{
    add_new_products, apply_overrides, enrich_catalog, intake_images, Enrichment, ImageMapping,
    Spreadsheet,
};

use crate::catalog;

fn open_spreadsheet(config: &AppConfig) -> anyhow::Result<Spreadsheet> {
    let path = config.require_spreadsheet()?;
    Spreadsheet::open(path).with_context(|| format!("opening {}", path.display()))
}

/// Extracts every archive and replaces the image mapping file.
///
/// The spreadsheet is optional here: without it archives are named by id.
pub(crate) fn run_intake_images(config: &AppConfig, rules: &Rules) -> anyhow::Result<()> {
    let sheet = match config.spreadsheet_path.as_deref() {
        Some(_) => Some(open_spreadsheet(config)?),
        None => {
            tracing::warn!("PCAT_SPREADSHEET_PATH not set; archives will be named by id");
            None
        }
    };

    let intake = intake_images(
        &config.products_dir,
        &config.images_dir,
        sheet.as_ref(),
        &rules.label_keywords,
    )?;

    for (id, entry) in intake.mapping.iter() {
        println!(
            "  {id:<8} {:>2} main {:>2} label  {}",
            entry.images.main.len(),
            entry.images.label.len(),
            entry.product_name
        );
    }
    for (path, reason) in &intake.failed {
        println!("  failed {}: {reason}", path.display());
    }

    intake
        .mapping
        .save(&config.image_mapping_path)
        .with_context(|| format!("writing {}", config.image_mapping_path.display()))?;
    println!(
        "processed {} archives ({} failed), mapping saved to {}",
        intake.mapping.len(),
        intake.failed.len(),
        config.image_mapping_path.display()
    );
    Ok(())
}

pub(crate) fn run_add_products(config: &AppConfig, rules: &Rules, dry_run: bool) -> anyhow::Result<()> {
    let sheet = open_spreadsheet(config)?;
    let images = ImageMapping::load(&config.image_mapping_path).with_context(|| {
        format!(
            "loading {} (run `pcat intake-images` first)",
            config.image_mapping_path.display()
        )
    })?;
    let extractor = FactExtractor::new(rules)?;
    let mut catalog = catalog::load(&config.catalog_path)?;

    let result = add_new_products(
        &mut catalog,
        rules,
        &sheet,
        &images,
        &config.images_base_url,
        &extractor,
    )?;
    for (category, product_id) in &result.added {
        println!("  added {product_id} to {category}");
    }
    println!(
        "added {} products, skipped {}",
        result.added.len(),
        result.skipped
    );
    if result.added.is_empty() {
        return Ok(());
    }
    catalog::finish(&config.catalog_path, &catalog, dry_run)
}

pub(crate) fn run_enrich(config: &AppConfig, rules: &Rules, dry_run: bool) -> anyhow::Result<()> {
    let sheet = open_spreadsheet(config)?;
    let extractor = FactExtractor::new(rules)?;
    let mut catalog = catalog::load(&config.catalog_path)?;

    let changes = enrich_catalog(
        &mut catalog,
        &sheet,
        &extractor,
        &rules.generic_ingredients,
        &config.images_dir,
        &config.images_base_url,
    );
    print_changes("enriched", &changes);
    if changes.is_empty() {
        return Ok(());
    }
    catalog::finish(&config.catalog_path, &catalog, dry_run)
}

pub(crate) fn run_apply_overrides(
    config: &AppConfig,
    rules: &Rules,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut catalog = catalog::load(&config.catalog_path)?;
    let changes = apply_overrides(&mut catalog, &rules.overrides);
    print_changes("updated", &changes);
    catalog::finish(&config.catalog_path, &catalog, dry_run)
}

fn print_changes(verb: &str, changes: &[Enrichment]) {
    for change in changes {
        println!("  {:<14} {}", change.product_id, change.fields.join(", "));
    }
    println!("{verb} {} products", changes.len());
}
