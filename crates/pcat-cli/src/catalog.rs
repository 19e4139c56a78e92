//! Catalog loading and saving shared by the job handlers, plus the
//! `summary` and `migrate` jobs.

use std::path::Path;

use anyhow::Context;
use pcat_core::{load_catalog_or_empty, read_catalog, save_catalog, Catalog, SourceFormat};

/// Reads the catalog for a job that will rewrite it.
///
/// Unlike `summary`, rewriting jobs refuse to start from an unreadable file.
pub(crate) fn load(path: &Path) -> anyhow::Result<Catalog> {
    let loaded = read_catalog(path).with_context(|| format!("loading {}", path.display()))?;
    if loaded.format == SourceFormat::Legacy {
        tracing::info!(path = %path.display(), "catalog will be saved in canonical form");
    }
    Ok(loaded.catalog)
}

/// Saves the catalog unless this is a dry run.
pub(crate) fn finish(path: &Path, catalog: &Catalog, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        println!("dry-run: {} not written", path.display());
        return Ok(());
    }
    save_catalog(path, catalog).with_context(|| format!("saving {}", path.display()))?;
    println!("saved {}", path.display());
    Ok(())
}

pub(crate) fn run_summary(path: &Path) {
    let catalog = load_catalog_or_empty(path);
    println!(
        "{}: {} components, {} products",
        path.display(),
        catalog.categories.len(),
        catalog.product_count()
    );
    for category in catalog.product_categories() {
        println!(
            "  {:<28} {:>4}  {}",
            category.id.as_deref().unwrap_or("-"),
            category.products().len(),
            category.title()
        );
    }
    match &catalog.footer {
        Some(footer) => {
            let keys: Vec<&str> = footer.keys().map(String::as_str).collect();
            println!("footer: {}", keys.join(", "));
        }
        None => println!("footer: none"),
    }
}

/// Reads the catalog in whichever shape it has and writes it canonical.
pub(crate) fn run_migrate(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let loaded = read_catalog(path).with_context(|| format!("loading {}", path.display()))?;
    let target = output.unwrap_or(path);
    save_catalog(target, &loaded.catalog)
        .with_context(|| format!("writing {}", target.display()))?;

    let from = match loaded.format {
        SourceFormat::Canonical => "canonical",
        SourceFormat::Legacy => "legacy",
    };
    println!(
        "migrated {} ({from}) -> {} (schema v{})",
        path.display(),
        target.display(),
        loaded.catalog.schema_version
    );
    Ok(())
}
