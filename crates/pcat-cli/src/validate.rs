use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use pcat_core::{write_json_atomic, AppConfig, Rules};
use pcat_extract::validate_catalog;

/// Validates the catalog and writes the JSON report.
///
/// Exits with failure when any product is flagged.
pub(crate) fn run_validate(
    config: &AppConfig,
    rules: &Rules,
    report_path: &Path,
) -> anyhow::Result<ExitCode> {
    let catalog = crate::catalog::load(&config.catalog_path)?;
    let report = validate_catalog(&catalog, &rules.flagship, Utc::now());

    for entry in &report.issues {
        println!("{} ({}) [{}]", entry.name, entry.product_id, entry.category);
        for issue in &entry.issues {
            println!("  - {issue}");
        }
    }
    println!(
        "checked {} products, {} with issues",
        report.total_products, report.products_with_issues
    );

    write_json_atomic(report_path, &report, "validation report")
        .with_context(|| format!("writing {}", report_path.display()))?;
    println!("report saved to {}", report_path.display());

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
