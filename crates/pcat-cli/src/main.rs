mod catalog;
mod effects;
mod intake;
mod prices;
mod validate;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pcat_core::{AppConfig, Rules};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pcat")]
#[command(about = "Product catalog maintenance jobs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print per-category product counts and footer keys
    Summary,
    /// Rewrite the catalog in the canonical versioned shape
    Migrate {
        /// Write the migrated catalog here instead of replacing it in place
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Merge synonymous effect labels and keep the top three per product
    UnifyEffects {
        /// Print the audit trail without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Convert BGN prices to EUR, keeping the original in `price_bgn`
    ConvertPrices {
        /// Print the conversions without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Check products for missing fields and write the report
    Validate {
        /// Report destination (defaults to PCAT_REPORT_PATH)
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Extract supplier image archives and write the image mapping
    IntakeImages,
    /// Create catalog products for the configured supplier archives
    AddProducts {
        /// Print what would be added without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Fill missing product fields from the supplier spreadsheet
    Enrich {
        /// Print what would change without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply the hand-curated per-product overrides
    ApplyOverrides {
        /// Print what would change without saving
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = pcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, catalog = %config.catalog_path.display(), "config loaded");

    match cli.command {
        Commands::Summary => catalog::run_summary(&config.catalog_path),
        Commands::Migrate { output } => {
            catalog::run_migrate(&config.catalog_path, output.as_deref())?;
        }
        Commands::UnifyEffects { dry_run } => {
            effects::run_unify_effects(&config, &load_rules(&config)?, dry_run)?;
        }
        Commands::ConvertPrices { dry_run } => {
            prices::run_convert_prices(&config, dry_run)?;
        }
        Commands::Validate { report } => {
            let report_path = report.unwrap_or_else(|| config.report_path.clone());
            return validate::run_validate(&config, &load_rules(&config)?, &report_path);
        }
        Commands::IntakeImages => intake::run_intake_images(&config, &load_rules(&config)?)?,
        Commands::AddProducts { dry_run } => {
            intake::run_add_products(&config, &load_rules(&config)?, dry_run)?;
        }
        Commands::Enrich { dry_run } => {
            intake::run_enrich(&config, &load_rules(&config)?, dry_run)?;
        }
        Commands::ApplyOverrides { dry_run } => {
            intake::run_apply_overrides(&config, &load_rules(&config)?, dry_run)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_rules(config: &AppConfig) -> anyhow::Result<Rules> {
    pcat_core::load_rules(&config.rules_path)
        .with_context(|| format!("loading rules from {}", config.rules_path.display()))
}
