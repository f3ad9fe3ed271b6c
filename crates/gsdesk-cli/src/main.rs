mod catalog;
mod estimate;
mod upload;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalog::CatalogCommands;
use crate::estimate::EstimateItem;
use crate::upload::UploadCommands;

#[derive(Debug, Parser)]
#[command(name = "gsdesk")]
#[command(about = "Catalog, marketplace upload and quote tooling for the product sheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Rewrite marketplace bulk-edit files
    Upload {
        #[command(subcommand)]
        command: UploadCommands,
    },
    /// Build a quote from catalog codes and export it
    Estimate {
        /// Line item as CODE or CODE:QTY (repeatable)
        #[arg(long = "item", required = true, value_name = "CODE[:QTY]")]
        items: Vec<EstimateItem>,
        /// Discount percentage applied to every line
        #[arg(long, default_value = "0")]
        discount: f64,
        /// Directory for the exported workbook (defaults to GSDESK_OUTPUT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = gsdesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Catalog { command }) => match command {
            CatalogCommands::List {
                query,
                category,
                sort,
                desc,
                page,
                page_size,
            } => {
                catalog::run_catalog_list(
                    &config,
                    &catalog::ListOptions {
                        query: query.as_deref().unwrap_or_default(),
                        category: category.as_deref().unwrap_or_default(),
                        sort,
                        desc,
                        page,
                        page_size: page_size.unwrap_or(config.page_size),
                    },
                )
                .await?;
            }
            CatalogCommands::Categories => catalog::run_catalog_categories(&config).await?,
        },
        Some(Commands::Upload { command }) => match command {
            UploadCommands::Price {
                file,
                out_dir,
                dry_run,
            } => {
                upload::run_upload_transform(
                    &config,
                    gsdesk_core::UploadMode::Price,
                    &file,
                    out_dir.as_deref(),
                    dry_run,
                )
                .await?;
            }
            UploadCommands::Option {
                file,
                out_dir,
                dry_run,
            } => {
                upload::run_upload_transform(
                    &config,
                    gsdesk_core::UploadMode::Option,
                    &file,
                    out_dir.as_deref(),
                    dry_run,
                )
                .await?;
            }
            UploadCommands::Validate { file, mode } => {
                upload::run_upload_validate(&config, mode, &file).await?;
            }
        },
        Some(Commands::Estimate {
            items,
            discount,
            out_dir,
        }) => {
            estimate::run_estimate(&config, &items, discount, out_dir.as_deref()).await?;
        }
        None => println!("gsdesk: run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
