//! Upload command handlers.
//!
//! Each run loads one marketplace file into an [`UploadSession`], applies the
//! mode's transform, reports flagged cells, and exports a new workbook.
//! The input file is never modified.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use gsdesk_core::{load_upload_formats, AppConfig, PriceIndex, UploadMode};
use gsdesk_upload::{UploadSession, ValidationResult};

use crate::catalog::fetch_catalog;

/// Flagged cells printed before the remainder is summarized.
const MAX_LISTED_ISSUES: usize = 20;

/// Sub-commands available under `upload`.
#[derive(Debug, Subcommand)]
pub enum UploadCommands {
    /// Rewrite listing prices from the catalog (rounded to 100)
    Price {
        /// CSV, XLSX or XLS bulk-edit file
        file: PathBuf,
        /// Directory for the exported workbook (defaults to GSDESK_OUTPUT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Transform and report without writing a file
        #[arg(long)]
        dry_run: bool,
    },
    /// Round option surcharges to 100 (invalid values become 0)
    Option {
        /// CSV, XLSX or XLS bulk-edit file
        file: PathBuf,
        /// Directory for the exported workbook (defaults to GSDESK_OUTPUT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Transform and report without writing a file
        #[arg(long)]
        dry_run: bool,
    },
    /// Check SKU and value cells without transforming
    Validate {
        /// CSV, XLSX or XLS bulk-edit file
        file: PathBuf,
        /// Which upload form the file is: price or option
        #[arg(long)]
        mode: UploadMode,
    },
}

fn open_session(config: &AppConfig, mode: UploadMode, file: &Path) -> anyhow::Result<UploadSession> {
    let formats = load_upload_formats(config.formats_path.as_deref())?;
    let mut session = UploadSession::new(mode, &formats);
    let table = session
        .load_path(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    println!(
        "loaded {}: {} rows, {} columns",
        file.display(),
        table.len(),
        table.headers.len()
    );
    Ok(session)
}

fn print_issues(issues: &ValidationResult) {
    if issues.is_empty() {
        println!("all rows passed validation");
        return;
    }
    println!(
        "{} cells in {} rows need attention:",
        issues.len(),
        issues.row_count()
    );
    for cell in issues.iter().take(MAX_LISTED_ISSUES) {
        let column = if cell.header.is_empty() {
            "(column not found)"
        } else {
            cell.header.as_str()
        };
        println!("  row {:<6}{column}", cell.row);
    }
    if issues.len() > MAX_LISTED_ISSUES {
        println!("  ... and {} more", issues.len() - MAX_LISTED_ISSUES);
    }
}

/// Transform an upload file and export the result.
///
/// Price mode fetches the catalog first; option mode never touches the
/// network. With `dry_run` the export step is skipped.
///
/// # Errors
///
/// Returns an error if the formats file, the upload file or the catalog
/// cannot be loaded, a required column is missing, or the export fails.
pub(crate) async fn run_upload_transform(
    config: &AppConfig,
    mode: UploadMode,
    file: &Path,
    out_dir: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(config, mode, file)?;

    let index = match mode {
        UploadMode::Price => {
            let payload = fetch_catalog(config).await?;
            let index = PriceIndex::from_products(&payload.items);
            let stale = session.stale_skus(&index)?;
            if stale > 0 {
                println!("{stale} rows have SKUs that are not in the catalog and keep their price");
            }
            index
        }
        UploadMode::Option => PriceIndex::default(),
    };

    let (updated, skipped) = session.apply(&index)?;
    println!("{mode} transform: {updated} rows updated, {skipped} unchanged");
    print_issues(session.issues());

    if dry_run {
        println!("dry-run: no file written");
        return Ok(());
    }

    let dir = out_dir.unwrap_or(&config.output_dir);
    let path = session.export(dir, chrono::Local::now().naive_local())?;
    println!("wrote {}", path.display());
    Ok(())
}

/// Validate an upload file without transforming it.
///
/// In price mode the catalog is consulted for stale SKUs when an endpoint is
/// configured; a failed fetch only skips that advisory.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or any cell is flagged.
pub(crate) async fn run_upload_validate(
    config: &AppConfig,
    mode: UploadMode,
    file: &Path,
) -> anyhow::Result<()> {
    let mut session = open_session(config, mode, file)?;
    let flagged = {
        let issues = session.validate()?;
        print_issues(issues);
        issues.len()
    };

    if mode == UploadMode::Price && config.catalog_url.is_some() {
        match fetch_catalog(config).await {
            Ok(payload) => {
                let stale = session.stale_skus(&PriceIndex::from_products(&payload.items))?;
                println!("{stale} rows have SKUs that are not in the catalog");
            }
            Err(error) => {
                tracing::warn!(error = %error, "skipping stale SKU check");
            }
        }
    }

    if flagged > 0 {
        anyhow::bail!("{flagged} cells failed validation");
    }
    Ok(())
}
