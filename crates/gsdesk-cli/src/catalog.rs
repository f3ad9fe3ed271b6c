//! Catalog command handlers: fetch the sheet once, then filter, sort and
//! page locally.

use clap::Subcommand;
use gsdesk_catalog::CatalogClient;
use gsdesk_core::{
    categories, category_label, filter_products, paginate, sort_products, AppConfig,
    CatalogPayload, SortDirection, SortKey,
};

/// Sub-commands available under `catalog`.
#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// List products, one page at a time
    List {
        /// Case-insensitive search over code, name and size
        #[arg(long)]
        query: Option<String>,
        /// Category code filter (e.g. WRK)
        #[arg(long)]
        category: Option<String>,
        /// Sort key: code, name, size, category, deal, online, cost, discountRate
        #[arg(long)]
        sort: Option<SortKey>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page (defaults to GSDESK_PAGE_SIZE)
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<usize>,
    },
    /// List the distinct category codes in the catalog
    Categories,
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("page size must be a positive integer, got '{raw}'")),
    }
}

pub(crate) struct ListOptions<'a> {
    pub query: &'a str,
    pub category: &'a str,
    pub sort: Option<SortKey>,
    pub desc: bool,
    pub page: usize,
    pub page_size: usize,
}

/// Fetch the catalog, mapping client errors into a CLI-facing message.
///
/// # Errors
///
/// Returns an error if the endpoint is not configured or the request fails.
pub(crate) async fn fetch_catalog(config: &AppConfig) -> anyhow::Result<CatalogPayload> {
    let client = CatalogClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
    let payload = client
        .fetch_catalog()
        .await
        .map_err(|e| anyhow::anyhow!("failed to load catalog: {e}"))?;
    Ok(payload)
}

/// `12300.0` → `"12,300"`. Fractions are rounded to whole won.
pub(crate) fn fmt_won(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Print one page of the filtered, sorted catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub(crate) async fn run_catalog_list(
    config: &AppConfig,
    options: &ListOptions<'_>,
) -> anyhow::Result<()> {
    let payload = fetch_catalog(config).await?;

    let mut rows = filter_products(&payload.items, options.query, options.category);
    if let Some(key) = options.sort {
        let direction = if options.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        sort_products(&mut rows, key, direction);
    }
    let page = paginate(&rows, options.page, options.page_size);

    if page.total_items == 0 {
        println!("no products match the current filter");
        return Ok(());
    }

    println!(
        "{:<14}{:<16}{:<34}{:<18}{:>12}{:>12}",
        "CODE", "CATEGORY", "NAME", "SIZE", "ONLINE", "DEAL"
    );
    for item in &page.items {
        println!(
            "{:<14}{:<16}{:<34}{:<18}{:>12}{:>12}",
            item.code,
            category_label(&item.category),
            truncate(&item.name, 30),
            truncate(&item.size, 16),
            fmt_won(item.online),
            fmt_won(item.deal),
        );
    }
    println!(
        "page {}/{} ({} of {} products)",
        page.page,
        page.total_pages,
        page.total_items,
        payload.count
    );

    Ok(())
}

/// Print distinct category codes with their labels.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub(crate) async fn run_catalog_categories(config: &AppConfig) -> anyhow::Result<()> {
    let payload = fetch_catalog(config).await?;
    let codes = categories(&payload.items);
    if codes.is_empty() {
        println!("catalog has no categories");
        return Ok(());
    }
    for code in &codes {
        let count = payload.items.iter().filter(|i| i.category.trim() == code.as_str()).count();
        println!("{:<20}{count:>6}", category_label(code));
    }
    Ok(())
}
