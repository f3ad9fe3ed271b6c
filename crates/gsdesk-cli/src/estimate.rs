//! Quote builder command: look up codes in the catalog, price the lines,
//! and export an estimate workbook.

use std::path::Path;
use std::str::FromStr;

use gsdesk_core::{AppConfig, Estimate, EstimateTotals, ESTIMATE_HEADERS};
use gsdesk_upload::{timestamped_filename, write_table, CellValue, Record, UploadedTable};

use crate::catalog::{fetch_catalog, fmt_won};

const ESTIMATE_PURPOSE: &str = "estimate";

/// A `--item CODE[:QTY]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateItem {
    pub code: String,
    pub qty: u32,
}

impl FromStr for EstimateItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, qty) = match s.rsplit_once(':') {
            Some((code, qty)) => {
                let qty = qty
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("invalid quantity in '{s}'"))?;
                (code, qty)
            }
            None => (s, 1),
        };
        let code = code.trim();
        if code.is_empty() {
            return Err(format!("missing product code in '{s}'"));
        }
        Ok(Self {
            code: code.to_string(),
            qty,
        })
    }
}

/// Filled estimate lines as a table with the estimate column headers.
pub(crate) fn estimate_table(estimate: &Estimate) -> UploadedTable {
    let headers: Vec<String> = ESTIMATE_HEADERS.iter().map(|h| (*h).to_string()).collect();
    let rows = estimate
        .filled_lines()
        .map(|line| {
            let values = [
                CellValue::from(line.code.as_str()),
                CellValue::from(line.name.as_str()),
                CellValue::from(line.size.as_str()),
                CellValue::Number(f64::from(line.qty)),
                CellValue::Number(line.unit_price),
                CellValue::Number(line.supply),
                line.note.clone().map_or(CellValue::Empty, CellValue::Text),
            ];
            headers.iter().cloned().zip(values).collect::<Record>()
        })
        .collect();
    UploadedTable { headers, rows }
}

fn print_totals(totals: &EstimateTotals) {
    println!("{:<10}{:>14}", "공급가액", fmt_won(totals.supply));
    println!("{:<10}{:>14}", "부가세", fmt_won(totals.vat));
    println!("{:<10}{:>14}", "합계", fmt_won(totals.total));
}

/// Build an estimate from catalog codes and write it as a workbook.
///
/// Unknown codes are reported and left out; the command fails only when no
/// requested code is in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched, no item matches, or the
/// export fails.
pub(crate) async fn run_estimate(
    config: &AppConfig,
    items: &[EstimateItem],
    discount_pct: f64,
    out_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let payload = fetch_catalog(config).await?;

    let mut estimate = Estimate::new(0);
    estimate.set_discount_pct(discount_pct);
    for item in items {
        match payload.find(&item.code) {
            Some(product) => {
                estimate.add_product(product, item.qty);
            }
            None => {
                tracing::warn!(code = %item.code, "code not in catalog");
                println!("skipped {}: not in catalog", item.code);
            }
        }
    }

    if estimate.filled_lines().next().is_none() {
        anyhow::bail!("none of the requested codes are in the catalog");
    }

    println!(
        "{:<14}{:<30}{:>6}{:>12}{:>14}",
        "코드", "품명", "수량", "단가", "공급가액"
    );
    for line in estimate.filled_lines() {
        println!(
            "{:<14}{:<30}{:>6}{:>12}{:>14}",
            line.code,
            line.name,
            line.qty,
            fmt_won(line.unit_price),
            fmt_won(line.supply)
        );
    }
    print_totals(&estimate.totals());

    let dir = out_dir.unwrap_or(&config.output_dir);
    let name = timestamped_filename(ESTIMATE_PURPOSE, chrono::Local::now().naive_local());
    let path = write_table(dir, &name, &estimate_table(&estimate))?;
    println!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use gsdesk_core::ProductRow;

    use super::*;

    #[test]
    fn item_without_qty_defaults_to_one() {
        let item: EstimateItem = "WRK-1200".parse().unwrap();
        assert_eq!(
            item,
            EstimateItem {
                code: "WRK-1200".into(),
                qty: 1
            }
        );
    }

    #[test]
    fn item_with_qty() {
        let item: EstimateItem = " SNK-01 : 3".parse().unwrap();
        assert_eq!(item.code, "SNK-01");
        assert_eq!(item.qty, 3);
    }

    #[test]
    fn item_rejects_bad_qty_and_empty_code() {
        assert!("A1:two".parse::<EstimateItem>().is_err());
        assert!("A1:-1".parse::<EstimateItem>().is_err());
        assert!(":2".parse::<EstimateItem>().is_err());
    }

    #[test]
    fn estimate_table_skips_blank_lines() {
        let mut estimate = Estimate::new(3);
        estimate.add_product(
            &ProductRow {
                code: "A1".into(),
                name: "스텐 작업대".into(),
                size: "1200*600".into(),
                online: 10_000.0,
                ..ProductRow::default()
            },
            2,
        );
        estimate.set_note(0, Some("설치 포함".into()));

        let table = estimate_table(&estimate);

        assert_eq!(table.headers, ESTIMATE_HEADERS.to_vec());
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "코드"), Some(&CellValue::from("A1")));
        assert_eq!(table.cell(0, "수량"), Some(&CellValue::Number(2.0)));
        assert_eq!(table.cell(0, "공급가액"), Some(&CellValue::Number(20_000.0)));
        assert_eq!(table.cell(0, "비고"), Some(&CellValue::from("설치 포함")));
    }

    #[test]
    fn estimate_table_writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut estimate = Estimate::new(0);
        estimate.add_product(
            &ProductRow {
                code: "B2".into(),
                deal: 5_000.0,
                ..ProductRow::default()
            },
            1,
        );

        let path = write_table(dir.path(), "estimate_test", &estimate_table(&estimate)).unwrap();
        let back = gsdesk_upload::read_path(&path).unwrap();
        assert_eq!(back.cell(0, "단가"), Some(&CellValue::Number(5_000.0)));
        assert!(back.cell(0, "비고").is_some_and(CellValue::is_empty));
    }
}
