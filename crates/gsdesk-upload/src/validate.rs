//! Row validation for upload forms.
//!
//! Mismatches are data for the caller to show, not errors.

use std::collections::BTreeSet;

use gsdesk_core::{parse_lenient_number, HeaderAliases, PriceIndex};

use crate::resolver::resolve;
use crate::table::{CellValue, UploadedTable};
use crate::transform::sku_text;

/// A flagged cell: 1-based data row and header name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: usize,
    pub header: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    cells: BTreeSet<CellRef>,
}

impl ValidationResult {
    #[must_use]
    pub fn contains(&self, row: usize, header: &str) -> bool {
        self.cells.contains(&CellRef {
            row,
            header: header.to_string(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flagged cells ordered by row, then header.
    pub fn iter(&self) -> impl Iterator<Item = &CellRef> {
        self.cells.iter()
    }

    /// Number of distinct rows with at least one flagged cell.
    #[must_use]
    pub fn row_count(&self) -> usize {
        let rows: BTreeSet<usize> = self.cells.iter().map(|c| c.row).collect();
        rows.len()
    }

    fn flag(&mut self, row: usize, header: &str) {
        self.cells.insert(CellRef {
            row,
            header: header.to_string(),
        });
    }
}

/// True when the cell holds a number ≥ 0 once non-numeric characters are
/// stripped.
#[must_use]
pub fn is_valid_price(cell: Option<&CellValue>) -> bool {
    match cell {
        Some(CellValue::Number(n)) => n.is_finite() && *n >= 0.0,
        Some(other) => parse_lenient_number(&other.to_string()).is_some_and(|n| n >= 0.0),
        None => false,
    }
}

/// Flags empty SKUs and unusable values.
///
/// A column that does not resolve is looked up under the empty header name,
/// so every row gets flagged at `(row, "")`.
#[must_use]
pub fn validate(table: &UploadedTable, aliases: &HeaderAliases) -> ValidationResult {
    let sku_header = resolve(&table.headers, &aliases.sku).unwrap_or_default();
    let value_header = resolve(&table.headers, &aliases.value).unwrap_or_default();

    let mut result = ValidationResult::default();
    for (i, record) in table.rows.iter().enumerate() {
        let row = i + 1;
        if sku_text(record, sku_header).is_empty() {
            result.flag(row, sku_header);
        }
        if !is_valid_price(record.get(value_header)) {
            result.flag(row, value_header);
        }
    }

    tracing::debug!(
        rows = table.len(),
        flagged = result.len(),
        "upload validated"
    );
    result
}

/// Rows whose non-empty SKU is not in the catalog. Advisory only.
#[must_use]
pub fn stale_sku_count(table: &UploadedTable, aliases: &HeaderAliases, index: &PriceIndex) -> usize {
    let Some(sku_header) = resolve(&table.headers, &aliases.sku) else {
        return 0;
    };
    table
        .rows
        .iter()
        .map(|record| sku_text(record, sku_header))
        .filter(|sku| !sku.is_empty() && !index.contains(sku))
        .count()
}
