//! Price and option-surcharge rewrites for marketplace upload forms.
//!
//! Both transforms are pure: they return a new table and leave the input
//! untouched, so a failed header lookup never leaves a half-edited sheet.

use gsdesk_core::{round_to_hundred, HeaderAliases, PriceIndex, UploadMode};

use crate::error::UploadError;
use crate::resolver::resolve_columns;
use crate::table::{CellValue, Record, UploadedTable};

/// Result of a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    pub table: UploadedTable,
    /// Rows whose value cell was rewritten.
    pub updated: usize,
    /// Rows left as they were (price mode: SKU not in the catalog).
    pub skipped: usize,
}

/// SKU of a row: first line of the cell, trimmed. Missing cells read as "".
#[must_use]
pub fn sku_text(record: &Record, sku_header: &str) -> String {
    record
        .get(sku_header)
        .map(CellValue::first_line)
        .unwrap_or_default()
}

/// Rewrites the value column with the catalog's listed price, rounded to
/// the nearest 100. Rows whose SKU is not in `index` are kept unchanged.
///
/// # Errors
///
/// [`UploadError::HeaderNotFound`] if the SKU or value column is missing.
pub fn apply_price(
    table: &UploadedTable,
    aliases: &HeaderAliases,
    index: &PriceIndex,
) -> Result<TransformOutcome, UploadError> {
    let columns = resolve_columns(&table.headers, aliases)?;

    let mut out = table.clone();
    let mut updated = 0;
    for record in &mut out.rows {
        let sku = sku_text(record, &columns.sku);
        let Some(price) = index.get(&sku) else {
            continue;
        };
        record.insert(
            columns.value.clone(),
            CellValue::Number(round_to_hundred(price)),
        );
        updated += 1;
    }

    let skipped = out.rows.len() - updated;
    tracing::info!(
        sku_column = %columns.sku,
        value_column = %columns.value,
        updated,
        skipped,
        "price transform applied"
    );
    Ok(TransformOutcome {
        table: out,
        updated,
        skipped,
    })
}

/// Re-rounds every option surcharge to the nearest 100. Values that do not
/// parse, or are negative, become `0`.
///
/// # Errors
///
/// [`UploadError::HeaderNotFound`] if the SKU or value column is missing.
pub fn apply_option(
    table: &UploadedTable,
    aliases: &HeaderAliases,
) -> Result<TransformOutcome, UploadError> {
    let columns = resolve_columns(&table.headers, aliases)?;

    let mut out = table.clone();
    let mut zeroed = 0;
    for record in &mut out.rows {
        let current = record
            .get(&columns.value)
            .and_then(CellValue::lenient_number)
            .filter(|n| *n >= 0.0);
        let rounded = current.map_or_else(
            || {
                zeroed += 1;
                0.0
            },
            round_to_hundred,
        );
        record.insert(columns.value.clone(), CellValue::Number(rounded));
    }

    let updated = out.rows.len();
    tracing::info!(
        value_column = %columns.value,
        updated,
        zeroed,
        "option transform applied"
    );
    Ok(TransformOutcome {
        table: out,
        updated,
        skipped: 0,
    })
}

/// Runs the transform for `mode`. `index` is only consulted in price mode.
///
/// # Errors
///
/// See [`apply_price`] and [`apply_option`].
pub fn apply(
    mode: UploadMode,
    table: &UploadedTable,
    aliases: &HeaderAliases,
    index: &PriceIndex,
) -> Result<TransformOutcome, UploadError> {
    match mode {
        UploadMode::Price => apply_price(table, aliases, index),
        UploadMode::Option => apply_option(table, aliases),
    }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
