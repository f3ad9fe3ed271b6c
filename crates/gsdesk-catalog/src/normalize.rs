//! Normalization of the `listProducts` envelope into a [`CatalogPayload`].
//!
//! The spreadsheet script is edited by hand and its `data` section is only
//! partially populated at times, so every field is optional here.

use gsdesk_core::{value_text, CatalogPayload, ColumnMeta, ProductRow};
use serde_json::Value;

/// Converts a parsed envelope into a [`CatalogPayload`].
///
/// - `data` absent, `null` or not an object → empty payload.
/// - Array fields absent or not arrays → empty.
/// - `count` absent or not a non-negative integer → number of parsed items.
/// - Entries of `columns` / `items` that do not parse are skipped with a warning.
#[must_use]
pub fn normalize_payload(envelope: &Value) -> CatalogPayload {
    let message = envelope
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    let Some(data) = envelope.get("data").filter(|d| d.is_object()) else {
        return CatalogPayload {
            message,
            ..CatalogPayload::default()
        };
    };

    let columns: Vec<ColumnMeta> = array_field(data, "columns")
        .iter()
        .enumerate()
        .filter_map(|(i, v)| match serde_json::from_value(v.clone()) {
            Ok(column) => Some(column),
            Err(error) => {
                tracing::warn!(position = i, %error, "skipping malformed column meta");
                None
            }
        })
        .collect();

    let items: Vec<ProductRow> = array_field(data, "items")
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            if !v.is_object() {
                tracing::warn!(position = i, "skipping catalog item that is not an object");
                return None;
            }
            match serde_json::from_value(v.clone()) {
                Ok(item) => Some(item),
                Err(error) => {
                    tracing::warn!(position = i, %error, "skipping malformed catalog item");
                    None
                }
            }
        })
        .collect();

    let count = data
        .get("count")
        .and_then(Value::as_u64)
        .and_then(|c| usize::try_from(c).ok())
        .unwrap_or(items.len());

    let payload = CatalogPayload {
        header_top: string_array(data, "headerTop"),
        header_bottom: string_array(data, "headerBottom"),
        header: string_array(data, "header"),
        columns,
        count,
        items,
        message,
    };

    for column in payload.columns_out_of_range() {
        tracing::warn!(
            key = %column.key,
            index = column.index,
            "column index exceeds raw cells of some items"
        );
    }

    payload
}

fn array_field<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn string_array(data: &Value, key: &str) -> Vec<String> {
    array_field(data, key).iter().map(value_text).collect()
}
