use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::pricing::parse_lenient_number;

/// One catalog item as served by the spreadsheet endpoint.
///
/// The named fields are the columns every consumer relies on. Physical
/// spreadsheet columns without a named field stay reachable through
/// [`ProductRow::raw`] and a [`ColumnMeta`]; any other named keys the endpoint
/// sends (`naver`, `eleven`, ...) land in [`ProductRow::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Free-text dimensions, e.g. `"1200*600*800"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub size: String,
    /// Short category code such as `"WRK"` or `"SNK"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub deal: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub online: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    /// Fraction in `0..=1`.
    #[serde(
        default,
        rename = "discountRate",
        deserialize_with = "lenient_f64"
    )]
    pub discount_rate: f64,
    /// Cells aligned to the sheet's physical columns.
    #[serde(default, rename = "_raw", deserialize_with = "lenient_array")]
    pub raw: Vec<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProductRow {
    /// Cell for a physical column, or `None` when `column.index` is past the
    /// end of this row's raw cells.
    #[must_use]
    pub fn raw_cell(&self, column: &ColumnMeta) -> Option<&Value> {
        self.raw.get(column.index)
    }

    /// Display text for a physical column; empty when the cell is missing.
    #[must_use]
    pub fn raw_cell_text(&self, column: &ColumnMeta) -> String {
        self.raw_cell(column).map(value_text).unwrap_or_default()
    }

    /// Lowercased `"{code} {name} {size}"`, the text the catalog search matches.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.code, self.name, self.size).to_lowercase()
    }
}

/// A physical spreadsheet column that has no named [`ProductRow`] field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    #[serde(default)]
    pub key: String,
    /// 0-based offset into [`ProductRow::raw`].
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub label: String,
    /// Upper row of a two-row sheet header.
    #[serde(default)]
    pub top: String,
    /// Lower row of a two-row sheet header.
    #[serde(default)]
    pub bottom: String,
}

impl ColumnMeta {
    /// `label`, else `bottom`, else a positional fallback like `"열 3"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        if !self.label.is_empty() {
            self.label.clone()
        } else if !self.bottom.is_empty() {
            self.bottom.clone()
        } else {
            format!("열 {}", self.index + 1)
        }
    }
}

/// Normalized `data` section of the `listProducts` envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPayload {
    pub header_top: Vec<String>,
    pub header_bottom: Vec<String>,
    pub header: Vec<String>,
    pub columns: Vec<ColumnMeta>,
    /// Count reported by the endpoint, or `items.len()` when it sent none.
    pub count: usize,
    pub items: Vec<ProductRow>,
    /// Informational message from the envelope, if any.
    pub message: Option<String>,
}

impl CatalogPayload {
    /// Columns whose `index` does not fit every item's raw cells.
    #[must_use]
    pub fn columns_out_of_range(&self) -> Vec<&ColumnMeta> {
        self.columns
            .iter()
            .filter(|c| self.items.iter().any(|item| c.index >= item.raw.len()))
            .collect()
    }

    #[must_use]
    pub fn find(&self, code: &str) -> Option<&ProductRow> {
        let code = code.trim();
        self.items.iter().find(|p| p.code.trim() == code)
    }
}

/// Renders a JSON cell the way the sheet shows it: strings verbatim, `null`
/// as empty, everything else through its JSON text.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

/// Sheet-backed numbers arrive as JSON numbers, formatted strings
/// (`"12,300"`), blanks, or `null`. Anything unparseable becomes `0`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_lenient_number(&s).unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(b)),
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    })
}

fn lenient_array<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(cells) => cells,
        _ => Vec::new(),
    })
}
