//! In-memory form of an uploaded sheet: a header row plus records keyed by
//! header name.

use std::collections::BTreeMap;
use std::fmt;

use gsdesk_core::parse_lenient_number;

/// One cell as decoded from CSV or a workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Numeric reading of the cell, tolerant of currency symbols and
    /// thousands separators in text cells.
    #[must_use]
    pub fn lenient_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_lenient_number(s),
            _ => None,
        }
    }

    /// First line of the cell's text, trimmed.
    #[must_use]
    pub fn first_line(&self) -> String {
        let text = self.to_string();
        text.lines().next().unwrap_or_default().trim().to_string()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            // Whole numbers print without a trailing `.0`.
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{n:.0}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One data row, keyed by header name.
pub type Record = BTreeMap<String, CellValue>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedTable {
    /// Header names in file order. Duplicates are kept here; in records the
    /// rightmost duplicate column wins.
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

impl UploadedTable {
    /// Builds a table from a decoded grid whose first row is the header.
    ///
    /// Returns `None` for an empty grid. Cells past the last header are
    /// dropped; short rows are padded with [`CellValue::Empty`].
    #[must_use]
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Option<Self> {
        let mut rows = grid.into_iter();
        let headers: Vec<String> = rows.next()?.iter().map(ToString::to_string).collect();

        let records = rows
            .map(|cells| {
                let mut cells = cells.into_iter();
                let mut record = Record::new();
                for header in &headers {
                    record.insert(header.clone(), cells.next().unwrap_or(CellValue::Empty));
                }
                record
            })
            .collect();

        Some(Self {
            headers,
            rows: records,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at zero-based data row `row` under `header`.
    #[must_use]
    pub fn cell(&self, row: usize, header: &str) -> Option<&CellValue> {
        self.rows.get(row)?.get(header)
    }
}
