//! Decoding of uploaded CSV and Excel files into an [`UploadedTable`].

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::UploadError;
use crate::table::{CellValue, UploadedTable};

/// How an upload's bytes are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Workbook,
}

/// `.xlsx`/`.xls` names and spreadsheet MIME types decode as workbooks;
/// everything else as CSV.
#[must_use]
pub fn detect_kind(file_name: &str, mime: Option<&str>) -> FileKind {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if matches!(extension.as_deref(), Some("xlsx" | "xls")) {
        return FileKind::Workbook;
    }

    let mime = mime.unwrap_or_default().to_ascii_lowercase();
    if mime.contains("spreadsheet") || mime.contains("excel") {
        FileKind::Workbook
    } else {
        FileKind::Csv
    }
}

/// Decodes an uploaded file. The first row becomes the header.
///
/// CSV fields are split on bare commas only: quotes are kept as literal
/// characters, so quoted fields containing commas are split.
///
/// # Errors
///
/// - [`UploadError::EmptyFile`] if the file has no rows.
/// - [`UploadError::Csv`] / [`UploadError::Workbook`] if the bytes do not decode.
/// - [`UploadError::NoWorksheet`] if a workbook has no sheet.
pub fn decode(bytes: &[u8], file_name: &str, mime: Option<&str>) -> Result<UploadedTable, UploadError> {
    let kind = detect_kind(file_name, mime);
    let grid = match kind {
        FileKind::Csv => decode_csv(bytes)?,
        FileKind::Workbook => decode_workbook(bytes)?,
    };

    let table = UploadedTable::from_grid(grid).ok_or_else(|| UploadError::EmptyFile {
        file_name: file_name.to_string(),
    })?;

    tracing::debug!(
        file = file_name,
        ?kind,
        columns = table.headers.len(),
        rows = table.len(),
        "upload decoded"
    );
    Ok(table)
}

/// Reads `path` fully into memory and decodes it.
///
/// # Errors
///
/// [`UploadError::Io`] if the file cannot be read, otherwise as [`decode`].
pub fn read_path(path: &Path) -> Result<UploadedTable, UploadError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    decode(&bytes, &file_name, None)
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, UploadError> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    // Records end at `\n` only; a lone `\r` stays inside its cell.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(bytes);

    let mut grid: Vec<Vec<CellValue>> = Vec::new();
    // The reader skips empty lines, so an empty first line is the header here.
    if bytes.starts_with(b"\n") {
        grid.push(vec![CellValue::Text(String::new())]);
    }

    for record in reader.byte_records() {
        let record = record?;
        let last = record.len().saturating_sub(1);
        let cells: Vec<CellValue> = record
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let field = if i == last {
                    field.strip_suffix(b"\r").unwrap_or(field)
                } else {
                    field
                };
                CellValue::Text(String::from_utf8_lossy(field).into_owned())
            })
            .collect();
        if !grid.is_empty() && is_blank_line(&cells) {
            continue;
        }
        grid.push(cells);
    }
    Ok(grid)
}

fn is_blank_line(cells: &[CellValue]) -> bool {
    match cells {
        [] => true,
        [CellValue::Text(only)] => only.trim().is_empty(),
        _ => false,
    }
}

fn decode_workbook(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, UploadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(UploadError::NoWorksheet)??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

#[allow(clippy::cast_precision_loss)]
fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
    }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
