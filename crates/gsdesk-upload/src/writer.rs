//! Export of tables as XLSX (and bare CSV).

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rust_xlsxwriter::Workbook;

use crate::error::UploadError;
use crate::table::{CellValue, Record, UploadedTable};

const XLSX_EXTENSION: &str = ".xlsx";

/// Appends `.xlsx` unless `name` already ends with it (any case).
#[must_use]
pub fn with_xlsx_extension(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(XLSX_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{XLSX_EXTENSION}")
    }
}

/// `<purpose>_<YYYY-MM-DDTHH-MM-SS>`, without extension.
#[must_use]
pub fn timestamped_filename(purpose: &str, now: NaiveDateTime) -> String {
    format!("{purpose}_{}", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Encodes one worksheet: the header row, then each record's values in
/// header order. Numbers are written as numbers; blanks are left unset.
///
/// # Errors
///
/// - [`UploadError::TooLarge`] if the table exceeds worksheet limits.
/// - [`UploadError::Xlsx`] if the workbook cannot be serialized.
pub fn encode_xlsx(headers: &[String], rows: &[Record]) -> Result<Vec<u8>, UploadError> {
    let too_large = || UploadError::TooLarge {
        rows: rows.len(),
        columns: headers.len(),
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (c, header) in headers.iter().enumerate() {
        let col = u16::try_from(c).map_err(|_| too_large())?;
        worksheet.write_string(0, col, header.as_str())?;
    }

    for (r, record) in rows.iter().enumerate() {
        let row = u32::try_from(r + 1).map_err(|_| too_large())?;
        for (c, header) in headers.iter().enumerate() {
            let col = u16::try_from(c).map_err(|_| too_large())?;
            match record.get(header) {
                Some(CellValue::Text(s)) if !s.is_empty() => {
                    worksheet.write_string(row, col, s.as_str())?;
                }
                Some(CellValue::Number(n)) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Some(CellValue::Bool(b)) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                _ => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Encodes as comma-separated text with `\n` line ends and no quoting.
/// Cells containing commas or newlines do not survive a round-trip.
#[must_use]
pub fn encode_csv(headers: &[String], rows: &[Record]) -> Vec<u8> {
    let mut out = headers.join(",");
    out.push('\n');
    for record in rows {
        let line: Vec<String> = headers
            .iter()
            .map(|h| record.get(h).map(ToString::to_string).unwrap_or_default())
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

/// Writes `table` into `dir` as `base_name` (+ `.xlsx`) and returns the path.
///
/// # Errors
///
/// As [`encode_xlsx`], plus [`UploadError::Io`] if the file cannot be written.
pub fn write_table(dir: &Path, base_name: &str, table: &UploadedTable) -> Result<PathBuf, UploadError> {
    let bytes = encode_xlsx(&table.headers, &table.rows)?;
    let path = dir.join(with_xlsx_extension(base_name));
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), rows = table.len(), "export written");
    Ok(path)
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
