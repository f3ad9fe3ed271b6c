use thiserror::Error;

/// Which of the two resolved columns a header lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Sku,
    Value,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Sku => write!(f, "SKU"),
            ColumnRole::Value => write!(f, "value"),
        }
    }
}

/// Errors raised while decoding, transforming or exporting an upload file.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The decoded grid has no rows, so there is no header.
    #[error("{file_name} contains no rows")]
    EmptyFile { file_name: String },

    /// None of the aliases for a required column is in the header row.
    #[error("{role} header not found; expected one of: {}", .candidates.join(", "))]
    HeaderNotFound {
        role: ColumnRole,
        candidates: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook has no worksheet")]
    NoWorksheet,

    #[error("failed to write XLSX: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("table exceeds spreadsheet limits ({rows} rows, {columns} columns)")]
    TooLarge { rows: usize, columns: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation that needs a decoded file ran before one was loaded.
    #[error("no upload file loaded")]
    NoTableLoaded,
}
