//! Upload-center pipeline for marketplace bulk-edit files.
//!
//! `reader` → `resolver` → `transform` → `validate` → `writer`, with
//! [`UploadSession`] holding the state of one upload form between steps.

pub mod error;
pub mod reader;
pub mod resolver;
pub mod session;
pub mod table;
pub mod transform;
pub mod validate;
pub mod writer;

pub use error::{ColumnRole, UploadError};
pub use reader::{decode, detect_kind, read_path, FileKind};
pub use resolver::{resolve, resolve_columns, ResolvedColumns};
pub use session::UploadSession;
pub use table::{CellValue, Record, UploadedTable};
pub use transform::{apply, apply_option, apply_price, sku_text, TransformOutcome};
pub use validate::{is_valid_price, stale_sku_count, validate, CellRef, ValidationResult};
pub use writer::{
    encode_csv, encode_xlsx, timestamped_filename, with_xlsx_extension, write_table,
};
