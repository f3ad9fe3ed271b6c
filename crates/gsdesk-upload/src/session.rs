//! State of one upload form between the load, apply and export steps.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use gsdesk_core::{HeaderAliases, PriceIndex, UploadFormats, UploadMode};

use crate::error::UploadError;
use crate::reader::decode;
use crate::table::UploadedTable;
use crate::transform::{apply, TransformOutcome};
use crate::validate::{stale_sku_count, validate, ValidationResult};
use crate::writer::{timestamped_filename, write_table};

/// Every step replaces state wholesale, and a failed step leaves the
/// previous table and validation result in place.
#[derive(Debug, Clone)]
pub struct UploadSession {
    mode: UploadMode,
    aliases: HeaderAliases,
    source_name: Option<String>,
    table: Option<UploadedTable>,
    issues: ValidationResult,
}

impl UploadSession {
    #[must_use]
    pub fn new(mode: UploadMode, formats: &UploadFormats) -> Self {
        Self {
            mode,
            aliases: formats.aliases(mode).clone(),
            source_name: None,
            table: None,
            issues: ValidationResult::default(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> UploadMode {
        self.mode
    }

    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    #[must_use]
    pub fn table(&self) -> Option<&UploadedTable> {
        self.table.as_ref()
    }

    /// Result of the last validation; empty until one has run.
    #[must_use]
    pub fn issues(&self) -> &ValidationResult {
        &self.issues
    }

    /// Decodes a file and makes it the current table.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn load(
        &mut self,
        bytes: &[u8],
        file_name: &str,
        mime: Option<&str>,
    ) -> Result<&UploadedTable, UploadError> {
        let table = decode(bytes, file_name, mime)?;
        self.source_name = Some(file_name.to_string());
        self.issues = ValidationResult::default();
        Ok(self.table.insert(table))
    }

    /// Reads and loads a file from disk.
    ///
    /// # Errors
    ///
    /// [`UploadError::Io`] if the file cannot be read, otherwise as [`Self::load`].
    pub fn load_path(&mut self, path: &Path) -> Result<&UploadedTable, UploadError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.load(&bytes, &file_name, None)
    }

    /// Runs the mode's transform on the current table, swaps the result in
    /// and re-validates. Returns the transform counts.
    ///
    /// # Errors
    ///
    /// - [`UploadError::NoTableLoaded`] before a successful [`Self::load`].
    /// - [`UploadError::HeaderNotFound`] if a column is missing.
    pub fn apply(&mut self, index: &PriceIndex) -> Result<(usize, usize), UploadError> {
        let current = self.table.as_ref().ok_or(UploadError::NoTableLoaded)?;
        let TransformOutcome {
            table,
            updated,
            skipped,
        } = apply(self.mode, current, &self.aliases, index)?;
        self.issues = validate(&table, &self.aliases);
        self.table = Some(table);
        Ok((updated, skipped))
    }

    /// Re-validates the current table.
    ///
    /// # Errors
    ///
    /// [`UploadError::NoTableLoaded`] before a successful [`Self::load`].
    pub fn validate(&mut self) -> Result<&ValidationResult, UploadError> {
        let table = self.table.as_ref().ok_or(UploadError::NoTableLoaded)?;
        self.issues = validate(table, &self.aliases);
        Ok(&self.issues)
    }

    /// Rows whose SKU is not in the catalog.
    ///
    /// # Errors
    ///
    /// [`UploadError::NoTableLoaded`] before a successful [`Self::load`].
    pub fn stale_skus(&self, index: &PriceIndex) -> Result<usize, UploadError> {
        let table = self.table.as_ref().ok_or(UploadError::NoTableLoaded)?;
        Ok(stale_sku_count(table, &self.aliases, index))
    }

    /// Writes the current table to `dir` as `<purpose>_<timestamp>.xlsx`.
    ///
    /// # Errors
    ///
    /// [`UploadError::NoTableLoaded`], or any error from [`write_table`].
    pub fn export(&self, dir: &Path, now: NaiveDateTime) -> Result<PathBuf, UploadError> {
        let table = self.table.as_ref().ok_or(UploadError::NoTableLoaded)?;
        write_table(dir, &timestamped_filename(self.mode.purpose(), now), table)
    }
}
