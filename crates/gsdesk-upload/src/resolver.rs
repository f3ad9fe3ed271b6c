//! Header alias resolution.

use gsdesk_core::HeaderAliases;

use crate::error::{ColumnRole, UploadError};

/// First candidate, in priority order, present verbatim in `headers`.
///
/// Matching is exact: no trimming and no case folding.
#[must_use]
pub fn resolve<'a, S: AsRef<str>>(headers: &[String], candidates: &'a [S]) -> Option<&'a str> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| headers.iter().any(|h| h == candidate))
}

/// Header names of the SKU and value columns of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub sku: String,
    pub value: String,
}

/// Resolves both columns a transform needs.
///
/// # Errors
///
/// [`UploadError::HeaderNotFound`] naming the first role that has no match.
pub fn resolve_columns(
    headers: &[String],
    aliases: &HeaderAliases,
) -> Result<ResolvedColumns, UploadError> {
    let sku = resolve(headers, &aliases.sku).ok_or_else(|| UploadError::HeaderNotFound {
        role: ColumnRole::Sku,
        candidates: aliases.sku.clone(),
    })?;
    let value = resolve(headers, &aliases.value).ok_or_else(|| UploadError::HeaderNotFound {
        role: ColumnRole::Value,
        candidates: aliases.value.clone(),
    })?;

    Ok(ResolvedColumns {
        sku: sku.to_string(),
        value: value.to_string(),
    })
}
