//! Header aliases for marketplace upload files.
//!
//! Marketplace exports name the same column differently (`SKU` vs
//! `판매자관리코드`), so each upload mode carries an ordered alias list per
//! role. Built-in defaults cover the Playauto bulk-edit forms; a YAML file can
//! replace them without a rebuild.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which upload-center form a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Listing price recomputed from the catalog.
    Price,
    /// Option surcharge re-rounded in place.
    Option,
}

impl UploadMode {
    /// File-name prefix for exports of this mode.
    #[must_use]
    pub fn purpose(self) -> &'static str {
        match self {
            UploadMode::Price => "price_upload",
            UploadMode::Option => "option_upload",
        }
    }
}

impl std::fmt::Display for UploadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadMode::Price => write!(f, "price"),
            UploadMode::Option => write!(f, "option"),
        }
    }
}

impl std::str::FromStr for UploadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(UploadMode::Price),
            "option" => Ok(UploadMode::Option),
            other => Err(format!("unknown upload mode '{other}'; expected price or option")),
        }
    }
}

/// Ordered alias lists for the two columns an upload transform touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderAliases {
    pub sku: Vec<String>,
    pub value: Vec<String>,
}

/// Alias lists for both upload modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFormats {
    pub price: HeaderAliases,
    pub option: HeaderAliases,
}

impl UploadFormats {
    #[must_use]
    pub fn aliases(&self, mode: UploadMode) -> &HeaderAliases {
        match mode {
            UploadMode::Price => &self.price,
            UploadMode::Option => &self.option,
        }
    }
}

const SKU_ALIASES: [&str; 4] = ["SKU", "판매자관리코드", "자체상품코드", "상품코드"];

impl Default for UploadFormats {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        Self {
            price: HeaderAliases {
                sku: owned(&SKU_ALIASES),
                value: owned(&["판매가", "판매가격", "sale_price"]),
            },
            option: HeaderAliases {
                sku: owned(&SKU_ALIASES),
                value: owned(&["옵션가", "옵션추가금액", "추가금액", "option_price"]),
            },
        }
    }
}

/// Load upload formats from `path`, or the built-in defaults when `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or lists no
/// alias for some role.
pub fn load_upload_formats(path: Option<&Path>) -> Result<UploadFormats, ConfigError> {
    let Some(path) = path else {
        return Ok(UploadFormats::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FormatsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let formats: UploadFormats =
        serde_yaml::from_str(&content).map_err(ConfigError::FormatsFileParse)?;

    validate_formats(&formats)?;
    tracing::debug!(path = %path.display(), "loaded upload formats");

    Ok(formats)
}

fn validate_formats(formats: &UploadFormats) -> Result<(), ConfigError> {
    for mode in [UploadMode::Price, UploadMode::Option] {
        let aliases = formats.aliases(mode);
        for (role, names) in [("sku", &aliases.sku), ("value", &aliases.value)] {
            if names.iter().all(|n| n.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "{mode} format must list at least one {role} header"
                )));
            }
        }
    }
    Ok(())
}
