use gsdesk_core::ConfigError;
use thiserror::Error;

/// Errors returned by the catalog endpoint client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The endpoint setting is missing; no request was attempted.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configured endpoint is not a valid absolute URL.
    #[error("invalid catalog endpoint URL: {0}")]
    InvalidUrl(String),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The response body is not valid JSON.
    #[error("response JSON parse failed: {0}")]
    Parse(#[source] serde_json::Error),

    /// The envelope carried `"ok": false`.
    #[error("remote error: {0}")]
    Remote(String),
}
