//! HTTP client for the spreadsheet web-app that serves the product catalog.
//!
//! The endpoint answers `GET ?action=listProducts` with an
//! `{ok, message?, data?}` envelope. This client performs exactly one request
//! per call: no retry, no caching, and no timeout beyond the transport default.

use gsdesk_core::{AppConfig, CatalogPayload, ConfigError, CATALOG_URL_VAR};
use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::normalize::normalize_payload;

const LIST_PRODUCTS_ACTION: &str = "listProducts";

const DEFAULT_USER_AGENT: &str = "gsdesk/0.1 (catalog-sync)";

/// Client for the catalog endpoint.
///
/// Construction fails with [`CatalogError::Config`] when no endpoint is
/// configured, so a missing setting never reaches the network.
pub struct CatalogClient {
    client: Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Creates a client for `endpoint` (typically the value of `GAS_WEBAPP_URL`).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Config`] if `endpoint` is `None` or blank.
    /// - [`CatalogError::InvalidUrl`] if `endpoint` does not parse as a URL.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(endpoint: Option<&str>, user_agent: &str) -> Result<Self, CatalogError> {
        let endpoint = endpoint
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(CATALOG_URL_VAR.to_string()))?;

        // Apps Script deployments end in `/exec`; unlike REST bases the path
        // must be kept verbatim, so no trailing-slash normalisation here.
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CatalogError::InvalidUrl(format!("'{endpoint}': {e}")))?;

        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self { client, endpoint })
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let user_agent = if config.user_agent.trim().is_empty() {
            DEFAULT_USER_AGENT
        } else {
            config.user_agent.as_str()
        };
        Self::new(config.catalog_url.as_deref(), user_agent)
    }

    /// Fetches and normalizes the product catalog.
    ///
    /// Missing or malformed array fields in the payload become empty lists,
    /// and a missing `count` becomes the number of items.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::Status`] on a non-2xx HTTP status.
    /// - [`CatalogError::Parse`] if the body is not valid JSON.
    /// - [`CatalogError::Remote`] if the envelope has `"ok": false`.
    pub async fn fetch_catalog(&self) -> Result<CatalogPayload, CatalogError> {
        let url = self.list_products_url();
        tracing::debug!(action = LIST_PRODUCTS_ACTION, "requesting catalog");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope: serde_json::Value = serde_json::from_str(&body).map_err(CatalogError::Parse)?;
        Self::check_remote_error(&envelope)?;

        let payload = normalize_payload(&envelope);
        tracing::info!(
            count = payload.count,
            items = payload.items.len(),
            columns = payload.columns.len(),
            "catalog fetched"
        );
        Ok(payload)
    }

    /// Endpoint URL with `action=listProducts` appended to any query the
    /// deployment URL already carries.
    fn list_products_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", LIST_PRODUCTS_ACTION);
        url
    }

    /// Only an explicit `"ok": false` is a failure; a missing or non-boolean
    /// `ok` is treated as success.
    fn check_remote_error(envelope: &serde_json::Value) -> Result<(), CatalogError> {
        if envelope.get("ok").and_then(serde_json::Value::as_bool) == Some(false) {
            let msg = envelope
                .get("message")
                .and_then(serde_json::Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("unknown remote error")
                .to_string();
            return Err(CatalogError::Remote(msg));
        }
        Ok(())
    }
}
