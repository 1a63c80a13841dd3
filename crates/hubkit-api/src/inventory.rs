// Async HTTP client for the customer address inventory service.
//
// Endpoints (relative to the configured base URL):
//   GET customer_numbers          -> bare integer
//   GET address_inventory/{n}     -> one address object
// Auth: X-API-Key header

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path of the customer count endpoint.
pub const COUNT_PATH: &str = "customer_numbers";

/// Path prefix of the per-customer address endpoint.
pub const ADDRESS_PATH: &str = "address_inventory";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the address inventory service.
///
/// Every request carries the API key as a default header. Responses are
/// returned as loosely typed JSON so field validation can happen in
/// `hubkit-core` with precise error reporting.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl InventoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, API key, and transport config.
    ///
    /// Injects `X-API-Key` as a sensitive default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::InvalidHeader {
                message: e.to_string(),
            })?;
        key_value.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with a slash so relative joins append
    /// instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Total number of customers.
    ///
    /// `GET customer_numbers`
    pub async fn customer_count(&self) -> Result<u64, Error> {
        debug!("fetching customer count");
        self.get(COUNT_PATH).await
    }

    /// Address record of one customer, as raw JSON.
    ///
    /// `GET address_inventory/{customer_number}` (1-based)
    pub async fn customer_address(&self, customer_number: u64) -> Result<serde_json::Value, Error> {
        debug!(customer_number, "fetching customer address");
        self.get(&format!("{ADDRESS_PATH}/{customer_number}")).await
    }

    // ── HTTP ─────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.base_url.join(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(path, resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::InvalidApiKey {
                endpoint: endpoint.to_owned(),
            });
        }

        let body = resp.text().await?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                preview(&body)
            };
            return Err(Error::Status {
                endpoint: endpoint.to_owned(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            endpoint: endpoint.to_owned(),
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
