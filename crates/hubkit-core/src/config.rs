// ── Runtime connection configuration ──
//
// Describes how to reach the address inventory service. Carries the
// credential and transport tuning but never touches disk: the CLI builds
// an `InventoryConfig` from `hubkit-config` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use hubkit_api::{InventoryClient, TransportConfig};

pub use hubkit_api::TlsMode;

use crate::error::CoreError;

/// Connection settings for the address inventory service.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Service base URL; endpoint paths are joined onto it.
    pub base_url: Url,
    /// Static key sent as `X-API-Key`.
    pub api_key: SecretString,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl InventoryConfig {
    pub fn new(base_url: Url, api_key: SecretString) -> Self {
        Self {
            base_url,
            api_key,
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }

    /// Build an authenticated client for this service.
    pub fn connect(&self) -> Result<InventoryClient, CoreError> {
        Ok(InventoryClient::from_api_key(
            self.base_url.as_str(),
            &self.api_key,
            &self.transport(),
        )?)
    }
}
