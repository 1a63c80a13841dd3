//! Shared configuration for hubkit.
//!
//! TOML file + environment loading, API key resolution (flag, env var,
//! config, keyring), and translation to `hubkit_core::InventoryConfig`.
//! The CLI layers its global flags on top of what this crate loads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hubkit_core::{InventoryConfig, SerialPlan, TlsMode};

/// Keyring service name for stored API keys.
pub const KEYRING_SERVICE: &str = "hubkit";

/// Unprefixed variables honoured for compatibility with `.env`-style setups.
pub const RAW_ENV_KEYS: [&str; 2] = ["base_url", "api_key"];

/// String-typed keys. Environment values for these are taken verbatim so
/// figment never coerces `0123` or `true` into a number or bool.
pub const STRING_KEYS: [&str; 7] = [
    "base_url",
    "api_key",
    "api_key_env",
    "ca_cert",
    "export_path",
    "serial.prefix",
    "serial.sentinel",
];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no inventory base URL configured")]
    NoBaseUrl,

    #[error("no API key configured")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level hubkit configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Inventory service base URL (e.g., "https://inventory.example.com").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API key in plaintext; prefer the keyring or an env var.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Where `addresses export` writes its CSV.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// Hub serial numbering.
    #[serde(default)]
    pub serial: SerialPlan,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_key_env: None,
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            export_path: default_export_path(),
            serial: SerialPlan::default(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_export_path() -> PathBuf {
    PathBuf::from(hubkit_core::export::DEFAULT_EXPORT_PATH)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "hubkit", "hubkit").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hubkit");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` + environment.
///
/// Precedence, lowest first: built-in defaults, the TOML file, the bare
/// `BASE_URL` / `API_KEY` variables, then `HUBKIT_*` variables (nested
/// keys use `__`, e.g. `HUBKIT_SERIAL__START`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path));
    let figment = merge_verbatim(figment, &Env::raw().only(&RAW_ENV_KEYS))
        .merge(hubkit_env().ignore(&STRING_KEYS));
    let figment = merge_verbatim(figment, &hubkit_env().only(&STRING_KEYS));

    let config: Config = figment.extract()?;
    Ok(config)
}

fn hubkit_env() -> Env {
    Env::prefixed("HUBKIT_").split("__")
}

/// Merge every variable `env` yields as a plain string value.
fn merge_verbatim(figment: Figment, env: &Env) -> Figment {
    env.iter().fold(figment, |figment, (key, value)| {
        figment.merge(Serialized::default(key.as_str(), value))
    })
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Copy of `cfg` that is safe to print: the plaintext key is masked.
pub fn redacted(cfg: &Config) -> Config {
    Config {
        api_key: cfg.api_key.as_ref().map(|_| "********".into()),
        ..cfg.clone()
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key: flag → `api_key_env` variable → `api_key`
/// (config file or `API_KEY` / `HUBKIT_API_KEY`) → system keyring.
pub fn resolve_api_key(cfg: &Config, flag: Option<&str>) -> Result<SecretString, ConfigError> {
    resolve_api_key_with(cfg, flag, keyring_api_key)
}

fn resolve_api_key_with(
    cfg: &Config,
    flag: Option<&str>,
    keyring: impl FnOnce() -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Explicit flag
    if let Some(key) = flag {
        return Ok(SecretString::from(key.to_owned()));
    }

    // 2. Named env var
    if let Some(ref env_name) = cfg.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 3. Config / environment value
    if let Some(ref key) = cfg.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    // 4. System keyring
    keyring()
        .map(SecretString::from)
        .ok_or(ConfigError::NoCredentials)
}

fn keyring_api_key() -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, "api-key")
        .ok()?
        .get_password()
        .ok()
}

/// Build an `InventoryConfig` from a loaded config.
pub fn inventory_config(
    cfg: &Config,
    api_key_flag: Option<&str>,
) -> Result<InventoryConfig, ConfigError> {
    let raw = cfg.base_url.as_deref().ok_or(ConfigError::NoBaseUrl)?;
    let base_url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;

    let api_key = resolve_api_key(cfg, api_key_flag)?;

    Ok(InventoryConfig {
        base_url,
        api_key,
        tls: tls_mode(cfg),
        timeout: Duration::from_secs(cfg.timeout),
    })
}

fn tls_mode(cfg: &Config) -> TlsMode {
    if cfg.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = cfg.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    }
}
