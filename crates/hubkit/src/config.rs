//! CLI configuration: thin wrapper around `hubkit_config`.
//!
//! Loads the shared config (from `--config` or the platform default) and
//! layers the global flags (--base-url, --api-key, --timeout, --insecure)
//! on top.

use hubkit_config::Config;
use hubkit_core::InventoryConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use hubkit_config::{config_path, redacted, save_config};

/// Config file in effect: `--config` if given, else the platform default.
pub fn active_path(global: &GlobalOpts) -> std::path::PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load the config file + environment, then apply flag overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = hubkit_config::load_config_from(&active_path(global))?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

/// CLI flags take priority over file and environment values.
fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.base_url {
        cfg.base_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
}

/// Resolve connection settings for the inventory service.
pub fn inventory_config(cfg: &Config, global: &GlobalOpts) -> Result<InventoryConfig, CliError> {
    Ok(hubkit_config::inventory_config(
        cfg,
        global.api_key.as_deref(),
    )?)
}
