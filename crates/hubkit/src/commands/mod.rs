//! Command handlers: bridge CLI args -> core pipelines -> output formatting.

pub mod addresses;
pub mod config_cmd;
pub mod hubs;
