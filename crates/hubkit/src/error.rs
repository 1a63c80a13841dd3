//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use hubkit_config::ConfigError;
use hubkit_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const VALIDATION: i32 = 9;
    pub const EXPORT: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the inventory service ({endpoint}): {message}")]
    #[diagnostic(
        code(hubkit::connection_failed),
        help(
            "Check that the service is running and the base URL is correct.\n\
             Set it with --base-url, BASE_URL, or `base_url` in the config file."
        )
    )]
    ConnectionFailed { endpoint: String, message: String },

    #[error("Request to {endpoint} timed out")]
    #[diagnostic(
        code(hubkit::timeout),
        help("Increase the timeout with --timeout or check service responsiveness.")
    )]
    Timeout { endpoint: String },

    #[error("Request to {endpoint} failed{index}: {message}")]
    #[diagnostic(code(hubkit::transport))]
    Transport {
        endpoint: String,
        index: String,
        message: String,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("API key rejected by {endpoint}")]
    #[diagnostic(
        code(hubkit::auth_failed),
        help("Verify the key passed via --api-key, API_KEY, or the config file.")
    )]
    AuthFailed { endpoint: String },

    #[error("No API key configured")]
    #[diagnostic(
        code(hubkit::no_credentials),
        help(
            "Pass --api-key, set API_KEY or HUBKIT_API_KEY,\n\
             or add `api_key` / `api_key_env` to {path}"
        )
    )]
    NoCredentials { path: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Missing field: {field}")]
    #[diagnostic(
        code(hubkit::missing_field),
        help("Every record must carry `{field}`; nothing was written.")
    )]
    MissingField { field: String },

    #[error("Invalid data type for {field}: expected {expected}, found {found}")]
    #[diagnostic(code(hubkit::type_mismatch))]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    #[error("Hub id '{id}' does not end in a digit")]
    #[diagnostic(
        code(hubkit::malformed_key),
        help("Drop --strict to sort such hubs ahead of all numbered ones.")
    )]
    MalformedKey { id: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hubkit::validation))]
    Validation { field: String, reason: String },

    // ── Output ───────────────────────────────────────────────────────

    #[error("Could not write {path}: {message}")]
    #[diagnostic(
        code(hubkit::export_failed),
        help("Check that the target directory exists and is writable.")
    )]
    Export { path: String, message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No inventory base URL configured")]
    #[diagnostic(
        code(hubkit::no_base_url),
        help(
            "Pass --base-url, set BASE_URL or HUBKIT_BASE_URL,\n\
             or add `base_url` to {path}"
        )
    )]
    NoBaseUrl { path: String },

    #[error("Configuration could not be loaded: {message}")]
    #[diagnostic(code(hubkit::config))]
    Config { message: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(code(hubkit::config_exists), help("Use --force to overwrite it."))]
    ConfigExists { path: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(hubkit::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(hubkit::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::MissingField { .. }
            | Self::TypeMismatch { .. }
            | Self::MalformedKey { .. }
            | Self::Json(_) => exit_code::VALIDATION,
            Self::Export { .. } => exit_code::EXPORT,
            Self::Validation { .. } | Self::NoBaseUrl { .. } | Self::ConfigExists { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingField { field } => CliError::MissingField { field },

            CoreError::TypeMismatch {
                field,
                expected,
                found,
            } => CliError::TypeMismatch {
                field,
                expected: expected.to_string(),
                found: found.to_string(),
            },

            CoreError::MalformedKey { id } => CliError::MalformedKey { id },

            CoreError::Transport {
                endpoint,
                index,
                error,
            } => {
                if error.is_auth_failure() {
                    CliError::AuthFailed { endpoint }
                } else if error.is_timeout() {
                    CliError::Timeout { endpoint }
                } else if error.is_connect() {
                    CliError::ConnectionFailed {
                        endpoint,
                        message: error.to_string(),
                    }
                } else {
                    CliError::Transport {
                        endpoint,
                        index: index.map(|i| format!(" (customer {i})")).unwrap_or_default(),
                        message: error.to_string(),
                    }
                }
            }

            CoreError::Export { path, message } => CliError::Export {
                path: path.display().to_string(),
                message,
            },

            CoreError::Json(e) => CliError::Json(e),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let path = hubkit_config::config_path().display().to_string();
        match err {
            ConfigError::NoBaseUrl => CliError::NoBaseUrl { path },
            ConfigError::NoCredentials => CliError::NoCredentials { path },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
