// ── Core error types ──
//
// User-facing errors from hubkit-core. Transport failures from
// `hubkit-api` are folded into `Transport` with the endpoint and record
// index attached, so the CLI never has to inspect HTTP details.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::FieldKind;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation errors ────────────────────────────────────────────
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Invalid data type for {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },

    #[error("Hub id '{id}' does not end in a decimal digit")]
    MalformedKey { id: String },

    // ── Remote service errors ────────────────────────────────────────
    #[error(
        "Request to {endpoint} failed{}: {error}",
        .index.map(|i| format!(" (customer {i})")).unwrap_or_default()
    )]
    Transport {
        endpoint: String,
        index: Option<u64>,
        error: hubkit_api::Error,
    },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Failed to write {}: {message}", .path.display())]
    Export { path: PathBuf, message: String },

    // ── Serialization ────────────────────────────────────────────────
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Wrap an API error, recording which record index was being fetched.
    pub fn transport(err: hubkit_api::Error, index: Option<u64>) -> Self {
        Self::Transport {
            endpoint: err.endpoint().unwrap_or("<unknown>").to_owned(),
            index,
            error: err,
        }
    }

    /// The underlying API error, if this is a transport failure.
    pub fn api_error(&self) -> Option<&hubkit_api::Error> {
        match self {
            Self::Transport { error, .. } => Some(error),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hubkit_api::Error> for CoreError {
    fn from(err: hubkit_api::Error) -> Self {
        Self::transport(err, None)
    }
}
