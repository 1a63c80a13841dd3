use thiserror::Error;

/// Top-level error type for the `hubkit-api` crate.
///
/// Every variant that stems from a specific request carries the endpoint
/// path so callers can report which call failed. `hubkit-core` maps these
/// into its own transport error with the record index attached.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected by the service (HTTP 401 / 403).
    #[error("Invalid API key (rejected by {endpoint})")]
    InvalidApiKey { endpoint: String },

    /// API key cannot be encoded as an HTTP header value.
    #[error("Invalid API key header value: {message}")]
    InvalidHeader { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success HTTP status returned by the service.
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Unexpected response from {endpoint}: {message}")]
    Deserialization {
        endpoint: String,
        message: String,
        body: String,
    },
}

impl Error {
    /// The endpoint path this error originated from, when known.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::InvalidApiKey { endpoint }
            | Self::Status { endpoint, .. }
            | Self::Deserialization { endpoint, .. } => Some(endpoint),
            Self::Transport(e) => e.url().map(url::Url::path),
            _ => None,
        }
    }

    /// Returns `true` if the service rejected the credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::InvalidApiKey { .. })
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the service could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Status { status: 404, .. } => true,
            _ => false,
        }
    }
}
