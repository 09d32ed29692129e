// ── Core error types ──
//
// User-facing errors from larder-core. Consumers never see HTTP status
// lines or JSON parse failures directly; the `From<larder_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach item backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the item backend timed out")]
    Timeout,

    #[error("Item backend rejected our credentials (HTTP {status})")]
    Unauthorized { status: u16 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Translate a backend error for a request about one item, so a 404
    /// names the item rather than the request.
    pub(crate) fn for_item(err: larder_api::Error, id: &str) -> Self {
        if err.is_not_found() {
            CoreError::NotFound {
                entity_type: "item".into(),
                identifier: id.to_owned(),
            }
        } else {
            err.into()
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<larder_api::Error> for CoreError {
    fn from(err: larder_api::Error) -> Self {
        match err {
            larder_api::Error::Api { message, .. } if err.is_not_found() => CoreError::NotFound {
                entity_type: "item".into(),
                identifier: message,
            },
            larder_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            larder_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            larder_api::Error::UnsupportedUrl(url) => CoreError::Config {
                message: format!("Unsupported backend URL: {url}"),
            },
            larder_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            larder_api::Error::Unauthorized { status } => CoreError::Unauthorized { status },
            larder_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            larder_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
