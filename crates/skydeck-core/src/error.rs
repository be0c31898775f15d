// ── Core error types ──
//
// User-facing errors from skydeck-core. These are NOT wire-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<skydeck_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Read path ────────────────────────────────────────────────────
    /// A query against the store failed (transport or auth).
    #[error("Failed to fetch content: {message}")]
    Fetch { message: String },

    // ── Mutation targets ─────────────────────────────────────────────
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    // ── Blob writes ──────────────────────────────────────────────────
    #[error("Upload failed: {message}")]
    Upload { message: String },

    // ── Form validation (caught before any I/O) ──────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Identity ─────────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Convenience constructor for validation failures.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<skydeck_api::Error> for CoreError {
    fn from(err: skydeck_api::Error) -> Self {
        match err {
            skydeck_api::Error::Authentication { message } => CoreError::Auth { message },
            skydeck_api::Error::SessionExpired => CoreError::Auth {
                message: "session expired -- sign in again".into(),
            },
            skydeck_api::Error::Transport(e) => CoreError::Fetch {
                message: e.to_string(),
            },
            skydeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            skydeck_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Fetch {
                message: match code {
                    Some(code) => format!("{message} ({code}, HTTP {status})"),
                    None => format!("{message} (HTTP {status})"),
                },
            },
            skydeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
