//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help
//! text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use skydeck_config::ConfigError;
use skydeck_core::CoreError;

/// Exit codes for scripting.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const VALIDATION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the content store")]
    #[diagnostic(
        code(skydeck::fetch_failed),
        help("Check the store URL and your network connection.\n{message}")
    )]
    Fetch { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(skydeck::auth_failed),
        help(
            "Sign in again with: skydeck login\n\
             Or set the SKYDECK_TOKEN environment variable.\n{message}"
        )
    )]
    Auth { message: String },

    #[error("No store configured")]
    #[diagnostic(
        code(skydeck::no_config),
        help(
            "Create a profile with: skydeck config init\n\
             Or pass --store / set SKYDECK_STORE.\n\
             Config file: {path}"
        )
    )]
    NoConfig { path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} '{identifier}' not found")]
    #[diagnostic(
        code(skydeck::not_found),
        help("Run: skydeck {list_command} to see available entries")
    )]
    NotFound {
        resource: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(skydeck::validation))]
    Validation { field: String, reason: String },

    // ── Upload ───────────────────────────────────────────────────────
    #[error("Upload failed: {message}")]
    #[diagnostic(
        code(skydeck::upload_failed),
        help("The content record was not written; retry the command.")
    )]
    Upload { message: String },

    // ── Wrapped core / config / IO ───────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(skydeck::core))]
    Core(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(skydeck::config))]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    #[diagnostic(code(skydeck::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Stable exit code for scripting.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Fetch { .. } => exit_code::CONNECTION,
            Self::Auth { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::VALIDATION,
            Self::NoConfig { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Fetch { message } => Self::Fetch { message },
            CoreError::Auth { message } => Self::Auth { message },
            CoreError::NotFound { resource, id } => Self::NotFound {
                resource: resource.to_owned(),
                identifier: id,
                list_command: match resource {
                    "drone model" => "drones list".to_owned(),
                    _ => "content list <drone>".to_owned(),
                },
            },
            CoreError::Upload { message } => Self::Upload { message },
            CoreError::Validation { message } => Self::Validation {
                field: "form".into(),
                reason: message,
            },
            other => Self::Core(other.to_string()),
        }
    }
}
