//! Shared configuration for the Skydeck CLI and TUI.
//!
//! TOML profiles, credential resolution (keyring + env + plaintext),
//! and translation to `skydeck_core::StoreConfig`. Both binaries depend
//! on this crate -- the CLI adds flag-aware overrides on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use skydeck_core::{AdminCredentials, Locale, StoreConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

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

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named store profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Preferred display locale ("en" or "uk").
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            locale: default_locale(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_locale() -> String {
    "uk".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named store profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Store base URL (documents + identity), e.g. "https://store.example.com".
    pub store: String,

    /// Blob service base URL. Defaults to `store` when absent.
    pub blob_store: Option<String>,

    /// Admin account email.
    pub email: Option<String>,

    /// Admin password (plaintext -- prefer keyring or env).
    pub password: Option<String>,

    /// Environment variable name containing a session token.
    pub token_env: Option<String>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,

    /// Override the display locale for this profile.
    pub locale: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "skydeck", "skydeck").map_or_else(
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
    p.push("skydeck");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("SKYDECK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a stored session token: profile's `token_env`, then the
/// keyring entry written by `skydeck login`.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new("skydeck", &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    None
}

/// Resolve email + password for sign-in: env, keyring, then plaintext.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let email = profile
        .email
        .clone()
        .or_else(|| std::env::var("SKYDECK_EMAIL").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Env var
    if let Ok(pw) = std::env::var("SKYDECK_PASSWORD") {
        return Ok((email, SecretString::from(pw)));
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new("skydeck", &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok((email, SecretString::from(pw)));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok((email, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve `AdminCredentials` for a profile.
///
/// A stored token wins; otherwise email/password sign-in; otherwise
/// anonymous (read-only) access.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> AdminCredentials {
    if let Some(token) = resolve_token(profile, profile_name) {
        return AdminCredentials::Token(token);
    }

    match resolve_credentials(profile, profile_name) {
        Ok((email, password)) => AdminCredentials::Credentials { email, password },
        Err(_) => AdminCredentials::Anonymous,
    }
}

/// Parse a locale string, defaulting to the fallback on junk input.
pub fn parse_locale(raw: &str) -> Locale {
    raw.parse().unwrap_or(Locale::FALLBACK)
}

/// Build a `StoreConfig` from a profile -- no CLI flag overrides.
///
/// Suitable for the TUI and other non-CLI consumers.
pub fn profile_to_store_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<StoreConfig, ConfigError> {
    let api_url: url::Url = profile.store.parse().map_err(|_| ConfigError::Validation {
        field: "store".into(),
        reason: format!("invalid URL: {}", profile.store),
    })?;

    let blob_url = match profile.blob_store {
        Some(ref raw) => Some(raw.parse().map_err(|_| ConfigError::Validation {
            field: "blob_store".into(),
            reason: format!("invalid URL: {raw}"),
        })?),
        None => None,
    };

    let auth = resolve_auth(profile, profile_name);
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    let locale = parse_locale(profile.locale.as_deref().unwrap_or(&defaults.locale));

    Ok(StoreConfig {
        api_url,
        blob_url,
        auth,
        timeout,
        locale,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_locale_accepts_both_and_falls_back() {
        assert_eq!(parse_locale("uk"), Locale::Uk);
        assert_eq!(parse_locale("en"), Locale::En);
        assert_eq!(parse_locale("UK"), Locale::Uk);
        assert_eq!(parse_locale("fr"), Locale::FALLBACK);
    }

    #[test]
    fn profile_translation_validates_url() {
        let profile = Profile {
            store: "not a url".into(),
            ..Profile::default()
        };
        let err = profile_to_store_config(&profile, "default", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn profile_translation_uses_defaults() {
        let profile = Profile {
            store: "https://store.example.com".into(),
            ..Profile::default()
        };
        let cfg = profile_to_store_config(&profile, "default", &Defaults::default()).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.locale, Locale::Uk);
        assert_eq!(cfg.blob_url().as_str(), "https://store.example.com/");
    }
}
