//! Config-file + CLI-flag resolution into a `StoreConfig`.

use std::time::Duration;

use secrecy::SecretString;

use skydeck_config::Config;
use skydeck_core::{AdminCredentials, StoreConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name to use: `--profile` flag, then the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `StoreConfig` from the config file, profile, and CLI overrides.
pub fn build_store_config(global: &GlobalOpts) -> Result<StoreConfig, CliError> {
    let cfg = skydeck_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // If a profile exists, use it with CLI flag overrides.
    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut store_cfg =
            skydeck_config::profile_to_store_config(profile, &profile_name, &cfg.defaults)?;
        apply_overrides(&mut store_cfg, global)?;
        return Ok(store_cfg);
    }

    // No profile found -- try to build from CLI flags / env vars alone.
    let url_str = global.store.as_deref().ok_or_else(|| CliError::NoConfig {
        path: skydeck_config::config_path().display().to_string(),
    })?;

    let api_url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "store".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let auth = match global.token {
        Some(ref token) => AdminCredentials::Token(SecretString::from(token.clone())),
        None => AdminCredentials::Anonymous,
    };

    Ok(StoreConfig {
        api_url,
        blob_url: None,
        auth,
        timeout: Duration::from_secs(global.timeout),
        locale: skydeck_config::parse_locale(&cfg.defaults.locale),
    })
}

fn apply_overrides(store_cfg: &mut StoreConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref url_str) = global.store {
        store_cfg.api_url = url_str.parse().map_err(|_| CliError::Validation {
            field: "store".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }

    if let Some(ref token) = global.token {
        store_cfg.auth = AdminCredentials::Token(SecretString::from(token.clone()));
    }

    store_cfg.timeout = Duration::from_secs(global.timeout);
    Ok(())
}
