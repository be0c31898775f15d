//! Sign-in / sign-out command handlers.
//!
//! `login` obtains a session token from the identity endpoint and stores
//! it in the system keyring under `skydeck/{profile}/token`; every later
//! invocation picks it up through the credential chain.

use secrecy::{ExposeSecret, SecretString};

use skydeck_core::ContentRepository;

use crate::cli::GlobalOpts;
use crate::config::{active_profile_name, build_store_config};
use crate::error::CliError;

fn token_entry(profile: &str) -> Result<keyring::Entry, CliError> {
    keyring::Entry::new("skydeck", &format!("{profile}/token"))
        .map_err(|e| CliError::Core(format!("keyring unavailable: {e}")))
}

pub async fn login(email: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let store_cfg = build_store_config(global)?;
    let cfg = skydeck_config::load_config_or_default();
    let profile = active_profile_name(global, &cfg);

    let email = match email {
        Some(email) => email,
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };

    let password = SecretString::from(
        rpassword::prompt_password("Password: ").map_err(CliError::Io)?,
    );

    let token = ContentRepository::sign_in(&store_cfg, &email, &password).await?;

    token_entry(&profile)?
        .set_password(token.expose_secret())
        .map_err(|e| CliError::Core(format!("failed to store token: {e}")))?;

    crate::output::print_success(
        &format!("Signed in as {email} (profile '{profile}')"),
        &global.color,
        global.quiet,
    );
    Ok(())
}

pub async fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = skydeck_config::load_config_or_default();
    let profile = active_profile_name(global, &cfg);

    // Best-effort server-side invalidation before discarding locally.
    if let Ok(store_cfg) = build_store_config(global) {
        if let Ok(entry) = token_entry(&profile) {
            if let Ok(token) = entry.get_password() {
                ContentRepository::sign_out(&store_cfg, &SecretString::from(token)).await;
            }
        }
    }

    match token_entry(&profile)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => {}
        Err(e) => return Err(CliError::Core(format!("failed to remove token: {e}"))),
    }

    crate::output::print_success(
        &format!("Signed out (profile '{profile}')"),
        &global.color,
        global.quiet,
    );
    Ok(())
}
