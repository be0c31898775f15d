//! Config command handlers: init, path, show.

use skydeck_config::{Config, Profile};

use crate::cli::{ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(command: ConfigCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        ConfigCommand::Path => {
            println!("{}", skydeck_config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = skydeck_config::load_config_or_default();
            let rendered = toml::to_string_pretty(&cfg)
                .map_err(|e| CliError::Core(format!("failed to render config: {e}")))?;
            print!("{rendered}");
            Ok(())
        }

        ConfigCommand::Init => init(global),
    }
}

/// Interactive profile setup. Secrets go to the keyring via `login`,
/// never into the TOML file.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = skydeck_config::load_config_or_default();

    let name: String = dialoguer::Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let store: String = dialoguer::Input::new()
        .with_prompt("Store URL (e.g. https://store.example.com)")
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let blob_store: String = dialoguer::Input::new()
        .with_prompt("Blob store URL (empty = same as store)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let email: String = dialoguer::Input::new()
        .with_prompt("Admin email (empty = read-only)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let profile = Profile {
        store,
        blob_store: (!blob_store.is_empty()).then_some(blob_store),
        email: (!email.is_empty()).then_some(email),
        ..Profile::default()
    };

    cfg.profiles.insert(name.clone(), profile);
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(name.clone());
    }
    skydeck_config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!(
            "Profile '{name}' written to {}.\nRun `skydeck login` to obtain a session token.",
            skydeck_config::config_path().display()
        );
    }
    Ok(())
}
