//! `skydeck-tui` — Terminal viewer and admin panel for drone-model content.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `skydeck-core`'s [`ContentSync`](skydeck_core::ContentSync). One screen:
//! the tabbed content browser (specifications / photos / videos) with a
//! lightbox, plus the add/edit form and delete confirmation overlays.
//!
//! Logs are written to a file (default `/tmp/skydeck-tui.log`) to avoid
//! corrupting the terminal UI. Background tasks stream content snapshots
//! from the store into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, eyre};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use skydeck_core::{AdminCredentials, ContentRepository, Locale, StoreConfig, ViewerTab};

use crate::app::App;

/// Initial tab hint, as a CLI value.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum TabArg {
    Specifications,
    #[default]
    Photos,
    Videos,
}

impl From<TabArg> for ViewerTab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Specifications => ViewerTab::Specifications,
            TabArg::Photos => ViewerTab::Photos,
            TabArg::Videos => ViewerTab::Videos,
        }
    }
}

/// Terminal viewer and admin panel for drone-model content.
#[derive(Parser, Debug)]
#[command(name = "skydeck-tui", version, about)]
struct Cli {
    /// Store base URL (e.g., https://store.example.com)
    #[arg(short = 's', long, env = "SKYDECK_STORE")]
    store: Option<String>,

    /// Session token
    #[arg(long, env = "SKYDECK_TOKEN", hide_env = true)]
    token: Option<String>,

    /// Profile name from the shared config file
    #[arg(short = 'p', long, env = "SKYDECK_PROFILE")]
    profile: Option<String>,

    /// Drone model to open initially
    #[arg(short = 'd', long)]
    drone: Option<String>,

    /// Tab to open initially
    #[arg(short = 't', long, default_value = "photos")]
    tab: TabArg,

    /// Display language override ("en" or "uk")
    #[arg(long)]
    locale: Option<String>,

    /// Log file path (defaults to /tmp/skydeck-tui.log)
    #[arg(long, default_value = "/tmp/skydeck-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("skydeck_tui={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("skydeck-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build a [`StoreConfig`] from CLI flags, if a URL was provided.
fn config_from_flags(cli: &Cli) -> Option<Result<StoreConfig>> {
    let url_str = cli.store.as_deref()?;
    let api_url = match url_str.parse() {
        Ok(url) => url,
        Err(e) => return Some(Err(eyre!("invalid store URL '{url_str}': {e}"))),
    };

    let auth = match &cli.token {
        Some(token) => AdminCredentials::Token(SecretString::from(token.clone())),
        None => AdminCredentials::Anonymous,
    };

    Some(Ok(StoreConfig {
        api_url,
        blob_url: None,
        auth,
        timeout: std::time::Duration::from_secs(30),
        locale: Locale::Uk,
    }))
}

/// Load a [`StoreConfig`] from the shared config file.
fn config_from_file(cli: &Cli) -> Result<StoreConfig> {
    let cfg = skydeck_config::load_config()
        .map_err(|e| eyre!("failed to load config: {e}"))?;
    let profile_name = cli
        .profile
        .clone()
        .or(cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());
    let profile = cfg.profiles.get(&profile_name).ok_or_else(|| {
        eyre!(
            "no profile '{profile_name}' in {} — run `skydeck config init` or pass --store",
            skydeck_config::config_path().display()
        )
    })?;
    skydeck_config::profile_to_store_config(profile, &profile_name, &cfg.defaults)
        .map_err(|e| eyre!("invalid profile '{profile_name}': {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        store = cli.store.as_deref().unwrap_or("(from config)"),
        "starting skydeck-tui"
    );

    // Priority: CLI flags > config file
    let mut store_config = match config_from_flags(&cli) {
        Some(result) => result?,
        None => config_from_file(&cli)?,
    };
    if let Some(ref raw) = cli.locale {
        store_config.locale = skydeck_config::parse_locale(raw);
    }

    let locale = store_config.locale;
    let repo = Arc::new(
        ContentRepository::connect(&store_config)
            .await
            .map_err(|e| eyre!("failed to connect to the store: {e}"))?,
    );

    let mut app = App::new(repo, locale, cli.drone.as_deref(), cli.tab.into());
    app.run().await?;

    Ok(())
}
