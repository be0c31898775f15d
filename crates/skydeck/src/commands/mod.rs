//! Command dispatch: routes parsed CLI commands to their handlers.

pub mod auth;
pub mod config_cmd;
pub mod content;
pub mod drones;
pub mod util;

use std::sync::Arc;

use skydeck_core::ContentRepository;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a store-backed command. `Config`, `Completions`, `Login`,
/// and `Logout` are handled in `main` before a repository exists.
pub async fn dispatch(
    command: Command,
    repo: &Arc<ContentRepository>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Content(args) => content::handle(repo, args.command, global).await,
        Command::Drones(args) => drones::handle(repo, args.command, global).await,
        Command::Login { .. } | Command::Logout | Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled before repository construction")
        }
    }
}
