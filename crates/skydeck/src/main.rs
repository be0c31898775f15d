mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skydeck_core::ContentRepository;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a store connection
        Command::Config(args) => commands::config_cmd::handle(args.command, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "skydeck", &mut std::io::stdout());
            Ok(())
        }

        // Identity commands manage the keyring themselves
        Command::Login { email } => commands::auth::login(email, &cli.global).await,
        Command::Logout => commands::auth::logout(&cli.global).await,

        // Everything else goes through a connected repository
        cmd => {
            let store_config = config::build_store_config(&cli.global)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let repo = Arc::new(ContentRepository::connect(&store_config).await?);
            commands::dispatch(cmd, &repo, &cli.global).await
        }
    }
}
