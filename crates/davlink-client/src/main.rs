//! davlink CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use davlink_client::cli::{Cli, Command, ConfigAction};
use davlink_client::commands;
use davlink_client::config::ClientConfig;
use davlink_client::error::ClientResult;
use davlink_core::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is loaded first so its `debug` key can raise the log level
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.tracing_config(cli.debug)) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    match cli.config {
        Some(ref path) => ClientConfig::load_from(path),
        None => ClientConfig::load(),
    }
}

async fn run(cli: Cli, config: ClientConfig) -> ClientResult<()> {
    match cli.command {
        Command::Link {
            user,
            url,
            username,
            password,
        } => commands::link::link(user, url, username, password, &config).await,
        Command::List { user } => commands::list::list(user, &config).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config),
        },
    }
}
