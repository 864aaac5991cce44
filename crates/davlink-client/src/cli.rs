//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// davlink - Link CalDAV calendar accounts
#[derive(Debug, Parser)]
#[command(name = "davlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "DAVLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify a CalDAV account and store it for a user
    Link {
        /// User the account is linked to
        #[arg(long, env = "DAVLINK_USER")]
        user: Option<String>,

        /// CalDAV endpoint URL
        #[arg(long)]
        url: String,

        /// CalDAV username
        #[arg(long)]
        username: String,

        /// CalDAV password (supports `pass::` and `env::` prefixes)
        #[arg(long, env = "DAVLINK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List the CalDAV accounts linked to a user
    List {
        /// User whose accounts are listed
        #[arg(long, env = "DAVLINK_USER")]
        user: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
