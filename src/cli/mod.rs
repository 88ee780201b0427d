//! Command-line interface.

pub mod completions;
pub mod list;
pub mod migrate;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Overrides;
use crate::core::domain::Environment;

/// ssm-migrate - copy SSM parameters to a new naming hierarchy.
#[derive(Parser, Debug)]
#[command(
    name = "ssm-migrate",
    about = "Copy AWS SSM parameters from an old naming hierarchy to a new one",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (default: ./ssm-migrate.toml if present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Environment to migrate
    #[arg(short, long, global = true, value_enum, env = "SSM_MIGRATE_ENV")]
    pub env: Option<Environment>,

    /// AWS credential profile (default depends on environment)
    #[arg(short, long, global = true, env = "SSM_MIGRATE_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy every mapped parameter to its new name
    Migrate {
        /// Replace destination parameters that already exist
        #[arg(long)]
        overwrite: bool,
    },

    /// List every parameter in the store
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl Cli {
    /// Flag values that override the settings file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            environment: self.env,
            profile: self.profile.clone(),
            overwrite: matches!(self.command, Command::Migrate { overwrite: true }),
        }
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    let overrides = cli.overrides();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Migrate { .. } => migrate::execute(config_path, overrides),
        Command::List { json } => list::execute(config_path, overrides, json),
        Command::Completions { shell } => completions::execute(shell),
    }
}
