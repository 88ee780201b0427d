//! ssm-migrate - copy AWS SSM parameters to a new naming hierarchy.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ssm_migrate::cli::output;
use ssm_migrate::cli::{execute, Cli};
use ssm_migrate::core::constants;
use ssm_migrate::error::{ConfigError, Error, MigrateError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ssm_migrate=debug")
        } else {
            EnvFilter::new("ssm_migrate=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::Load { .. }) => {
            Some("check --profile and that the profile has a region and credentials")
        }
        Error::Config(ConfigError::NoVariables) => {
            Some("list the parameters to copy under `variables` in ssm-migrate.toml")
        }
        Error::Migrate(MigrateError::DestinationWrite { .. }) => {
            Some("if the destination already exists, re-run with --overwrite")
        }
        Error::Migrate(MigrateError::SourceNotFound { .. }) => {
            Some("check --env and the namespace in ssm-migrate.toml")
        }
        _ => None,
    }
}
