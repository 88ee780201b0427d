//! Migrate command - copy every mapped parameter to its new name.

use std::path::Path;

use crate::cli::output;
use crate::core::config::{Config, Overrides};
use crate::core::migrate::{MigrationEvent, Migrator};
use crate::core::store::Ssm;
use crate::error::Result;

/// Copy all parameters for the configured environment.
///
/// Stops at the first failure; pairs already copied stay copied.
pub fn execute(config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    let config = Config::resolve(config_path, overrides)?;
    let mapping = config.mapping();

    output::section(&format!("Migrating {}", config.environment));
    output::kv("profile:", config.profile());
    output::kv("parameters:", mapping.len());
    if config.overwrite {
        output::warn("existing destination parameters will be replaced");
    }

    let store = Ssm::connect(config.profile(), config.region.as_deref())?;
    let migrator = Migrator::new(store).overwrite(config.overwrite);

    let report = migrator.run_with(&mapping, |event| match event {
        MigrationEvent::Copying(pair) => {
            println!();
            output::kv("from:", output::name(&pair.old));
            output::kv("to:  ", output::name(&pair.new));
            output::progress("copying");
        }
        MigrationEvent::Copied(copied) => {
            output::progress_done(true);
            output::kv("type:", copied.source.kind());
            output::kv("value:", copied.source.display_value());
            if !copied.description.is_empty() {
                output::kv("description:", &copied.description);
            }
        }
        MigrationEvent::Failed(..) => output::progress_done(false),
    })?;

    let count = report.copied.len();
    println!();
    output::success(&format!(
        "copied {} parameter{}",
        count,
        if count == 1 { "" } else { "s" }
    ));
    Ok(())
}
