//! List command - show every parameter in the store.

use std::path::Path;

use crate::cli::output;
use crate::core::config::{Config, Overrides};
use crate::core::domain::ParameterSummary;
use crate::core::store::{ParameterStore, Ssm};
use crate::error::Result;

/// List parameters visible to the configured profile.
pub fn execute(config_path: Option<&Path>, overrides: Overrides, json: bool) -> Result<()> {
    let config = Config::resolve(config_path, overrides)?;
    let store = Ssm::connect(config.profile(), config.region.as_deref())?;
    let parameters = store.list_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parameters)?);
        return Ok(());
    }

    render(store.profile(), &parameters);
    Ok(())
}

fn render(profile: &str, parameters: &[ParameterSummary]) {
    output::section(&format!("Parameters ({})", profile));
    if parameters.is_empty() {
        output::dimmed("no parameters found");
        return;
    }

    for param in parameters {
        match &param.description {
            Some(description) if !description.is_empty() => println!(
                "  {}  {}  {}",
                output::name(&param.name),
                param.kind,
                description
            ),
            _ => println!("  {}  {}", output::name(&param.name), param.kind),
        }
    }
}
