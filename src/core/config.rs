//! Run settings.
//!
//! Settings come from built-in defaults, then an optional `ssm-migrate.toml`,
//! then command-line flags. The result is validated once before any store
//! call is made.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::Environment;
use crate::core::mapping::{NameMapping, PathLayout};
use crate::error::ConfigError;

/// Settings for one migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Environment segment of every mapped name
    pub environment: Environment,
    /// Credential profile; derived from the environment when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Region override; the profile's region is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Leading path segment shared by old and new names
    pub namespace: String,
    /// Segment inserted after the namespace in new names
    pub subsystem: String,
    /// Variables to migrate, in order
    pub variables: Vec<String>,
    /// Replace destination parameters that already exist
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            profile: None,
            region: None,
            namespace: constants::DEFAULT_NAMESPACE.to_string(),
            subsystem: constants::DEFAULT_SUBSYSTEM.to_string(),
            variables: constants::DEFAULT_VARIABLES
                .iter()
                .map(|v| v.to_string())
                .collect(),
            overwrite: false,
        }
    }
}

/// Values given on the command line. `None` leaves the file value in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub environment: Option<Environment>,
    pub profile: Option<String>,
    pub overwrite: bool,
}

impl Config {
    /// Default settings file in the current directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Parse settings from TOML text.
    ///
    /// `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file can't be read, or
    /// `ConfigError::Parse` if it isn't valid settings TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Resolve the settings for a run.
    ///
    /// An explicit `path` must exist. Without one, the default file is used
    /// if present, otherwise the built-in defaults. Overrides are applied
    /// last and the result is validated.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load(&path)?
                } else {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };

        if let Some(environment) = overrides.environment {
            config.environment = environment;
        }
        if let Some(profile) = overrides.profile {
            config.profile = Some(profile);
        }
        config.overwrite |= overrides.overwrite;

        config.validate()?;
        debug!(
            environment = %config.environment,
            profile = config.profile(),
            variables = config.variables.len(),
            overwrite = config.overwrite,
            "config resolved"
        );
        Ok(config)
    }

    /// Check settings before use.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoVariables` for an empty variable list,
    /// `ConfigError::InvalidSegment` for an empty path segment or one
    /// containing `/`, and `ConfigError::EmptyProfile` for a blank profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_segment("namespace", &self.namespace)?;
        validate_segment("subsystem", &self.subsystem)?;

        if self.variables.is_empty() {
            return Err(ConfigError::NoVariables);
        }
        for variable in &self.variables {
            validate_segment("variable", variable)?;
        }

        if matches!(&self.profile, Some(p) if p.trim().is_empty()) {
            return Err(ConfigError::EmptyProfile);
        }
        Ok(())
    }

    /// Credential profile for this run.
    pub fn profile(&self) -> &str {
        self.profile
            .as_deref()
            .unwrap_or_else(|| self.environment.default_profile())
    }

    /// Path layout for old and new names.
    pub fn layout(&self) -> PathLayout {
        PathLayout::new(&self.namespace, &self.subsystem)
    }

    /// Old-to-new mapping for the configured environment and variables.
    pub fn mapping(&self) -> NameMapping {
        NameMapping::build(&self.layout(), self.environment, &self.variables)
    }
}

fn validate_segment(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() || value.contains('/') {
        return Err(ConfigError::InvalidSegment {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
