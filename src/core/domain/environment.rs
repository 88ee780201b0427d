//! Deployment environment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::constants;

/// Environment whose parameters are migrated.
///
/// Picked once at startup. Also selects the default credential profile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Staging,
    Beta,
    Production,
}

impl Environment {
    /// Path segment for this environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Beta => "beta",
            Self::Production => "production",
        }
    }

    /// Credential profile used when none is configured.
    ///
    /// Production has its own profile; everything else shares staging's.
    pub fn default_profile(&self) -> &'static str {
        match self {
            Self::Production => constants::PRODUCTION_PROFILE,
            Self::Staging | Self::Beta => constants::STAGING_PROFILE,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
