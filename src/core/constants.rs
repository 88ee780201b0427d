//! Constants used throughout ssm-migrate.
//!
//! Centralizes default names and environment variables.

/// Settings file looked up in the current directory when `--config` is not given.
pub const CONFIG_FILE: &str = "ssm-migrate.toml";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "SSM_MIGRATE_LOG";

/// Top-level path segment shared by old and new names.
pub const DEFAULT_NAMESPACE: &str = "asset-accounting";

/// Segment inserted after the namespace in new names.
pub const DEFAULT_SUBSYSTEM: &str = "serviceplatform";

/// Variables migrated when the settings file lists none.
pub const DEFAULT_VARIABLES: &[&str] = &["REDISCLOUD_URL"];

/// Credential profile for every non-production environment.
pub const STAGING_PROFILE: &str = "aa_stg";

/// Credential profile for production.
pub const PRODUCTION_PROFILE: &str = "aa_prod";
