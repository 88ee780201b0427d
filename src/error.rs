//! Error types.
//!
//! Every failure surfaces to `main`, which prints it and exits non-zero.
//! Nothing is retried or recovered locally.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Migrate(#[from] MigrateError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings and credential resolution failures.
///
/// All of these abort the run before any parameter is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("no variables configured")]
    NoVariables,

    #[error("invalid {field}: {value:?} (must be non-empty and contain no '/')")]
    InvalidSegment { field: &'static str, value: String },

    #[error("credential profile must not be empty")]
    EmptyProfile,

    #[error("failed to load AWS config for profile {profile}: {reason}")]
    Load { profile: String, reason: String },
}

/// Failures reported by a parameter store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("parameter not found: {0}")]
    NotFound(String),

    #[error("rejected by store: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unsupported parameter type {kind:?} on {name}")]
    UnsupportedType { name: String, kind: String },

    #[error("store response for {name} is missing {field}")]
    MissingField { name: String, field: &'static str },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Failures while copying one parameter.
///
/// Each variant names the operation that failed and the parameter it
/// failed on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrateError {
    #[error("source parameter not found: {name}")]
    SourceNotFound { name: String },

    #[error("failed to get source parameter {name}: {source}")]
    SourceFetch {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("no description metadata found for {name}")]
    DescriptionNotFound { name: String },

    #[error("failed to describe source parameter {name}: {source}")]
    DescriptionFetch {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to put destination parameter {name}: {source}")]
    DestinationWrite {
        name: String,
        #[source]
        source: StoreError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
