//! Test support utilities for ssm-migrate integration tests.

#![allow(dead_code)]

pub mod assertions;

#[allow(unused_imports)]
pub use assertions::*;

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated working directory.
///
/// Child processes run with `.current_dir()` pointed at the temp dir, so
/// a stray `ssm-migrate.toml` in the repo never leaks into a test.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    /// Create an empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with `ssm-migrate.toml` written.
    pub fn with_config(contents: &str) -> Self {
        let t = Self::new();
        t.write("ssm-migrate.toml", contents);
        t
    }

    /// Write a file into the test directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// An ssm-migrate command isolated from the caller's environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ssm-migrate").expect("failed to find ssm-migrate binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("SSM_MIGRATE_ENV");
        cmd.env_remove("SSM_MIGRATE_PROFILE");
        cmd.env_remove("SSM_MIGRATE_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// An ssm-migrate command whose AWS shared config lives in the test
    /// directory and lists only `[profile other]`.
    ///
    /// No ambient credential source is reachable, so credential resolution
    /// for any other profile fails without network access.
    pub fn aws_cmd(&self) -> Command {
        let config = self.write("aws_config", "[profile other]\nregion = us-east-1\n");
        let credentials = self.write("aws_credentials", "");

        let mut cmd = self.cmd();
        cmd.env("AWS_CONFIG_FILE", config);
        cmd.env("AWS_SHARED_CREDENTIALS_FILE", credentials);
        cmd.env("AWS_REGION", "us-east-1");
        cmd.env("AWS_EC2_METADATA_DISABLED", "true");
        for var in [
            "AWS_ACCESS_KEY_ID",
            "AWS_SECRET_ACCESS_KEY",
            "AWS_SESSION_TOKEN",
            "AWS_PROFILE",
            "AWS_DEFAULT_PROFILE",
            "AWS_WEB_IDENTITY_TOKEN_FILE",
            "AWS_ROLE_ARN",
            "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI",
            "AWS_CONTAINER_CREDENTIALS_FULL_URI",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }
}
