//! Build-toolchain facade
//!
//! A release is built by cleaning previously installed artifacts and then
//! running the toolchain's install step with a set of link-time string
//! variable overrides carrying the release metadata.
//!
//! - [go::GoToolchain]: the `go` command, overrides passed through `-ldflags -X`
//! - [mock::MockToolchain]: records calls for orchestration tests

pub mod go;
pub mod mock;

pub use go::GoToolchain;
pub use mock::MockToolchain;

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::Result;

/// Variable receiving the commit hash the artifact was built from
pub const GIT_COMMIT: &str = "GitCommit";
/// Variable receiving the UTC build time
pub const BUILD_TIMESTAMP: &str = "BuildTimestamp";
/// Variable receiving the release label
pub const RELEASE_VERSION: &str = "ReleaseVersion";
/// Variable receiving the toolchain version, when it can be queried
pub const TOOLCHAIN_VERSION: &str = "GoVersion";

/// Build toolchain operations used by a release run
pub trait Toolchain: Send + Sync {
    /// Remove previously installed artifacts for the whole module tree
    fn clean(&self) -> Result<()>;

    /// Install the artifact with release metadata bound into `package`
    fn install(&self, commit: &str, release: &str, package: &str) -> Result<()>;
}

/// Flat name/value map of link-time variable overrides for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerOverrides {
    package: String,
    vars: BTreeMap<String, String>,
}

impl LinkerOverrides {
    pub fn new(package: impl Into<String>) -> Self {
        LinkerOverrides {
            package: package.into(),
            vars: BTreeMap::new(),
        }
    }

    /// Set `name` to `value`, replacing any previous value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a Go `-ldflags` value: `-X "pkg.Name=value" ...`
    ///
    /// Values containing a double quote are wrapped in single quotes instead.
    pub fn to_ldflags(&self) -> String {
        self.iter()
            .map(|(name, value)| {
                let assignment = format!("{}.{}={}", self.package, name, value);
                if assignment.contains('"') {
                    format!("-X '{}'", assignment)
                } else {
                    format!("-X \"{}\"", assignment)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Build timestamp in UTC, second precision: `2017-09-04T19:07:57Z`
pub fn format_build_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Overrides embedded by a release install.
pub fn release_overrides(
    package: &str,
    commit: &str,
    release: &str,
    timestamp: &str,
    toolchain_version: Option<&str>,
) -> LinkerOverrides {
    let overrides = LinkerOverrides::new(package)
        .with(GIT_COMMIT, commit)
        .with(BUILD_TIMESTAMP, timestamp)
        .with(RELEASE_VERSION, release);

    match toolchain_version {
        Some(version) => overrides.with(TOOLCHAIN_VERSION, version),
        None => overrides,
    }
}
