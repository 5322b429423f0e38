use std::path::Path;

use chrono::Utc;
use log::{debug, warn};

use crate::command::NamedCommand;
use crate::error::Result;
use crate::notice::Notice;
use crate::toolchain::{format_build_timestamp, release_overrides, Toolchain};

/// Build-toolchain facade over the `go` command
pub struct GoToolchain {
    go: NamedCommand,
}

impl GoToolchain {
    /// Bind `go` from `PATH` to `work_dir`
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        Self::with_program("go", work_dir)
    }

    /// Bind a specific go executable to `work_dir`
    pub fn with_program<P: AsRef<Path>>(program: &str, work_dir: P) -> Self {
        GoToolchain {
            go: NamedCommand::new(program, work_dir),
        }
    }

    /// Output of `go version`, or `None` when it cannot be queried
    pub fn version(&self) -> Option<String> {
        match self.go.execute(&["version"]) {
            Ok(version) if !version.is_empty() => Some(version),
            Ok(_) => None,
            Err(err) => {
                warn!(
                    "{}",
                    Notice::ToolchainVersionUnavailable {
                        program: self.go.program().to_string(),
                        reason: err.render(),
                    }
                );
                None
            }
        }
    }
}

impl Toolchain for GoToolchain {
    /// `go clean -i ./...`
    fn clean(&self) -> Result<()> {
        self.go.execute(&["clean", "-i", "./..."])?;
        Ok(())
    }

    /// `go install -ldflags '-X "<pkg>.GitCommit=<commit>" ...'`
    fn install(&self, commit: &str, release: &str, package: &str) -> Result<()> {
        let timestamp = format_build_timestamp(Utc::now());
        let toolchain_version = self.version();

        let overrides = release_overrides(
            package,
            commit,
            release,
            &timestamp,
            toolchain_version.as_deref(),
        );
        let ldflags = overrides.to_ldflags();
        debug!("installing with -ldflags {}", ldflags);

        self.go.execute(&["install", "-ldflags", ldflags.as_str()])?;
        Ok(())
    }
}
