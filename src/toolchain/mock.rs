use std::sync::Mutex;

use crate::error::{ChainedError, Result};
use crate::toolchain::Toolchain;

/// Toolchain double that records calls instead of building anything
#[derive(Default)]
pub struct MockToolchain {
    failing_clean: Option<String>,
    failing_install: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `clean` fail with `stderr` as the execution cause
    pub fn fail_clean(&mut self, stderr: impl Into<String>) {
        self.failing_clean = Some(stderr.into());
    }

    /// Make `install` fail with `stderr` as the execution cause
    pub fn fail_install(&mut self, stderr: impl Into<String>) {
        self.failing_install = Some(stderr.into());
    }

    /// Calls recorded so far: `clean` or `install <commit> <release> <package>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn failure(step: &str, stderr: &Option<String>) -> Result<()> {
    match stderr {
        Some(stderr) => Err(ChainedError::with_cause(
            format!("`go {}` failed: exit status: 1", step),
            ChainedError::new(stderr.as_str()),
        )
        .into()),
        None => Ok(()),
    }
}

impl Toolchain for MockToolchain {
    fn clean(&self) -> Result<()> {
        self.record("clean".to_string());
        failure("clean", &self.failing_clean)
    }

    fn install(&self, commit: &str, release: &str, package: &str) -> Result<()> {
        self.record(format!("install {} {} {}", commit, release, package));
        failure("install", &self.failing_install)
    }
}
