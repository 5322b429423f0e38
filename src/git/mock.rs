use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{ChainedError, RegoError, Result};
use crate::git::VersionControl;

/// In-memory version-control double for testing without a repository.
///
/// Every trait call is recorded as `"<operation> <argument>"` so tests can
/// assert which operations a run performed and in what order.
#[derive(Default)]
pub struct MockVersionControl {
    status: String,
    tags: HashMap<String, String>,
    branches: HashMap<String, String>,
    commits: HashSet<String>,
    failing_checkout: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockVersionControl {
    /// Create a new clean mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `status()` report `status` as uncommitted content
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Add a commit that `is_commit_exists` will recognize
    pub fn add_commit(&mut self, hash: impl Into<String>) {
        self.commits.insert(hash.into());
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        let hash = hash.into();
        self.commits.insert(hash.clone());
        self.tags.insert(name.into(), hash);
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        let hash = hash.into();
        self.commits.insert(hash.clone());
        self.branches.insert(name.into(), hash);
    }

    /// Make `checkout` fail with `stderr` as the execution cause
    pub fn fail_checkout(&mut self, stderr: impl Into<String>) {
        self.failing_checkout = Some(stderr.into());
    }

    /// Calls recorded so far, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, operation: &str, argument: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{} {}", operation, argument).trim_end().to_string());
        }
    }
}

impl VersionControl for MockVersionControl {
    fn status(&self) -> Result<String> {
        self.record("status", "");
        Ok(self.status.clone())
    }

    fn is_commit_exists(&self, hash: &str) -> Result<bool> {
        self.record("is_commit_exists", hash);
        if hash.is_empty() {
            return Err(RegoError::EmptyCommit);
        }
        Ok(self.commits.contains(hash))
    }

    fn checkout(&self, hash: &str) -> Result<()> {
        self.record("checkout", hash);
        match &self.failing_checkout {
            Some(stderr) => Err(ChainedError::with_cause(
                format!("`git checkout {}` failed: exit status: 1", hash),
                ChainedError::new(stderr.as_str()),
            )
            .into()),
            None => Ok(()),
        }
    }

    fn get_tag_commit(&self, tag: &str) -> Result<String> {
        self.record("get_tag_commit", tag);
        self.tags
            .get(tag)
            .cloned()
            .ok_or_else(|| RegoError::TagNotFound(tag.to_string()))
    }

    fn get_branch_commit(&self, branch: &str) -> Result<String> {
        self.record("get_branch_commit", branch);
        self.branches
            .get(branch)
            .cloned()
            .ok_or_else(|| RegoError::BranchNotFound(branch.to_string()))
    }
}
