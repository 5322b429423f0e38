//! Version-control facade
//!
//! The [VersionControl] trait lists the narrow set of Git operations a release
//! needs: a cleanliness check, ref resolution, commit lookup and checkout.
//!
//! - [system::SystemGit]: runs the system `git` binary through [crate::command::NamedCommand]
//! - [mock::MockVersionControl]: in-memory double that records every call
//!
//! The orchestrator depends on the trait only, so precedence and abort rules
//! can be tested without a repository on disk.

pub mod mock;
pub mod system;

pub use mock::MockVersionControl;
pub use system::SystemGit;

use crate::error::Result;

/// Git operations used by a release run
pub trait VersionControl: Send + Sync {
    /// Short-form status of the working tree, untracked files included.
    ///
    /// An empty string means the tree is clean.
    fn status(&self) -> Result<String>;

    /// Whether `hash` names an existing commit.
    ///
    /// # Returns
    /// * `Ok(true)` - The lookup echoed back exactly `hash`
    /// * `Ok(false)` - The object does not exist in the repository
    /// * `Err` - `hash` is empty, malformed, or the repository is unusable
    fn is_commit_exists(&self, hash: &str) -> Result<bool>;

    /// Move the working tree to `hash`, leaving HEAD detached.
    fn checkout(&self, hash: &str) -> Result<()>;

    /// Commit a tag points at. Fails with [crate::RegoError::TagNotFound] when the ref is absent.
    fn get_tag_commit(&self, tag: &str) -> Result<String>;

    /// Head commit of a local branch. Fails with [crate::RegoError::BranchNotFound] when absent.
    fn get_branch_commit(&self, branch: &str) -> Result<String>;
}
