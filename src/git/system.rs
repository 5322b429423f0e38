use std::path::Path;

use log::debug;

use crate::command::NamedCommand;
use crate::error::{RegoError, Result};
use crate::git::VersionControl;

/// stderr marker git prints when a well-formed object name is absent
const BAD_OBJECT: &str = "bad object";

/// Version-control facade over the system `git` binary
pub struct SystemGit {
    git: NamedCommand,
}

impl SystemGit {
    /// Bind `git` to the repository rooted at `work_dir`
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        Self::with_program("git", work_dir)
    }

    /// Bind a specific git executable to `work_dir`
    pub fn with_program<P: AsRef<Path>>(program: &str, work_dir: P) -> Self {
        SystemGit {
            git: NamedCommand::new(program, work_dir),
        }
    }

    pub fn work_dir(&self) -> &Path {
        self.git.work_dir()
    }

    /// Resolve `refs/<namespace>/<name>` to a commit hash.
    ///
    /// Annotated tags are peeled to the commit they point at. Only a ref whose
    /// full name matches exactly is accepted, since `for-each-ref` patterns
    /// also match nested refs.
    fn resolve_ref(&self, namespace: &str, name: &str) -> Result<Option<String>> {
        if name.is_empty() {
            return Ok(None);
        }

        let full_name = format!("refs/{}/{}", namespace, name);
        let out = self.git.execute(&[
            "for-each-ref",
            "--format=%(refname)%09%(objectname)%09%(*objectname)",
            full_name.as_str(),
        ])?;

        let hash = out.lines().find_map(|line| {
            let mut fields = line.split('\t');
            let refname = fields.next()?;
            let object = fields.next().unwrap_or_default();
            let peeled = fields.next().unwrap_or_default();

            if refname != full_name {
                return None;
            }
            let hash = if peeled.is_empty() { object } else { peeled };
            (!hash.is_empty()).then(|| hash.to_string())
        });

        debug!("{} resolved to {:?}", full_name, hash);
        Ok(hash)
    }
}

impl VersionControl for SystemGit {
    fn status(&self) -> Result<String> {
        Ok(self.git.execute(&["status", "-s", "-uall"])?)
    }

    fn is_commit_exists(&self, hash: &str) -> Result<bool> {
        if hash.is_empty() {
            return Err(RegoError::EmptyCommit);
        }
        if hash.starts_with('-') {
            return Err(RegoError::InvalidCommit(hash.to_string()));
        }

        match self.git.execute(&["show", "-s", "--format=%H", hash]) {
            Ok(out) => Ok(out == hash),
            Err(err) if err.chain().any(|level| level.message().contains(BAD_OBJECT)) => {
                debug!("commit {} does not exist", hash);
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn checkout(&self, hash: &str) -> Result<()> {
        if hash.starts_with('-') {
            return Err(RegoError::InvalidCommit(hash.to_string()));
        }
        self.git.execute(&["checkout", hash])?;
        Ok(())
    }

    fn get_tag_commit(&self, tag: &str) -> Result<String> {
        self.resolve_ref("tags", tag)?
            .ok_or_else(|| RegoError::TagNotFound(tag.to_string()))
    }

    fn get_branch_commit(&self, branch: &str) -> Result<String> {
        self.resolve_ref("heads", branch)?
            .ok_or_else(|| RegoError::BranchNotFound(branch.to_string()))
    }
}
