use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::ChainedError;

/// An external program bound to a working directory.
///
/// Each call to [`NamedCommand::execute`] spawns the program once with the
/// current process environment and blocks until it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCommand {
    program: String,
    work_dir: PathBuf,
}

impl NamedCommand {
    pub fn new(program: impl Into<String>, work_dir: impl AsRef<Path>) -> Self {
        NamedCommand {
            program: program.into(),
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run the program with `args`
    ///
    /// # Returns
    /// * `Ok(String)` - Standard output with surrounding whitespace trimmed
    /// * `Err(ChainedError)` - Spawn failure or non-zero exit; the outer message
    ///   describes the failure and the cause carries the trimmed standard error
    pub fn execute<S: AsRef<str>>(&self, args: &[S]) -> Result<String, ChainedError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let invocation = self.describe(&args);

        debug!("running `{}` in {}", invocation, self.work_dir.display());

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|e| ChainedError::new(format!("failed to run `{}`: {}", invocation, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("`{}` failed with {}", invocation, output.status);
            return Err(ChainedError::with_cause(
                format!("`{}` failed: {}", invocation, output.status),
                ChainedError::new(stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn describe(&self, args: &[&str]) -> String {
        if args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, args.join(" "))
        }
    }
}
