//! Shared fixtures: scratch Git repositories and a fake `go` executable.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Run git in `dir`, panicking with stderr on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Temporary repository laid out like a small GitFlow project:
///
/// - `master`: one commit adding `README`, tagged `v1.0`
/// - `develop`: one more commit adding `empty.go`
///
/// `master` is checked out when setup finishes.
pub struct TestRepo {
    dir: TempDir,
    pub master_head: String,
    pub develop_head: String,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let path = dir.path().to_path_buf();

        git(&path, &["init", "-q"]);
        git(&path, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        git(&path, &["config", "user.name", "Test User"]);
        git(&path, &["config", "user.email", "test@example.com"]);
        git(&path, &["config", "commit.gpgsign", "false"]);
        git(&path, &["config", "tag.gpgsign", "false"]);

        let repo = TestRepo {
            dir,
            master_head: String::new(),
            develop_head: String::new(),
        };

        let master_head = repo.commit_file("README", "Initial content\n", "Initial commit");
        git(&path, &["checkout", "-q", "-b", "develop"]);
        let develop_head = repo.commit_file("empty.go", "package main\n", "Adding empty.go");
        git(&path, &["checkout", "-q", "master"]);
        git(&path, &["tag", "v1.0"]);

        TestRepo {
            master_head,
            develop_head,
            ..repo
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self, args: &[&str]) -> String {
        git(self.path(), args)
    }

    /// Write `name`, commit it and return the new head hash
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> String {
        fs::write(self.path().join(name), content).expect("Could not write file");
        self.git(&["add", name]);
        self.git(&["commit", "-q", "-n", "-m", message]);
        self.head()
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Name of the checked-out branch, `HEAD` when detached
    pub fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }
}

const CALL_SEPARATOR: &str = "@@";

/// A shell script standing in for `go`.
///
/// Each invocation appends its arguments, one per line, to `calls.log` next
/// to the script. `go version` prints a fixed version string. Subcommands
/// passed to [FakeGo::failing] exit with status 1 and a message on stderr.
pub struct FakeGo {
    dir: TempDir,
}

impl FakeGo {
    pub const VERSION: &'static str = "go version go1.21.0 linux/amd64";

    pub fn new() -> Self {
        Self::failing(&[])
    }

    pub fn failing(subcommands: &[&str]) -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let log = dir.path().join("calls.log");

        let failures: String = subcommands
            .iter()
            .map(|sub| {
                format!(
                    "if [ \"$1\" = \"{sub}\" ]; then echo \"go {sub}: simulated failure\" >&2; exit 1; fi\n"
                )
            })
            .collect();

        let script = format!(
            "#!/bin/sh\n\
             for arg in \"$@\"; do printf '%s\\n' \"$arg\" >> \"{log}\"; done\n\
             echo \"{sep}\" >> \"{log}\"\n\
             {failures}\
             if [ \"$1\" = \"version\" ]; then echo \"{version}\"; fi\n\
             exit 0\n",
            log = log.display(),
            sep = CALL_SEPARATOR,
            failures = failures,
            version = Self::VERSION,
        );

        let path = dir.path().join("go");
        fs::write(&path, script).expect("Could not write fake go");
        make_executable(&path);

        FakeGo { dir }
    }

    pub fn program(&self) -> String {
        self.path().display().to_string()
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("go")
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Arguments of every invocation so far, oldest first
    pub fn calls(&self) -> Vec<Vec<String>> {
        let log = fs::read_to_string(self.dir.path().join("calls.log")).unwrap_or_default();
        let mut calls = Vec::new();
        let mut current = Vec::new();

        for line in log.lines() {
            if line == CALL_SEPARATOR {
                calls.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }

        calls
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path).expect("Could not stat").permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions).expect("Could not chmod");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
