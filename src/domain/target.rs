use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::Config;

/// Which reference decides the commit to build.
///
/// Exactly one selector is authoritative per run, picked by fixed precedence:
/// tag, then commit, then branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    Tag(String),
    Commit(String),
    Branch(String),
}

impl TargetSelector {
    /// Select from raw fields; empty fields are treated as absent
    pub fn select(tag: &str, commit: &str, branch: &str) -> Self {
        if !tag.is_empty() {
            TargetSelector::Tag(tag.to_string())
        } else if !commit.is_empty() {
            TargetSelector::Commit(commit.to_string())
        } else {
            TargetSelector::Branch(branch.to_string())
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::select(&config.tag, &config.commit, &config.branch)
    }

    /// Tag name when a tag drives the run
    pub fn tag(&self) -> Option<&str> {
        match self {
            TargetSelector::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSelector::Tag(tag) => write!(f, "Tag: {}", tag),
            TargetSelector::Commit(commit) => write!(f, "Commit: {}", commit),
            TargetSelector::Branch(branch) => write!(f, "Branch: {}", branch),
        }
    }
}

/// The commit a run builds and the label embedded into the artifact.
///
/// Created once per run and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    commit: String,
    release: String,
}

impl ResolvedTarget {
    pub fn new(commit: impl Into<String>, release: impl Into<String>) -> Self {
        ResolvedTarget {
            commit: commit.into(),
            release: release.into(),
        }
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub fn release(&self) -> &str {
        &self.release
    }
}

/// Whether `hash` is a full, lowercase object name (SHA-1 or SHA-256)
pub fn is_full_hash(hash: &str) -> bool {
    static FULL_HASH: OnceLock<Option<Regex>> = OnceLock::new();
    FULL_HASH
        .get_or_init(|| Regex::new(r"^(?:[0-9a-f]{40}|[0-9a-f]{64})$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(hash))
}
