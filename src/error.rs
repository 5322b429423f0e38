use std::fmt;

use thiserror::Error;

/// A message with an optional nested cause.
///
/// Rendered top-level first, each nested level on its own
/// `\tCaused by:` line. Descent stops at the first level whose message is
/// empty, so an execution failure with no stderr collapses to its outer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedError {
    message: String,
    cause: Option<Box<ChainedError>>,
}

impl ChainedError {
    /// Create a single-level error
    pub fn new(message: impl Into<String>) -> Self {
        ChainedError {
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error whose cause is `cause`
    pub fn with_cause(message: impl Into<String>, cause: ChainedError) -> Self {
        ChainedError {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Wrap this error under a new outer message
    pub fn wrap(self, message: impl Into<String>) -> Self {
        ChainedError::with_cause(message, self)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&ChainedError> {
        self.cause.as_deref()
    }

    /// Walks the chain from the outermost level to the innermost one.
    pub fn chain(&self) -> impl Iterator<Item = &ChainedError> {
        std::iter::successors(Some(self), |level| level.cause())
    }

    /// Full chained rendering of this error.
    pub fn render(&self) -> String {
        if self.message.is_empty() {
            return String::new();
        }

        match self.cause.as_deref().map(ChainedError::render) {
            Some(cause) if !cause.is_empty() => format!("{}\n\tCaused by: {}", self.message, cause),
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for ChainedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ChainedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Broad classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The repository or the request is not in a state that allows a release
    Precondition,
    /// An external program could not be spawned or exited unsuccessfully
    Execution,
}

/// Unified error type for rego operations
#[derive(Error, Debug)]
pub enum RegoError {
    #[error("{0}")]
    Execution(#[from] ChainedError),

    #[error("Uncommitted/untracked files:\n{0}")]
    DirtyWorkingTree(String),

    #[error("commit hash must not be empty")]
    EmptyCommit,

    #[error("Invalid commit specified: '{0}'")]
    InvalidCommit(String),

    #[error("tag '{0}' is not found")]
    TagNotFound(String),

    #[error("branch '{0}' is not found")]
    BranchNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in rego
pub type Result<T> = std::result::Result<T, RegoError>;

impl RegoError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RegoError::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegoError::Execution(_) | RegoError::Io(_) => ErrorKind::Execution,
            RegoError::DirtyWorkingTree(_)
            | RegoError::EmptyCommit
            | RegoError::InvalidCommit(_)
            | RegoError::TagNotFound(_)
            | RegoError::BranchNotFound(_)
            | RegoError::Config(_) => ErrorKind::Precondition,
        }
    }

    /// Convert into the chained form used for the final operator-facing message.
    pub fn into_chain(self) -> ChainedError {
        match self {
            RegoError::Execution(chain) => chain,
            other => ChainedError::new(other.to_string()),
        }
    }
}
