use std::fmt;

/// Non-fatal, operator-facing messages emitted during a release run.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The working tree was moved to a detached commit and is left there
    DetachedCheckout { commit: String },
    /// The toolchain version could not be queried, so it is not embedded
    ToolchainVersionUnavailable { program: String, reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DetachedCheckout { commit } => write!(
                f,
                "Commit '{}' is checked out, don't forget to switch back to your working reference.",
                commit
            ),
            Notice::ToolchainVersionUnavailable { program, reason } => {
                write!(
                    f,
                    "Could not query the version of '{}', it will not be embedded: {}",
                    program, reason
                )
            }
        }
    }
}
