//! Entry points used by the `rego` binary

pub mod orchestration;

pub use orchestration::{run_release, run_release_workflow, ReleaseOutcome};
