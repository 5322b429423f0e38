//! User interface module - reports and console formatting.
//!
//! - `formatter` - printing with colors
//! - This module - plain-text reports built from run state

pub mod formatter;

pub use formatter::{
    display_error, display_notice, display_report, display_status, display_success,
};

use crate::config::Config;
use crate::domain::TargetSelector;
use crate::version::BuildInfo;

/// Summary of the inputs of a run, printed before it starts in verbose mode.
pub fn input_report(config: &Config) -> String {
    format!(
        "Working directory: {}\nTarget: {}\nRelease Version: {}\nIgnore tag prefix: {}\nPackage: {}\n",
        config.work_dir.display(),
        TargetSelector::from_config(config),
        config.release,
        config.ignore_tag_prefix,
        config.package,
    )
}

/// The tool's own release information, printed by `--version`.
pub fn version_report(info: &BuildInfo) -> String {
    format!(
        "Release: {}\nCommit: {}\nBuild Time: {}\nBuilt with: {}\n",
        info.release, info.commit, info.build_timestamp, info.toolchain
    )
}
