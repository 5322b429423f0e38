//! Release workflow orchestration
//!
//! A run is an ordered pipeline of fallible steps:
//! validate, resolve target, compute release, checkout, build.
//! The first failing step ends the run; nothing is retried and nothing is
//! rolled back. A successful checkout leaves HEAD detached for the operator
//! to switch back manually.

use log::{debug, info, warn};

use crate::config::Config;
use crate::domain::{derive_release_label, is_full_hash, ResolvedTarget, TargetSelector};
use crate::error::{RegoError, Result};
use crate::git::{SystemGit, VersionControl};
use crate::notice::Notice;
use crate::toolchain::{GoToolchain, Toolchain};
use crate::ui;

/// Result of a successful release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// The selector that decided the target
    pub selector: TargetSelector,

    /// The commit that was built and the label embedded into it
    pub target: ResolvedTarget,
}

/// Run a release against the system `git` and `go` named in `config`.
pub fn run_release(config: &Config) -> Result<ReleaseOutcome> {
    let git = SystemGit::with_program(&config.tools.git, &config.work_dir);
    let go = GoToolchain::with_program(&config.tools.go, &config.work_dir);
    run_release_workflow(config, &git, &go)
}

/// Main release workflow
///
/// # Arguments
///
/// * `config` - Validated run configuration
/// * `vcs` - Version-control facade bound to the work directory
/// * `toolchain` - Build-toolchain facade bound to the work directory
///
/// # Returns
///
/// The resolved target on success, otherwise the error of the first failing step
pub fn run_release_workflow<V, T>(config: &Config, vcs: &V, toolchain: &T) -> Result<ReleaseOutcome>
where
    V: VersionControl + ?Sized,
    T: Toolchain + ?Sized,
{
    assert_clean_working_tree(vcs)?;

    let selector = TargetSelector::from_config(config);
    let commit = resolve_target_commit(&selector, vcs)?;

    let release = derive_release_label(&config.release, selector.tag(), &config.ignore_tag_prefix);
    debug!("release label: {}", release);

    let target = ResolvedTarget::new(commit, release);
    info!(
        "building commit {} as release {}",
        target.commit(),
        target.release()
    );

    checkout_target(vcs, &target)?;
    build_target(toolchain, &target, &config.package)?;

    Ok(ReleaseOutcome { selector, target })
}

/// Refuse to build from a tree with uncommitted or untracked files
pub fn assert_clean_working_tree<V: VersionControl + ?Sized>(vcs: &V) -> Result<()> {
    let status = vcs.status()?;
    if !status.is_empty() {
        return Err(RegoError::DirtyWorkingTree(status));
    }
    debug!("working tree is clean");
    Ok(())
}

/// Resolve the commit to build, consulting only the authoritative selector
pub fn resolve_target_commit<V: VersionControl + ?Sized>(
    selector: &TargetSelector,
    vcs: &V,
) -> Result<String> {
    match selector {
        TargetSelector::Tag(tag) => {
            debug!("using tag: {}", tag);
            vcs.get_tag_commit(tag)
        }
        TargetSelector::Commit(commit) => {
            debug!("using commit: {}", commit);
            if !is_full_hash(commit) {
                warn!("commit '{}' is not a full object name and will not match", commit);
            }
            if vcs.is_commit_exists(commit)? {
                Ok(commit.clone())
            } else {
                Err(RegoError::InvalidCommit(commit.clone()))
            }
        }
        TargetSelector::Branch(branch) => {
            let commit = vcs.get_branch_commit(branch)?;
            debug!("using branch '{}' commit: {}", branch, commit);
            Ok(commit)
        }
    }
}

/// Detach the working tree at the target commit and tell the operator
pub fn checkout_target<V: VersionControl + ?Sized>(vcs: &V, target: &ResolvedTarget) -> Result<()> {
    vcs.checkout(target.commit())?;
    ui::display_notice(&Notice::DetachedCheckout {
        commit: target.commit().to_string(),
    });
    Ok(())
}

/// Clean, then install; a failed clean never reaches install
pub fn build_target<T: Toolchain + ?Sized>(
    toolchain: &T,
    target: &ResolvedTarget,
    package: &str,
) -> Result<()> {
    debug!("building from commit '{}'", target.commit());
    ui::display_status(&format!(
        "Installing release {} with release information in package {}",
        target.release(),
        package
    ));
    toolchain.clean()?;
    toolchain.install(target.commit(), target.release(), package)
}
