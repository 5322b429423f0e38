//! Domain logic - pure release rules independent of git and the toolchain

pub mod release;
pub mod target;

pub use release::{derive_release_label, SNAPSHOT};
pub use target::{is_full_hash, ResolvedTarget, TargetSelector};
