//! Release information of the rego binary itself.
//!
//! A release build of rego is produced the same way it produces releases of
//! Go programs: the metadata is handed in from outside at compile time through
//! `REGO_RELEASE_VERSION`, `REGO_GIT_COMMIT`, `REGO_BUILD_TIMESTAMP` and
//! `REGO_RUSTC_VERSION`. Plain `cargo build` leaves them unset.

const UNKNOWN: &str = "unknown";

/// Release information embedded at compile time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub release: String,
    pub commit: String,
    pub build_timestamp: String,
    pub toolchain: String,
}

impl BuildInfo {
    /// Information embedded into the running binary
    pub fn current() -> Self {
        Self::from_parts(
            option_env!("REGO_RELEASE_VERSION"),
            option_env!("REGO_GIT_COMMIT"),
            option_env!("REGO_BUILD_TIMESTAMP"),
            option_env!("REGO_RUSTC_VERSION"),
        )
    }

    /// Fill unset or blank parts: the release falls back to the package
    /// version, everything else to `unknown`.
    pub fn from_parts(
        release: Option<&str>,
        commit: Option<&str>,
        build_timestamp: Option<&str>,
        toolchain: Option<&str>,
    ) -> Self {
        fn or(value: Option<&str>, fallback: &str) -> String {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        }

        BuildInfo {
            release: or(release, env!("CARGO_PKG_VERSION")),
            commit: or(commit, UNKNOWN),
            build_timestamp: or(build_timestamp, UNKNOWN),
            toolchain: or(toolchain, UNKNOWN),
        }
    }
}
