//! ---
//! mv_section: "01-core-functionality"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Shared primitives and utilities for the Megaverse client."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---

/// Compile-time version metadata captured via `vergen`.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub semver: String,
    pub git_sha: String,
    pub build_timestamp: String,
    pub target: String,
    pub profile: String,
}

impl VersionInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            semver: env!("CARGO_PKG_VERSION").to_owned(),
            git_sha: option_env!("VERGEN_GIT_SHA")
                .unwrap_or("UNKNOWN")
                .to_owned(),
            build_timestamp: option_env!("VERGEN_BUILD_TIMESTAMP")
                .unwrap_or("UNKNOWN")
                .to_owned(),
            target: option_env!("VERGEN_CARGO_TARGET_TRIPLE")
                .unwrap_or("UNKNOWN")
                .to_owned(),
            profile: option_env!("VERGEN_CARGO_PROFILE")
                .unwrap_or("UNKNOWN")
                .to_owned(),
        }
    }

    /// Banner used in the first log line of each run.
    #[must_use]
    pub fn banner(&self) -> String {
        format!("megaverse v{} (git {})", self.semver, self.git_sha)
    }

    /// Extended string suitable for `--version` flags.
    #[must_use]
    pub fn extended(&self) -> String {
        format!(
            "{banner}\nBuilt: {built}\nTarget: {target}\nProfile: {profile}",
            banner = self.banner(),
            built = self.build_timestamp,
            target = self.target,
            profile = self.profile
        )
    }
}
