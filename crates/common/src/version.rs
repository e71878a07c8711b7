use std::fmt;

use serde::Serialize;

/// Build metadata exported by a binary's `build.rs`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_profile: &'static str,
    pub build_features: &'static str,
    pub build_timestamp: &'static str,
    pub rust_version: &'static str,
    pub target: Option<&'static str>,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version:   {}", self.version)?;
        writeln!(f, "profile:   {}", self.build_profile)?;
        writeln!(f, "features:  {}", self.build_features)?;
        writeln!(f, "built at:  {}", self.build_timestamp)?;
        write!(f, "rustc:     {}", self.rust_version)?;
        if let Some(target) = self.target {
            write!(f, "\ntarget:    {}", target)?;
        }
        Ok(())
    }
}

/// Capture [`BuildInfo`] from the calling crate's build environment.
///
/// Expands `env!` at the call site, so the caller's `build.rs` must export
/// `REPO_VERSION`, `BUILD_PROFILE`, `BUILD_FEATURES`, `BUILD_TIMESTAMP` and
/// `RUST_VERSION`.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::version::BuildInfo {
            version: env!("REPO_VERSION"),
            build_profile: env!("BUILD_PROFILE"),
            build_features: env!("BUILD_FEATURES"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            rust_version: env!("RUST_VERSION"),
            target: option_env!("BUILD_TARGET"),
        }
    };
}
