//! Build metadata reported at startup.

use std::fmt;

/// Version and build identifiers of the running binary.
///
/// `build_time` and `build_number` come from the `CWMONITOR_BUILD_TIME` and
/// `CWMONITOR_BUILD_NUMBER` variables at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: &'static str,
    pub build_number: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build_time: match option_env!("CWMONITOR_BUILD_TIME") {
                Some(t) => t,
                None => "unknown",
            },
            build_number: match option_env!("CWMONITOR_BUILD_NUMBER") {
                Some(n) => n,
                None => "local",
            },
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (version), {} (build time), {} (build number)",
            self.version, self.build_time, self.build_number
        )
    }
}
