//! Toolchain port for version discovery.

use std::fmt;

use crate::error::Result;

/// Version reported by the Go toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoVersion {
    /// Release name, such as `weekly.2011-11-02` or `r60.3`.
    pub version: String,
    /// Source revision number.
    pub revision: u64,
}

impl GoVersion {
    /// Repository tag for this version.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("go.{}", self.version)
    }

    /// Annotation attached to the version tag.
    #[must_use]
    pub fn annotation(&self) -> String {
        format!("Latest build for Go version {}", self.version)
    }
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.version, self.revision)
    }
}

/// Reports which Go toolchain is installed.
pub trait Toolchain {
    /// Program queried for the version.
    fn program(&self) -> &str;

    /// Queries the toolchain version.
    ///
    /// # Errors
    ///
    /// Returns an error if the toolchain cannot be run or its output is not understood.
    fn version(&self) -> Result<GoVersion>;
}
