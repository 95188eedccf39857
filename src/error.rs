//! Crate-level error type.

use std::io;
use std::path::PathBuf;

use crate::script::ScriptError;

/// Errors raised by the tool wrappers and workflows.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A script could not be rendered or run.
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Filesystem access failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Settings are missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The directory is not the root of a git work tree.
    #[error("{} is not a git repository (no .git directory)", .0.display())]
    NotARepository(PathBuf),

    /// No supported build tool recognizes the directory.
    #[error("{} is not a Go project: {reason}", root.display())]
    NotAProject {
        /// Directory that was inspected.
        root: PathBuf,
        /// What was missing.
        reason: String,
    },

    /// The toolchain printed something other than a version line.
    #[error("didn't understand Go version output {0:?}")]
    VersionOutput(String),

    /// No linker is known for this machine.
    #[error("unknown architecture {0}; set GOTAG_LINKER")]
    UnknownArch(String),

    /// The version tag exists and replacing it was not requested.
    #[error("tag {0} already exists; use --force to update it")]
    TagExists(String),

    /// Tagging HEAD requires a clean work tree.
    #[error("the repository has uncommitted changes; commit them and run gotag again")]
    DirtyWorkingTree,

    /// A cassette could not be loaded or written.
    #[error("cassette error: {0}")]
    Cassette(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Result alias for gotag operations.
pub type Result<T> = std::result::Result<T, Error>;
