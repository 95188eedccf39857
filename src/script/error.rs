//! Errors raised while quoting, rendering, or running scripts.

use std::io;

/// Failure kinds of the script layer.
///
/// Start failures and non-zero exits are kept apart so callers can tell a
/// missing interpreter from a tool that ran and refused.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A value cannot be represented as a single shell token.
    #[error("cannot quote {value:?}: {reason}")]
    Quote {
        /// The offending value.
        value: String,
        /// Why it cannot be quoted.
        reason: &'static str,
    },

    /// The interpreter could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that was being started.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("{program} {}", exit_description(.code.as_ref()))]
    Execution {
        /// Program that failed.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Tail of the captured standard error, empty when not redirected.
        stderr: String,
    },

    /// The caller cancelled the script before it finished.
    #[error("{program} was cancelled")]
    Cancelled {
        /// Program that was killed.
        program: String,
    },

    /// Copying one of the redirected streams failed.
    #[error("stream error while running {program}: {source}")]
    Io {
        /// Program whose streams failed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ScriptError {
    /// Captured standard error for execution failures, if any was recorded.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Execution { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

fn exit_description(code: Option<&i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}
