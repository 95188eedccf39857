//! Environment-derived settings.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::script::{Interpreter, Interpreters};

/// Registry entry used to run tool scripts unless `GOTAG_SHELL` is set.
pub const DEFAULT_SHELL: &str = "bash";

/// Settings read from the environment (and an optional `.env` file).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// POSIX shell used to run tool scripts (`GOTAG_SHELL`).
    pub shell: Option<String>,
    /// Linker to query for the Go version (`GOTAG_LINKER`).
    pub linker: Option<String>,
    /// Go installation root (`GOROOT`).
    pub goroot: Option<PathBuf>,
    /// Cassette file to record script runs into (`GOTAG_RECORD`).
    pub record: Option<PathBuf>,
    /// Cassette file to replay script runs from (`GOTAG_REPLAY`).
    pub replay: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            shell: get("GOTAG_SHELL"),
            linker: get("GOTAG_LINKER"),
            goroot: get("GOROOT").map(PathBuf::from),
            record: get("GOTAG_RECORD").map(PathBuf::from),
            replay: get("GOTAG_REPLAY").map(PathBuf::from),
        }
    }

    /// Resolves the POSIX shell that runs tool scripts.
    ///
    /// `GOTAG_SHELL` names a shell executable invoked with `-c`; without it
    /// the registry's `bash` entry is used. Either way the result runs with
    /// `-e` so a failing line (such as the leading `cd`) aborts the script.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the registry has no default shell.
    pub fn shell(&self, interpreters: &Interpreters) -> Result<Interpreter> {
        let base = match self.shell.as_deref() {
            Some(program) => Interpreter::new(program, "-c", std::iter::empty::<String>()),
            None => interpreters.get(DEFAULT_SHELL).cloned().ok_or_else(|| {
                Error::Config(format!("no {DEFAULT_SHELL} interpreter registered; set GOTAG_SHELL"))
            })?,
        };
        Ok(base.with_extra_flags(["-e"]))
    }
}
