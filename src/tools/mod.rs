//! Tool families implementing the repository, project and toolchain ports.
//!
//! Every tool builds [`ArgVector`]s, renders them into a script for the
//! configured shell, and hands the result to a [`ScriptRunner`].

pub mod gocmd;
pub mod git;
pub mod gomake;
pub mod linker;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::ports::runner::{ScriptRequest, ScriptRunner};
use crate::ports::Project;
use crate::script::{render, ArgVector, Interpreter, ScriptError};

pub use gocmd::GoCommandProject;
pub use git::GitRepository;
pub use gomake::GoMakeProject;
pub use linker::LinkerToolchain;

/// Shell plus runner: everything a tool needs to execute commands.
#[derive(Clone, Copy)]
pub struct Shell<'a> {
    interpreter: &'a Interpreter,
    runner: &'a dyn ScriptRunner,
}

impl<'a> Shell<'a> {
    /// Runs scripts for `interpreter` through `runner`.
    #[must_use]
    pub fn new(interpreter: &'a Interpreter, runner: &'a dyn ScriptRunner) -> Self {
        Self { interpreter, runner }
    }

    /// Runs `commands` from `dir`, passing their output through.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or a command fails.
    pub fn run(&self, dir: Option<&Path>, commands: &[ArgVector]) -> Result<()> {
        let request = self.request(dir, commands)?;
        Ok(self.runner.run(&request)?)
    }

    /// Runs `commands` from `dir` and returns their standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or a command fails.
    pub fn output(&self, dir: Option<&Path>, commands: &[ArgVector]) -> Result<String> {
        let request = self.request(dir, commands)?;
        Ok(self.runner.output(&request)?)
    }

    fn request(&self, dir: Option<&Path>, commands: &[ArgVector]) -> Result<ScriptRequest> {
        let dir = dir.map(path_str).transpose()?;
        Ok(ScriptRequest::new(self.interpreter, render(dir, commands)?))
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        Error::Script(ScriptError::Quote {
            value: path.to_string_lossy().into_owned(),
            reason: "path is not valid UTF-8",
        })
    })
}

/// Base name of the absolute form of `root`.
pub(crate) fn dir_name(root: &Path) -> Result<String> {
    let absolute = fs::canonicalize(root).map_err(|e| Error::io(root, e))?;
    Ok(absolute
        .file_name()
        .map_or_else(|| absolute.display().to_string(), |name| name.to_string_lossy().into_owned()))
}

/// Picks the build tool for `root`: gomake when a `Makefile` is present,
/// otherwise the go command when there is a `go.mod`.
///
/// # Errors
///
/// Returns [`Error::NotAProject`] when neither applies, or the chosen
/// tool's own validation error.
pub fn detect_project<'a>(root: &Path, shell: Shell<'a>) -> Result<Box<dyn Project + 'a>> {
    if root.join(gomake::MAKEFILE).is_file() {
        return Ok(Box::new(GoMakeProject::open(root, shell)?));
    }
    if root.join(gocmd::GO_MOD).is_file() {
        return Ok(Box::new(GoCommandProject::open(root, shell)?));
    }
    Err(Error::NotAProject { root: root.to_path_buf(), reason: "no Makefile or go.mod".into() })
}
