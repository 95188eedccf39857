//! Module-aware projects built with the `go` command.

use std::path::{Path, PathBuf};

use super::{dir_name, Shell};
use crate::error::{Error, Result};
use crate::ports::Project;
use crate::script::ArgVector;

pub(crate) const GO_MOD: &str = "go.mod";

/// A Go module rooted at a directory containing `go.mod`.
pub struct GoCommandProject<'a> {
    root: PathBuf,
    shell: Shell<'a>,
}

impl<'a> GoCommandProject<'a> {
    /// Opens the module at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAProject`] unless `root/go.mod` is a file.
    pub fn open(root: impl Into<PathBuf>, shell: Shell<'a>) -> Result<Self> {
        let root = root.into();
        if !root.join(GO_MOD).is_file() {
            return Err(Error::NotAProject { root, reason: "no go.mod".into() });
        }
        Ok(Self { root, shell })
    }

    fn go(&self, args: &[&str]) -> Result<()> {
        let command = ArgVector::new("go").args(args.iter().copied()).arg("./...");
        self.shell.run(Some(&self.root), &[command])
    }
}

impl Project for GoCommandProject<'_> {
    fn build_tool(&self) -> &'static str {
        "go"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn name(&self) -> Result<String> {
        dir_name(&self.root)
    }

    fn build(&self) -> Result<()> {
        self.go(&["build"])
    }

    fn clean(&self) -> Result<()> {
        self.go(&["clean"])
    }

    fn nuke(&self) -> Result<()> {
        self.go(&["clean", "-cache", "-testcache"])
    }

    fn test(&self) -> Result<()> {
        self.go(&["test"])
    }
}
