//! Git work trees.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{dir_name, Shell};
use crate::error::{Error, Result};
use crate::ports::{NewTag, Repository};
use crate::script::ArgVector;

/// A git work tree driven through the `git` command line.
pub struct GitRepository<'a> {
    root: PathBuf,
    shell: Shell<'a>,
}

impl<'a> GitRepository<'a> {
    /// Opens the work tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotARepository`] unless `root/.git` is a directory.
    pub fn open(root: impl Into<PathBuf>, shell: Shell<'a>) -> Result<Self> {
        let root = root.into();
        let git_dir = root.join(".git");
        match fs::metadata(&git_dir) {
            Ok(meta) if meta.is_dir() => Ok(Self { root, shell }),
            Ok(_) => Err(Error::NotARepository(root)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::NotARepository(root)),
            Err(err) => Err(Error::io(git_dir, err)),
        }
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        self.shell.run(Some(&self.root), &[git(args)])
    }
}

fn git(args: &[&str]) -> ArgVector {
    ArgVector::new("git").args(args.iter().copied())
}

impl Repository for GitRepository<'_> {
    fn root(&self) -> &Path {
        &self.root
    }

    fn kind(&self) -> &'static str {
        "git"
    }

    fn name(&self) -> Result<String> {
        dir_name(&self.root)
    }

    fn tags(&self) -> Result<Vec<String>> {
        let listing = self.shell.output(Some(&self.root), &[git(&["tag", "-l"])])?;
        Ok(listing.split_whitespace().map(str::to_string).collect())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        debug!(tag = name, "deleting tag");
        self.run(&["tag", "-d", name])
    }

    fn create_tag(&self, tag: &NewTag<'_>) -> Result<()> {
        debug!(tag = tag.name, commit = ?tag.commit, "creating tag");
        let mut command = git(&["tag"]);
        if let Some(annotation) = tag.annotation {
            command = command.args(["-a", "-m", annotation]);
        }
        command = command.arg(tag.name);
        if let Some(commit) = tag.commit {
            command = command.arg(commit);
        }
        self.shell.run(Some(&self.root), &[command])
    }

    fn fetch_tags(&self) -> Result<()> {
        self.run(&["fetch", "--tags"])
    }

    fn push_tags(&self) -> Result<()> {
        self.run(&["push", "--tags"])
    }

    fn is_clean(&self) -> Result<bool> {
        let status = self.shell.output(Some(&self.root), &[git(&["status", "--porcelain"])])?;
        Ok(status.trim().is_empty())
    }
}
