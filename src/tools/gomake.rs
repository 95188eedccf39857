//! Projects built with `gomake` and tested with `gotest`.

use std::fs;
use std::path::{Path, PathBuf};

use super::{dir_name, Shell};
use crate::error::{Error, Result};
use crate::ports::Project;
use crate::script::ArgVector;

pub(crate) const MAKEFILE: &str = "Makefile";

/// A package directory with a `Makefile` and Go sources.
pub struct GoMakeProject<'a> {
    root: PathBuf,
    shell: Shell<'a>,
}

impl<'a> GoMakeProject<'a> {
    /// Opens the project at `root`.
    ///
    /// Only the top level of `root` is inspected: it must hold a `Makefile`
    /// and at least one `.go` file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAProject`] when either file is missing, or
    /// [`Error::Io`] when the directory cannot be read.
    pub fn open(root: impl Into<PathBuf>, shell: Shell<'a>) -> Result<Self> {
        let root = root.into();
        let not_a_project = |reason: &str| Error::NotAProject {
            root: root.clone(),
            reason: reason.to_string(),
        };
        if !root.is_dir() {
            return Err(not_a_project("not a directory"));
        }

        let mut makefile = false;
        let mut go_source = false;
        for entry in fs::read_dir(&root).map_err(|e| Error::io(&root, e))? {
            let path = entry.map_err(|e| Error::io(&root, e))?.path();
            if !path.is_file() {
                continue;
            }
            makefile |= path.file_name().is_some_and(|name| name == MAKEFILE);
            go_source |= path.extension().is_some_and(|ext| ext == "go");
        }

        if !makefile {
            return Err(not_a_project("no Makefile"));
        }
        if !go_source {
            return Err(not_a_project("no .go files"));
        }
        Ok(Self { root, shell })
    }

    fn run(&self, command: ArgVector) -> Result<()> {
        self.shell.run(Some(&self.root), &[command])
    }
}

impl Project for GoMakeProject<'_> {
    fn build_tool(&self) -> &'static str {
        "gomake"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn name(&self) -> Result<String> {
        dir_name(&self.root)
    }

    fn build(&self) -> Result<()> {
        self.run(ArgVector::new("gomake"))
    }

    fn clean(&self) -> Result<()> {
        self.run(ArgVector::new("gomake").arg("clean"))
    }

    fn nuke(&self) -> Result<()> {
        self.run(ArgVector::new("gomake").arg("nuke"))
    }

    fn test(&self) -> Result<()> {
        self.run(ArgVector::new("gotest"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{bash, FakeRunner};
    use super::*;
    use crate::ports::build_and_clean;

    fn package(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            fs::write(dir.path().join(file), "").unwrap();
        }
        dir
    }

    fn reason(result: Result<GoMakeProject<'_>>) -> String {
        match result {
            Err(Error::NotAProject { reason, .. }) => reason,
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("expected NotAProject"),
        }
    }

    #[test]
    fn needs_makefile_and_go_source() {
        let (shell, runner) = (bash(), FakeRunner::default());
        let shell = Shell::new(&shell, &runner);

        let no_makefile = package(&["main.go"]);
        assert_eq!(reason(GoMakeProject::open(no_makefile.path(), shell)), "no Makefile");

        let no_sources = package(&["Makefile", "README"]);
        assert_eq!(reason(GoMakeProject::open(no_sources.path(), shell)), "no .go files");

        let missing = no_sources.path().join("nowhere");
        assert_eq!(reason(GoMakeProject::open(missing, shell)), "not a directory");
    }

    #[test]
    fn go_sources_in_subdirectories_do_not_count() {
        let dir = package(&["Makefile"]);
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("x.go"), "").unwrap();

        let (shell, runner) = (bash(), FakeRunner::default());
        let result = GoMakeProject::open(dir.path(), Shell::new(&shell, &runner));
        assert_eq!(reason(result), "no .go files");
    }

    #[test]
    fn lifecycle_commands() {
        let dir = package(&["Makefile", "lib.go"]);
        let (shell, runner) = (bash(), FakeRunner::default());
        let project = GoMakeProject::open(dir.path(), Shell::new(&shell, &runner)).unwrap();

        build_and_clean(&project).unwrap();
        project.nuke().unwrap();
        project.test().unwrap();

        let last_lines: Vec<String> = runner
            .scripts()
            .iter()
            .map(|script| script.lines().last().unwrap().to_string())
            .collect();
        assert_eq!(last_lines, ["gomake", "gomake clean", "gomake nuke", "gotest"]);
    }

    #[test]
    fn failed_build_skips_clean() {
        let dir = package(&["Makefile", "lib.go"]);
        let (shell, runner) = (bash(), FakeRunner::default().failing_when("gomake"));
        let project = GoMakeProject::open(dir.path(), Shell::new(&shell, &runner)).unwrap();

        assert!(build_and_clean(&project).is_err());
        assert_eq!(runner.scripts().len(), 1);
    }
}
