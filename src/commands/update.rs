//! `gotag update` command.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::Repository;
use crate::script::{ArgVector, CURRENT_DIR};
use crate::tools::{GitRepository, Shell};

/// Options for refreshing an installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Import path of the package under `$GOROOT/src/pkg`.
    pub import_path: String,
    /// Reinstall the package after fetching its tags.
    pub install: bool,
    /// Ask goinstall for verbose output.
    pub verbose: bool,
}

/// Directory of an installed package.
#[must_use]
pub fn package_path(goroot: &Path, import_path: &str) -> PathBuf {
    goroot.join("src").join("pkg").join(import_path)
}

/// The package directory as shown to the user.
#[must_use]
pub fn readable_package_path(import_path: &str) -> String {
    package_path(Path::new("$GOROOT"), import_path).display().to_string()
}

/// The `goinstall` invocation for `import_path`.
#[must_use]
pub fn goinstall_command(import_path: &str, verbose: bool) -> ArgVector {
    let command = ArgVector::new("goinstall").arg("-u");
    let command = if verbose { command.arg("-v") } else { command };
    command.arg(import_path)
}

/// Execute the `update` command.
///
/// # Errors
///
/// Returns [`Error::Config`] when `GOROOT` is unset or the package is not a
/// directory, and otherwise the first failure of the fetch or install.
pub fn run(ctx: &ServiceContext, options: &UpdateOptions) -> Result<()> {
    let goroot = ctx
        .config
        .goroot
        .as_deref()
        .ok_or_else(|| Error::Config("GOROOT is not set".into()))?;
    let root = package_path(goroot, &options.import_path);
    if !root.is_dir() {
        return Err(Error::Config(format!(
            "IMPORT {} is not a directory",
            readable_package_path(&options.import_path)
        )));
    }

    let shell = ctx.tools_shell();
    let repository = GitRepository::open(root, shell)?;
    update_tags(&repository, shell, options)
}

/// Fetches tags into `repository` and optionally reinstalls the package.
///
/// # Errors
///
/// Returns the first failure of the fetch or install.
pub fn update_tags(
    repository: &dyn Repository,
    shell: Shell<'_>,
    options: &UpdateOptions,
) -> Result<()> {
    eprintln!("Updating tags in {}", readable_package_path(&options.import_path));
    repository.fetch_tags()?;
    if options.install {
        eprintln!("Goinstalling {}", options.import_path);
        let install = goinstall_command(&options.import_path, options.verbose);
        shell.run(Some(Path::new(CURRENT_DIR)), &[install])?;
    }
    Ok(())
}
