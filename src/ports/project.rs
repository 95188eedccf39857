//! Project port for build verification.

use std::path::Path;

use crate::error::Result;

/// A buildable source tree.
pub trait Project {
    /// Name of the build tool driving this project.
    fn build_tool(&self) -> &'static str;

    /// Project root directory.
    fn root(&self) -> &Path;

    /// Logical project name.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be resolved.
    fn name(&self) -> Result<String>;

    /// Builds the project.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails.
    fn build(&self) -> Result<()>;

    /// Removes build outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if cleaning fails.
    fn clean(&self) -> Result<()>;

    /// Removes build outputs and installed artifacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the full clean fails.
    fn nuke(&self) -> Result<()>;

    /// Runs the project's tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the tests fail.
    fn test(&self) -> Result<()>;
}

/// Builds `project` and cleans up after it, proving the tree still compiles.
///
/// # Errors
///
/// Returns the first failure of either step.
pub fn build_and_clean(project: &dyn Project) -> Result<()> {
    project.build()?;
    project.clean()
}
