//! Repository port for version-control tagging.

use std::path::Path;

use crate::error::Result;

/// A tag to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTag<'a> {
    /// Tag name.
    pub name: &'a str,
    /// Annotation message; `None` creates a lightweight tag.
    pub annotation: Option<&'a str>,
    /// Commit to tag; `None` tags HEAD.
    pub commit: Option<&'a str>,
}

/// Tag operations on a version-controlled work tree.
pub trait Repository {
    /// Root directory of the work tree.
    fn root(&self) -> &Path;

    /// Short name of the version-control system.
    fn kind(&self) -> &'static str;

    /// Logical repository name.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be resolved.
    fn name(&self) -> Result<String>;

    /// Lists local tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag listing fails.
    fn tags(&self) -> Result<Vec<String>>;

    /// Deletes a local tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be deleted.
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created.
    fn create_tag(&self, tag: &NewTag<'_>) -> Result<()>;

    /// Fetches tags from the default remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn fetch_tags(&self) -> Result<()>;

    /// Pushes local tags to the default remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the push fails.
    fn push_tags(&self) -> Result<()>;

    /// Whether the work tree has no uncommitted changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be read.
    fn is_clean(&self) -> Result<bool>;
}
