//! `gotag tag` command.
//!
//! Tags the repository at the root with `go.<version>` for the installed
//! Go toolchain, after proving the project still builds with it.

use std::path::PathBuf;

use tracing::info;

use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::{build_and_clean, GoVersion, NewTag, Repository, Toolchain};
use crate::tools::{detect_project, GitRepository, LinkerToolchain};

/// Options for one tagging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    /// Project and repository root.
    pub root: PathBuf,
    /// Replace an existing tag of the same name.
    pub force: bool,
    /// Fetch remote tags before looking for a conflict.
    pub fetch: bool,
    /// Push tags once the new one is created.
    pub push: bool,
    /// Commit to tag instead of HEAD.
    pub commit: Option<String>,
    /// Log toolchain details.
    pub verbose: bool,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            force: false,
            fetch: true,
            push: true,
            commit: None,
            verbose: false,
        }
    }
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    /// Name of the created tag.
    pub tag: String,
    /// Whether an existing tag was deleted first.
    pub replaced: bool,
    /// Whether tags were pushed.
    pub pushed: bool,
}

/// Execute the `tag` command.
///
/// # Errors
///
/// Returns the first failure: version discovery, project detection, the
/// build check, opening the repository, or any tagging step.
pub fn run(ctx: &ServiceContext, options: &TagOptions) -> Result<TagOutcome> {
    let shell = ctx.tools_shell();
    let toolchain = LinkerToolchain::from_config(&ctx.config, shell)?;
    let version = toolchain.version()?;
    if options.verbose {
        info!("  Linker: {}", toolchain.program());
        info!(" Version: {}", version.version);
        info!("Revision: {}", version.revision);
        info!("     Tag: {}", version.tag());
    }

    println!("Verifying project build integrity.");
    let project = detect_project(&options.root, shell)?;
    info!(tool = project.build_tool(), root = %project.root().display(), "building project");
    build_and_clean(project.as_ref())?;

    let repository = GitRepository::open(&options.root, shell)?;
    let outcome = apply_tag(&repository, &version, options)?;
    info!(tag = %outcome.tag, replaced = outcome.replaced, pushed = outcome.pushed, "tagged");
    Ok(outcome)
}

/// Creates the version tag in `repository`, resolving a conflict with an
/// existing tag according to `options.force`.
///
/// # Errors
///
/// - [`Error::DirtyWorkingTree`] when tagging HEAD with uncommitted changes.
/// - [`Error::TagExists`] when the tag exists and `force` is off.
/// - Any repository failure.
pub fn apply_tag(
    repository: &dyn Repository,
    version: &GoVersion,
    options: &TagOptions,
) -> Result<TagOutcome> {
    // Past commits can be tagged while HEAD is dirty.
    if options.commit.is_none() && !repository.is_clean()? {
        return Err(Error::DirtyWorkingTree);
    }

    if options.fetch {
        println!("Fetching remote tags");
        repository.fetch_tags()?;
    }

    let tag = version.tag();
    let replaced = repository.tags()?.contains(&tag);
    if replaced {
        println!("Found tag {tag}");
        if !options.force {
            return Err(Error::TagExists(tag));
        }
        repository.delete_tag(&tag)?;
    }

    let annotation = version.annotation();
    match &options.commit {
        Some(commit) => eprintln!("Creating tag {tag} {annotation:?} ({commit})"),
        None => eprintln!("Creating tag {tag} {annotation:?}"),
    }
    repository.create_tag(&NewTag {
        name: &tag,
        annotation: Some(&annotation),
        commit: options.commit.as_deref(),
    })?;

    if options.push {
        eprintln!("Pushing tags to remote repository");
        repository.push_tags()?;
    }
    Ok(TagOutcome { tag, replaced, pushed: options.push })
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeRepository;
    use super::*;

    fn r60() -> GoVersion {
        GoVersion { version: "r60.3".into(), revision: 9516 }
    }

    const ANNOTATED: &str = "Some(\"Latest build for Go version r60.3\")";

    #[test]
    fn fresh_tag_is_created_and_pushed() {
        let repo = FakeRepository::with_tags(&["go.r59"]);
        let outcome = apply_tag(&repo, &r60(), &TagOptions::default()).unwrap();

        assert_eq!(
            outcome,
            TagOutcome { tag: "go.r60.3".into(), replaced: false, pushed: true }
        );
        assert_eq!(
            repo.calls(),
            ["fetch".to_string(), format!("create go.r60.3 HEAD {ANNOTATED}"), "push".into()]
        );
    }

    #[test]
    fn existing_tag_without_force_conflicts() {
        let repo = FakeRepository::with_tags(&["go.r60.3"]);
        let err = apply_tag(&repo, &r60(), &TagOptions::default()).unwrap_err();

        assert!(matches!(err, Error::TagExists(ref tag) if tag == "go.r60.3"), "{err}");
        assert_eq!(repo.calls(), ["fetch"]);
    }

    #[test]
    fn existing_tag_with_force_is_replaced() {
        let repo = FakeRepository::with_tags(&["go.r60.3"]);
        let options = TagOptions { force: true, ..TagOptions::default() };
        let outcome = apply_tag(&repo, &r60(), &options).unwrap();

        assert!(outcome.replaced);
        assert_eq!(
            repo.calls(),
            [
                "fetch".to_string(),
                "delete go.r60.3".into(),
                format!("create go.r60.3 HEAD {ANNOTATED}"),
                "push".into(),
            ]
        );
        assert_eq!(repo.tags().unwrap(), ["go.r60.3"]);
    }

    #[test]
    fn dirty_tree_blocks_tagging_head() {
        let repo = FakeRepository { dirty: true, ..FakeRepository::default() };
        let err = apply_tag(&repo, &r60(), &TagOptions::default()).unwrap_err();

        assert!(matches!(err, Error::DirtyWorkingTree));
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn explicit_commit_ignores_dirty_tree() {
        let repo = FakeRepository { dirty: true, ..FakeRepository::default() };
        let options = TagOptions {
            commit: Some("3f2a9c1".into()),
            fetch: false,
            push: false,
            ..TagOptions::default()
        };
        let outcome = apply_tag(&repo, &r60(), &options).unwrap();

        assert!(!outcome.pushed);
        assert_eq!(repo.calls(), [format!("create go.r60.3 3f2a9c1 {ANNOTATED}")]);
    }

    #[test]
    fn push_failure_propagates_after_tagging() {
        let repo = FakeRepository { failing: Some("push"), ..FakeRepository::default() };
        let err = apply_tag(&repo, &r60(), &TagOptions::default()).unwrap_err();

        assert!(matches!(err, Error::Script(_)));
        assert_eq!(repo.tags().unwrap(), ["go.r60.3"]);
    }
}
