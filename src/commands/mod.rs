//! Command dispatch and handlers.

pub mod tag;
pub mod update;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;

/// Dispatch a parsed command to its handler.
///
/// When `GOTAG_REPLAY` is set, script runs are served from that cassette;
/// when `GOTAG_RECORD` is set, they are recorded to it.
///
/// # Errors
///
/// Returns the first error raised by the selected workflow.
pub fn dispatch(command: &Command, verbose: bool) -> Result<()> {
    let ctx = ServiceContext::from_config(Config::from_env())?;
    dispatch_with_context(command, verbose, &ctx)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns the first error raised by the selected workflow.
pub fn dispatch_with_context(command: &Command, verbose: bool, ctx: &ServiceContext) -> Result<()> {
    match command {
        Command::Tag { force, no_fetch, no_push, commit, root } => {
            let options = tag::TagOptions {
                root: root.clone(),
                force: *force,
                fetch: !no_fetch,
                push: !no_push,
                commit: commit.clone(),
                verbose,
            };
            tag::run(ctx, &options).map(drop)
        }
        Command::Update { import_path, install } => {
            let options = update::UpdateOptions {
                import_path: import_path.clone(),
                install: *install,
                verbose,
            };
            update::run(ctx, &options)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory repository double.

    use std::cell::RefCell;
    use std::path::Path;

    use crate::error::{Error, Result};
    use crate::ports::{NewTag, Repository};
    use crate::script::ScriptError;

    /// Keeps tags in memory and logs every mutating call.
    #[derive(Default)]
    pub(crate) struct FakeRepository {
        pub(crate) tags: RefCell<Vec<String>>,
        pub(crate) dirty: bool,
        pub(crate) calls: RefCell<Vec<String>>,
        /// Operation name that fails, such as `"push"`.
        pub(crate) failing: Option<&'static str>,
    }

    impl FakeRepository {
        pub(crate) fn with_tags(tags: &[&str]) -> Self {
            Self {
                tags: RefCell::new(tags.iter().map(|t| (*t).to_string()).collect()),
                ..Self::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn call(&self, operation: &'static str, detail: String) -> Result<()> {
            self.calls.borrow_mut().push(detail);
            if self.failing == Some(operation) {
                return Err(Error::Script(ScriptError::Execution {
                    program: "git".into(),
                    code: Some(128),
                    stderr: format!("fatal: {operation} failed\n"),
                }));
            }
            Ok(())
        }
    }

    impl Repository for FakeRepository {
        fn root(&self) -> &Path {
            Path::new(".")
        }

        fn kind(&self) -> &'static str {
            "fake"
        }

        fn name(&self) -> Result<String> {
            Ok("fake".into())
        }

        fn tags(&self) -> Result<Vec<String>> {
            Ok(self.tags.borrow().clone())
        }

        fn delete_tag(&self, name: &str) -> Result<()> {
            self.call("delete", format!("delete {name}"))?;
            self.tags.borrow_mut().retain(|tag| tag != name);
            Ok(())
        }

        fn create_tag(&self, tag: &NewTag<'_>) -> Result<()> {
            let on = tag.commit.unwrap_or("HEAD");
            self.call("create", format!("create {} {on} {:?}", tag.name, tag.annotation))?;
            self.tags.borrow_mut().push(tag.name.to_string());
            Ok(())
        }

        fn fetch_tags(&self) -> Result<()> {
            self.call("fetch", "fetch".into())
        }

        fn push_tags(&self) -> Result<()> {
            self.call("push", "push".into())
        }

        fn is_clean(&self) -> Result<bool> {
            Ok(!self.dirty)
        }
    }
}
