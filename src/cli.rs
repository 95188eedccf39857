//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `gotag`.
#[derive(Debug, Parser)]
#[command(
    name = "gotag",
    version,
    about = "Tag Go repositories with the toolchain version they build against"
)]
pub struct Cli {
    /// Verbose program output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify the build and tag the repository with `go.<version>`.
    Tag {
        /// Delete an existing tag of the same name first.
        #[arg(short, long)]
        force: bool,
        /// Don't fetch remote tags before tagging.
        #[arg(long)]
        no_fetch: bool,
        /// Don't push tags when finished.
        #[arg(long)]
        no_push: bool,
        /// Commit to tag instead of HEAD.
        #[arg(long, value_name = "HASH")]
        commit: Option<String>,
        /// Project root.
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
    },
    /// Fetch tags for an installed package under `$GOROOT/src/pkg`.
    Update {
        /// Import path of the package.
        #[arg(value_name = "IMPORT")]
        import_path: String,
        /// Reinstall the package with goinstall afterwards.
        #[arg(short, long)]
        install: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn tag_defaults() {
        let cli = Cli::parse_from(["gotag", "tag"]);
        assert!(!cli.verbose);
        match cli.command {
            Command::Tag { force, no_fetch, no_push, commit, root } => {
                assert!(!force && !no_fetch && !no_push);
                assert!(commit.is_none());
                assert_eq!(root.to_str(), Some("."));
            }
            Command::Update { .. } => panic!("expected tag"),
        }
    }

    #[test]
    fn tag_with_every_flag() {
        let cli = Cli::parse_from([
            "gotag", "tag", "-f", "--no-fetch", "--no-push", "--commit", "abc123", "--root", "pkg",
            "-v",
        ]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Tag { force: true, no_fetch: true, no_push: true, commit: Some(ref c), .. }
                if c == "abc123"
        ));
    }

    #[test]
    fn update_with_install() {
        let cli = Cli::parse_from(["gotag", "-v", "update", "example.com/pkg", "-i"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Update { ref import_path, install: true } if import_path == "example.com/pkg"
        ));
    }

    #[test]
    fn update_requires_import_path() {
        assert!(Cli::try_parse_from(["gotag", "update"]).is_err());
    }
}
