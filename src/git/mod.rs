//! Source-control abstraction layer
//!
//! The sync workflow only needs a handful of operations from each working
//! tree. They are collected in the [SourceControl] trait so the reconciler and
//! the orchestrator can run against:
//!
//! - [repository::Git2Repository]: in-process implementation using the `git2` crate
//! - [cli::GitCli]: implementation that spawns the `git` executable
//! - [mock::MockSourceControl]: in-memory implementation for tests
//!
//! ```rust
//! # use proto_mirror::git::SourceControl;
//! # fn example<S: SourceControl>(upstream: &S) -> proto_mirror::Result<()> {
//! for tag in upstream.list_tags(20)? {
//!     println!("{}", tag);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCli;
pub use mock::{MockSourceControl, Operation};
pub use repository::Git2Repository;

use crate::domain::VersionTag;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Operations the sync workflow performs on a working tree.
///
/// Every call blocks until the underlying operation completes. Implementations
/// map their failures to [crate::error::MirrorError] variants.
pub trait SourceControl {
    /// List tag names, newest version first, at most `limit` entries.
    ///
    /// Tag names are returned verbatim; parsing them is the caller's job.
    fn list_tags(&self, limit: usize) -> Result<Vec<String>>;

    /// Switch the working tree to `tag` (detached HEAD)
    fn checkout(&self, tag: &str) -> Result<()>;

    /// Stage every change in the working tree, including deletions
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged changes on top of HEAD.
    ///
    /// Returns [crate::error::MirrorError::NothingToCommit] (or a command error
    /// for the CLI backend) when the index matches HEAD.
    fn commit(&self, message: &str) -> Result<()>;

    /// Create a lightweight tag named `name` on HEAD.
    ///
    /// Fails if the tag already exists.
    fn create_tag(&self, name: &str) -> Result<()>;
}

/// Which [SourceControl] implementation drives the real repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// libgit2 via the `git2` crate
    #[default]
    Git2,
    /// The `git` executable found on PATH
    Cli,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Git2 => write!(f, "git2"),
            Backend::Cli => write!(f, "cli"),
        }
    }
}

/// Parse tag names and keep the newest `limit` by semantic-version precedence.
///
/// Any name that is not a semantic version fails the whole listing.
pub(crate) fn newest_tags<'a, I>(names: I, limit: usize) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tags = names
        .into_iter()
        .map(VersionTag::parse)
        .collect::<Result<Vec<_>>>()?;

    tags.sort_by(|a, b| b.cmp(a));
    tags.truncate(limit);

    Ok(tags.into_iter().map(|t| t.original().to_string()).collect())
}

/// Open the working tree at `path` with the selected backend
pub fn open(backend: Backend, path: &Path) -> Result<Box<dyn SourceControl>> {
    match backend {
        Backend::Git2 => Ok(Box::new(Git2Repository::open(path)?)),
        Backend::Cli => Ok(Box::new(GitCli::new(path)?)),
    }
}
