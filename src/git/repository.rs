use crate::error::{MirrorError, Result};
use git2::{build::CheckoutBuilder, Commit, ErrorCode, IndexAddOption, Repository as Git2Repo};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository whose working tree is exactly `path`.
    ///
    /// Unlike discovery, parent directories are never searched, so a missing
    /// mirror checkout cannot silently resolve to an enclosing repository.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|e| {
            MirrorError::config(format!(
                "Cannot open git repository at '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl super::SourceControl for Git2Repository {
    fn list_tags(&self, limit: usize) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;
        super::newest_tags(names.iter().flatten(), limit)
    }

    fn checkout(&self, tag: &str) -> Result<()> {
        let commit = self
            .repo
            .revparse_single(&format!("refs/tags/{}", tag))
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| MirrorError::tag(format!("Cannot find tag '{}': {}", tag, e)))?;

        let mut options = CheckoutBuilder::new();
        options.safe();
        self.repo
            .checkout_tree(commit.as_object(), Some(&mut options))?;
        self.repo.set_head_detached(commit.id())?;

        debug!(tag, commit = %commit.id(), "checked out tag");
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_oid = index.write_tree()?;
        let parent = self.head_commit()?;

        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_oid,
            None => index.is_empty(),
        };
        if unchanged {
            return Err(MirrorError::NothingToCommit);
        }

        let tree = self.repo.find_tree(tree_oid)?;
        let signature = self.repo.signature()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        debug!(commit = %oid, message, "created commit");
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self
            .head_commit()?
            .ok_or_else(|| MirrorError::tag(format!("Cannot tag '{}': HEAD has no commit", name)))?;

        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| MirrorError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        debug!(tag = name, commit = %head.id(), "created tag");
        Ok(())
    }
}
