use crate::error::{MirrorError, Result};
use crate::git::SourceControl;
use std::cell::RefCell;

/// An operation recorded by [MockSourceControl]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListTags(usize),
    Checkout(String),
    StageAll,
    Commit(String),
    CreateTag(String),
}

impl Operation {
    /// Whether the operation changes the working tree or its history
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Operation::ListTags(_))
    }
}

/// Mock working tree for testing without actual git operations.
///
/// Tags are kept newest-first, the order the trait contract promises. A
/// created tag goes to the front since the workflow creates them in ascending
/// order.
#[derive(Default)]
pub struct MockSourceControl {
    tags: RefCell<Vec<String>>,
    operations: RefCell<Vec<Operation>>,
    failing_checkout: Option<String>,
    failing_tag: Option<String>,
    fail_commits: bool,
}

impl MockSourceControl {
    /// Create a new mock with no tags
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose tag list is `tags`, newest first
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockSourceControl {
            tags: RefCell::new(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Make `checkout(tag)` fail
    pub fn fail_checkout_at(mut self, tag: impl Into<String>) -> Self {
        self.failing_checkout = Some(tag.into());
        self
    }

    /// Make `create_tag(tag)` fail
    pub fn fail_tag_at(mut self, tag: impl Into<String>) -> Self {
        self.failing_tag = Some(tag.into());
        self
    }

    /// Make every `commit` report nothing to commit
    pub fn fail_commits(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Current tag list, newest first
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    /// Every operation performed so far, in call order
    pub fn operations(&self) -> Vec<Operation> {
        self.operations.borrow().clone()
    }

    /// Operations that would have changed a real repository
    pub fn mutations(&self) -> Vec<Operation> {
        self.operations
            .borrow()
            .iter()
            .filter(|op| op.is_mutation())
            .cloned()
            .collect()
    }

    fn record(&self, operation: Operation) {
        self.operations.borrow_mut().push(operation);
    }
}

impl SourceControl for MockSourceControl {
    fn list_tags(&self, limit: usize) -> Result<Vec<String>> {
        self.record(Operation::ListTags(limit));
        Ok(self.tags.borrow().iter().take(limit).cloned().collect())
    }

    fn checkout(&self, tag: &str) -> Result<()> {
        self.record(Operation::Checkout(tag.to_string()));
        if self.failing_checkout.as_deref() == Some(tag) {
            return Err(MirrorError::tag(format!("Cannot find tag '{}'", tag)));
        }
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        self.record(Operation::StageAll);
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(Operation::Commit(message.to_string()));
        if self.fail_commits {
            return Err(MirrorError::NothingToCommit);
        }
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(Operation::CreateTag(name.to_string()));
        if self.failing_tag.as_deref() == Some(name) {
            return Err(MirrorError::tag(format!("Cannot create tag '{}'", name)));
        }
        if self.tags.borrow().iter().any(|t| t == name) {
            return Err(MirrorError::tag(format!("Tag '{}' already exists", name)));
        }
        self.tags.borrow_mut().insert(0, name.to_string());
        Ok(())
    }
}
