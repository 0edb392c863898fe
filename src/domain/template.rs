use crate::error::{MirrorError, Result};

/// Placeholder replaced by the tag name in commit messages
pub const TAG_PLACEHOLDER: &str = "{tag}";

/// Commit message template (e.g., "sync v2ray version {tag} proto files")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTemplate {
    pub template: String,
}

impl CommitTemplate {
    /// Create a template, rejecting ones that would not mention the tag
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(TAG_PLACEHOLDER) {
            return Err(MirrorError::config(format!(
                "Commit message template must contain {} placeholder: '{}'",
                TAG_PLACEHOLDER, template
            )));
        }
        Ok(CommitTemplate { template })
    }

    /// Render the commit message for a tag
    /// Example: template="sync {tag}", tag="v1.2.3" -> "sync v1.2.3"
    pub fn render(&self, tag: &str) -> String {
        self.template.replace(TAG_PLACEHOLDER, tag)
    }
}
