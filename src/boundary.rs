use std::fmt;

/// Non-fatal conditions met while syncing.
/// These are reported to the user but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncWarning {
    /// Staging or committing the mirror failed, usually because nothing changed
    CommitSkipped { tag: String, reason: String },
    /// The mirror has no tags, so every listed upstream tag is a candidate
    MirrorUntagged { baseline: String },
    /// A version was applied but no file matched the pattern
    NoMatchingFiles { tag: String },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::CommitSkipped { tag, reason } => {
                write!(f, "Commit for '{}' skipped: {}", tag, reason)
            }
            SyncWarning::MirrorUntagged { baseline } => {
                write!(f, "Mirror has no tags yet, comparing against '{}'", baseline)
            }
            SyncWarning::NoMatchingFiles { tag } => {
                write!(f, "No matching files found upstream at '{}'", tag)
            }
        }
    }
}
