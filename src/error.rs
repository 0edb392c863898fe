use thiserror::Error;

/// Unified error type for proto-mirror operations
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: '{tag}' is not a semantic version ({reason})")]
    Version { tag: String, reason: String },

    #[error("Command `{command}` failed with {status}: {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Nothing to commit, working tree clean")]
    NothingToCommit,

    #[error("Copy error: {0}")]
    Copy(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in proto-mirror
pub type Result<T> = std::result::Result<T, MirrorError>;

impl MirrorError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MirrorError::Config(msg.into())
    }

    /// Create a version error for a tag that failed to parse
    pub fn version(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        MirrorError::Version {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a copy error with context
    pub fn copy(msg: impl Into<String>) -> Self {
        MirrorError::Copy(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        MirrorError::Tag(msg.into())
    }
}
