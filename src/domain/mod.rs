//! Domain logic - pure rules independent of git operations

pub mod template;
pub mod version;

pub use template::CommitTemplate;
pub use version::VersionTag;
