pub mod boundary;
pub mod cli;
pub mod config;
pub mod copy;
pub mod domain;
pub mod error;
pub mod git;
pub mod reconciler;
pub mod sync;
pub mod ui;

pub use error::{MirrorError, Result};
pub use reconciler::pending_versions;
