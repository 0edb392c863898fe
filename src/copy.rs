//! Copies protocol-definition files from one working tree into another.
//!
//! The copy is additive: matching files are created or overwritten, files that
//! disappeared upstream stay in the mirror.

use crate::error::{MirrorError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Default pattern for protocol-definition files
pub const DEFAULT_FILE_PATTERN: &str = r"\.proto$";

/// Files written by one [copy_matching] call, relative to the roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub files: Vec<PathBuf>,
}

impl CopyReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Compile a file pattern, reporting a bad expression as a configuration error
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| MirrorError::config(format!("Invalid file pattern '{}': {}", pattern, e)))
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == ".git"
}

/// Relative path with `/` separators, the form the pattern is matched against
fn match_key(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Copy every file under `source` whose relative path matches `pattern`
/// into the same relative location under `target`.
///
/// # Arguments
/// * `source` - Root of the upstream working tree
/// * `target` - Root of the mirror working tree
/// * `pattern` - Expression matched against the `/`-separated relative path
///
/// # Returns
/// * `Ok(CopyReport)` - Files copied, sorted by relative path
/// * `Err` - If the source cannot be walked or a file cannot be written
pub fn copy_matching(source: &Path, target: &Path, pattern: &Regex) -> Result<CopyReport> {
    if !source.is_dir() {
        return Err(MirrorError::copy(format!(
            "Source directory not found: {}",
            source.display()
        )));
    }
    if !target.is_dir() {
        return Err(MirrorError::copy(format!(
            "Target directory not found: {}",
            target.display()
        )));
    }

    let mut report = CopyReport::default();

    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_git_dir(entry));

    for entry in walker {
        let entry = entry.map_err(|e| MirrorError::copy(format!("Cannot walk source: {}", e)))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| MirrorError::copy(e.to_string()))?;
        if !pattern.is_match(&match_key(relative)) {
            continue;
        }

        let destination = target.join(relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &destination).map_err(|e| {
            MirrorError::copy(format!(
                "Cannot copy '{}' to '{}': {}",
                entry.path().display(),
                destination.display(),
                e
            ))
        })?;

        debug!(file = %relative.display(), "copied");
        report.files.push(relative.to_path_buf());
    }

    Ok(report)
}
