use crate::error::{MirrorError, Result};
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// A release tag parsed as a semantic version.
///
/// Keeps the tag text exactly as it appears in the repository so it can be
/// checked out and re-created verbatim in the mirror, while ordering and
/// equality follow semantic-version precedence (build metadata ignored).
#[derive(Debug, Clone)]
pub struct VersionTag {
    version: Version,
    original: String,
}

impl VersionTag {
    /// Parse a tag such as `v1.2.3`, `1.2.3-rc.1` or `V2.0`.
    ///
    /// A single `v`/`V` prefix is allowed, and a core with one or two numeric
    /// components is padded with zeros (`v1.2` reads as `1.2.0`).
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let unprefixed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        if unprefixed.is_empty() {
            return Err(MirrorError::version(tag, "empty version"));
        }

        let split_at = unprefixed.find(['-', '+']).unwrap_or(unprefixed.len());
        let (core, suffix) = unprefixed.split_at(split_at);

        let components: Vec<&str> = core.split('.').collect();
        let all_numeric = components
            .iter()
            .all(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()));

        let normalized = match components.len() {
            1 | 2 if all_numeric => {
                let mut padded = components.join(".");
                for _ in components.len()..3 {
                    padded.push_str(".0");
                }
                format!("{}{}", padded, suffix)
            }
            _ => unprefixed.to_string(),
        };

        let version =
            Version::parse(&normalized).map_err(|e| MirrorError::version(tag, e.to_string()))?;

        Ok(VersionTag {
            version,
            original: trimmed.to_string(),
        })
    }

    /// The tag text as found in the repository
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The parsed semantic version
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }
}

impl Ord for VersionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = &self.version;
        let b = &other.version;
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionTag {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionTag {}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
