use crate::domain::VersionTag;
use crate::error::Result;

/// Upstream versions still missing from the mirror, oldest first.
///
/// Every upstream tag is parsed before anything is filtered, so one malformed
/// tag fails the whole call. An empty upstream list short-circuits to an empty
/// result without looking at `mirror_latest`.
///
/// # Example
/// ```rust
/// # use proto_mirror::reconciler::pending_versions;
/// let pending = pending_versions(&["v1.3.0", "v1.2.0", "v1.4.0"], "v1.2.0").unwrap();
/// let tags: Vec<&str> = pending.iter().map(|t| t.original()).collect();
/// assert_eq!(tags, vec!["v1.3.0", "v1.4.0"]);
/// ```
pub fn pending_versions<S: AsRef<str>>(
    upstream_tags: &[S],
    mirror_latest: &str,
) -> Result<Vec<VersionTag>> {
    let mut pending = upstream_tags
        .iter()
        .map(|tag| VersionTag::parse(tag.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    if pending.is_empty() {
        return Ok(pending);
    }

    let baseline = VersionTag::parse(mirror_latest)?;
    pending.retain(|version| *version > baseline);
    pending.sort();

    Ok(pending)
}

/// The newest mirror tag, or `zero` when the mirror has none
pub fn mirror_baseline<'a, S: AsRef<str>>(mirror_tags: &'a [S], zero: &'a str) -> &'a str {
    mirror_tags.first().map(AsRef::as_ref).unwrap_or(zero)
}
