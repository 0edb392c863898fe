//! Decides which upstream releases the mirror still lacks

pub mod pending;

pub use pending::{mirror_baseline, pending_versions};

use crate::domain::VersionTag;
use crate::error::Result;
use crate::git::SourceControl;
use tracing::debug;

/// Ordered work for one sync run
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    /// Newest mirror tag, or the zero version for an untagged mirror
    pub mirror_latest: String,
    /// True when the mirror had no tags and `mirror_latest` is the zero version
    pub mirror_untagged: bool,
    /// Upstream tags newer than `mirror_latest`, oldest first
    pub pending: Vec<VersionTag>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending tag names in application order
    pub fn tags(&self) -> Vec<&str> {
        self.pending.iter().map(|t| t.original()).collect()
    }
}

/// Reads tag lists through [SourceControl] and builds a [SyncPlan]
pub struct VersionReconciler {
    upstream_limit: usize,
    zero_version: String,
}

impl VersionReconciler {
    /// Create a reconciler that looks at the newest `upstream_limit` upstream tags
    pub fn new(upstream_limit: usize, zero_version: impl Into<String>) -> Self {
        VersionReconciler {
            upstream_limit,
            zero_version: zero_version.into(),
        }
    }

    /// Compare the two repositories' tags and return the pending work
    pub fn plan<U, M>(&self, upstream: &U, mirror: &M) -> Result<SyncPlan>
    where
        U: SourceControl + ?Sized,
        M: SourceControl + ?Sized,
    {
        let upstream_tags = upstream.list_tags(self.upstream_limit)?;
        let mirror_tags = mirror.list_tags(1)?;
        let mirror_latest = mirror_baseline(&mirror_tags, &self.zero_version).to_string();
        let mirror_untagged = mirror_tags.is_empty();

        debug!(
            upstream = upstream_tags.len(),
            %mirror_latest,
            "comparing tag lists"
        );

        let pending = pending_versions(&upstream_tags, &mirror_latest)?;
        let plan = SyncPlan {
            mirror_latest,
            mirror_untagged,
            pending,
        };

        debug!(pending = ?plan.tags(), "planned versions");
        Ok(plan)
    }
}
