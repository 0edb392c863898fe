//! Applies pending upstream versions to the mirror, one at a time.
//!
//! Each version goes through checkout, copy, commit and tag before the next
//! one starts. Checkout, copy and tag failures abort the run; a failed stage or
//! commit becomes a [SyncWarning] and the version is still tagged.

use crate::boundary::SyncWarning;
use crate::config::Settings;
use crate::copy::copy_matching;
use crate::domain::VersionTag;
use crate::error::Result;
use crate::git::SourceControl;
use crate::reconciler::{SyncPlan, VersionReconciler};
use tracing::{info, warn};

/// Outcome for one mirrored version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedVersion {
    pub tag: String,
    pub files_copied: usize,
    /// False when the commit step was skipped
    pub committed: bool,
}

/// Summary of a sync run
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub plan: SyncPlan,
    pub applied: Vec<AppliedVersion>,
    pub warnings: Vec<SyncWarning>,
    pub dry_run: bool,
}

/// Drives one upstream and one mirror working tree
pub struct Synchronizer<'a, U: ?Sized, M: ?Sized> {
    upstream: &'a U,
    mirror: &'a M,
    settings: &'a Settings,
}

impl<'a, U, M> Synchronizer<'a, U, M>
where
    U: SourceControl + ?Sized,
    M: SourceControl + ?Sized,
{
    pub fn new(upstream: &'a U, mirror: &'a M, settings: &'a Settings) -> Self {
        Synchronizer {
            upstream,
            mirror,
            settings,
        }
    }

    /// Compute the pending versions without touching either tree
    pub fn plan(&self) -> Result<SyncPlan> {
        VersionReconciler::new(self.settings.tag_limit, self.settings.zero_version.clone())
            .plan(self.upstream, self.mirror)
    }

    /// Plan, then apply every pending version unless `dry_run` is set
    pub fn run(&self, dry_run: bool) -> Result<SyncReport> {
        let plan = self.plan()?;
        if dry_run {
            return Ok(self.preview(plan));
        }
        self.apply(plan)
    }

    /// Report what `plan` would do without applying it
    pub fn preview(&self, plan: SyncPlan) -> SyncReport {
        SyncReport {
            warnings: plan_warnings(&plan),
            plan,
            applied: Vec::new(),
            dry_run: true,
        }
    }

    /// Apply `plan` oldest version first, stopping at the first fatal error
    pub fn apply(&self, plan: SyncPlan) -> Result<SyncReport> {
        let mut warnings = plan_warnings(&plan);

        let mut applied = Vec::with_capacity(plan.pending.len());
        for version in &plan.pending {
            applied.push(self.sync_version(version, &mut warnings)?);
        }

        Ok(SyncReport {
            plan,
            applied,
            warnings,
            dry_run: false,
        })
    }

    fn sync_version(
        &self,
        version: &VersionTag,
        warnings: &mut Vec<SyncWarning>,
    ) -> Result<AppliedVersion> {
        let tag = version.original();
        let workspace = &self.settings.workspace;
        info!(tag, "syncing version");

        self.upstream.checkout(tag)?;

        let copied = copy_matching(
            &workspace.upstream_dir,
            &workspace.mirror_dir,
            &self.settings.file_pattern,
        )?;
        if copied.is_empty() {
            warnings.push(SyncWarning::NoMatchingFiles {
                tag: tag.to_string(),
            });
        }

        let message = self.settings.commit_template.render(tag);
        let committed = match self
            .mirror
            .stage_all()
            .and_then(|_| self.mirror.commit(&message))
        {
            Ok(()) => true,
            Err(e) => {
                warn!(tag, error = %e, "commit skipped");
                warnings.push(SyncWarning::CommitSkipped {
                    tag: tag.to_string(),
                    reason: e.to_string(),
                });
                false
            }
        };

        self.mirror.create_tag(tag)?;
        info!(tag, files = copied.len(), committed, "version mirrored");

        Ok(AppliedVersion {
            tag: tag.to_string(),
            files_copied: copied.len(),
            committed,
        })
    }
}

fn plan_warnings(plan: &SyncPlan) -> Vec<SyncWarning> {
    if plan.mirror_untagged {
        vec![SyncWarning::MirrorUntagged {
            baseline: plan.mirror_latest.clone(),
        }]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::git::{MockSourceControl, Operation};
    use std::fs;
    use tempfile::TempDir;

    struct Trees {
        _root: TempDir,
        settings: Settings,
    }

    fn trees() -> Trees {
        let root = TempDir::new().unwrap();
        let settings = Config::default().into_settings(root.path()).unwrap();
        fs::create_dir_all(&settings.workspace.upstream_dir).unwrap();
        fs::create_dir_all(&settings.workspace.mirror_dir).unwrap();
        fs::write(
            settings.workspace.upstream_dir.join("config.proto"),
            "syntax = \"proto3\";",
        )
        .unwrap();
        Trees {
            _root: root,
            settings,
        }
    }

    #[test]
    fn test_run_applies_in_ascending_order() {
        let trees = trees();
        let upstream = MockSourceControl::with_tags(["v1.3.0", "v1.2.0", "v1.4.0"]);
        let mirror = MockSourceControl::with_tags(["v1.2.0"]);

        let report = Synchronizer::new(&upstream, &mirror, &trees.settings)
            .run(false)
            .unwrap();

        let applied: Vec<&str> = report.applied.iter().map(|a| a.tag.as_str()).collect();
        assert_eq!(applied, vec!["v1.3.0", "v1.4.0"]);
        assert!(report.warnings.is_empty());
        assert_eq!(
            mirror.mutations(),
            vec![
                Operation::StageAll,
                Operation::Commit("sync v2ray version v1.3.0 proto files".to_string()),
                Operation::CreateTag("v1.3.0".to_string()),
                Operation::StageAll,
                Operation::Commit("sync v2ray version v1.4.0 proto files".to_string()),
                Operation::CreateTag("v1.4.0".to_string()),
            ]
        );
        assert!(trees
            .settings
            .workspace
            .mirror_dir
            .join("config.proto")
            .exists());
    }

    #[test]
    fn test_dry_run_mutates_nothing() {
        let trees = trees();
        let upstream = MockSourceControl::with_tags(["v0.2.0", "v0.1.0"]);
        let mirror = MockSourceControl::new();

        let report = Synchronizer::new(&upstream, &mirror, &trees.settings)
            .run(true)
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.plan.tags(), vec!["v0.1.0", "v0.2.0"]);
        assert!(report.applied.is_empty());
        assert!(upstream.mutations().is_empty());
        assert!(mirror.mutations().is_empty());
        assert!(!trees
            .settings
            .workspace
            .mirror_dir
            .join("config.proto")
            .exists());
    }

    #[test]
    fn test_commit_failure_is_tolerated() {
        let trees = trees();
        let upstream = MockSourceControl::with_tags(["v1.0.0"]);
        let mirror = MockSourceControl::with_tags(["v0.9.0"]).fail_commits();

        let report = Synchronizer::new(&upstream, &mirror, &trees.settings)
            .run(false)
            .unwrap();

        assert_eq!(report.applied.len(), 1);
        assert!(!report.applied[0].committed);
        assert!(matches!(
            report.warnings.as_slice(),
            [SyncWarning::CommitSkipped { tag, .. }] if tag == "v1.0.0"
        ));
        assert_eq!(mirror.tags()[0], "v1.0.0");
    }

    #[test]
    fn test_checkout_failure_stops_run() {
        let trees = trees();
        let upstream =
            MockSourceControl::with_tags(["v3.0.0", "v2.0.0", "v1.0.0"]).fail_checkout_at("v2.0.0");
        let mirror = MockSourceControl::new();

        let result = Synchronizer::new(&upstream, &mirror, &trees.settings).run(false);

        assert!(result.is_err());
        assert_eq!(mirror.tags(), vec!["v1.0.0"]);
        assert!(!upstream
            .operations()
            .contains(&Operation::Checkout("v3.0.0".to_string())));
    }

    #[test]
    fn test_tag_failure_stops_run() {
        let trees = trees();
        let upstream = MockSourceControl::with_tags(["v2.0.0", "v1.0.0"]);
        let mirror = MockSourceControl::new().fail_tag_at("v1.0.0");

        let result = Synchronizer::new(&upstream, &mirror, &trees.settings).run(false);

        assert!(result.is_err());
        assert_eq!(
            upstream.mutations(),
            vec![Operation::Checkout("v1.0.0".to_string())]
        );
    }

    #[test]
    fn test_copy_failure_stops_run() {
        let trees = trees();
        fs::remove_dir_all(&trees.settings.workspace.mirror_dir).unwrap();
        let upstream = MockSourceControl::with_tags(["v1.0.0"]);
        let mirror = MockSourceControl::new();

        let result = Synchronizer::new(&upstream, &mirror, &trees.settings).run(false);

        assert!(result.is_err());
        assert!(mirror.mutations().is_empty());
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let trees = trees();
        let upstream = MockSourceControl::with_tags(["v1.1.0", "v1.0.0"]);
        let mirror = MockSourceControl::new();
        let synchronizer = Synchronizer::new(&upstream, &mirror, &trees.settings);

        synchronizer.run(false).unwrap();
        let mutations_after_first = mirror.mutations().len();

        let second = synchronizer.run(false).unwrap();
        assert!(second.plan.is_empty());
        assert!(second.applied.is_empty());
        assert_eq!(mirror.mutations().len(), mutations_after_first);
    }

    #[test]
    fn test_untagged_mirror_warning() {
        let trees = trees();
        let upstream = MockSourceControl::with_tags(["v0.1.0"]);
        let mirror = MockSourceControl::new();

        let report = Synchronizer::new(&upstream, &mirror, &trees.settings)
            .run(false)
            .unwrap();

        assert_eq!(
            report.warnings,
            vec![SyncWarning::MirrorUntagged {
                baseline: "v0.0.0".to_string()
            }]
        );
    }

    #[test]
    fn test_no_matching_files_warning() {
        let trees = trees();
        fs::remove_file(trees.settings.workspace.upstream_dir.join("config.proto")).unwrap();
        let upstream = MockSourceControl::with_tags(["v1.0.0"]);
        let mirror = MockSourceControl::with_tags(["v0.1.0"]);

        let report = Synchronizer::new(&upstream, &mirror, &trees.settings)
            .run(false)
            .unwrap();

        assert_eq!(report.applied[0].files_copied, 0);
        assert!(report
            .warnings
            .contains(&SyncWarning::NoMatchingFiles {
                tag: "v1.0.0".to_string()
            }));
    }
}
