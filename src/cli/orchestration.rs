//! Main workflow orchestration logic
//!
//! Turns command-line style arguments into validated [Settings], opens both
//! working trees and runs the [Synchronizer]. Kept apart from `main.rs` so the
//! workflow can be called without clap.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{self, Config, Settings, Workspace};
use crate::git::{self, Backend};
use crate::sync::{SyncReport, Synchronizer};
use crate::ui;

/// Arguments for the sync workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// `None` means "use the configuration file value".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Upstream working tree, overrides `[paths] upstream`
    pub upstream: Option<PathBuf>,

    /// Mirror working tree, overrides `[paths] mirror`
    pub mirror: Option<PathBuf>,

    /// Number of upstream tags to consider, overrides `[sync] tag_limit`
    pub limit: Option<usize>,

    /// Overrides `[sync] backend`
    pub backend: Option<Backend>,

    /// Preview mode - plan only, no checkout, copy, commit or tag
    pub dry_run: bool,
}

impl SyncWorkflowArgs {
    /// Apply the explicit arguments on top of a loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(upstream) = &self.upstream {
            config.paths.upstream = upstream.clone();
        }
        if let Some(mirror) = &self.mirror {
            config.paths.mirror = mirror.clone();
        }
        if let Some(limit) = self.limit {
            config.sync.tag_limit = limit;
        }
        if let Some(backend) = self.backend {
            config.sync.backend = backend;
        }
        config
    }
}

/// Load the configuration and build [Settings] relative to the current directory
pub fn build_settings(args: &SyncWorkflowArgs) -> Result<Settings> {
    let config = args.apply_overrides(config::load_config(args.config_path.as_deref())?);
    let workspace = Workspace::from_current_dir(&config.paths)
        .context("Cannot determine current directory")?;
    let settings = config
        .with_workspace(workspace)
        .context("Invalid configuration")?;
    Ok(settings)
}

/// Main sync workflow
///
/// 1. Resolve settings against the current directory
/// 2. Open upstream and mirror working trees
/// 3. Compare tags and show the plan
/// 4. Apply pending versions (unless dry run)
///
/// # Returns
///
/// The run summary, or the first fatal error
pub fn run_sync_workflow(args: SyncWorkflowArgs) -> Result<SyncReport> {
    let settings = build_settings(&args)?;
    let workspace = &settings.workspace;

    info!(
        upstream = %workspace.upstream_dir.display(),
        mirror = %workspace.mirror_dir.display(),
        backend = %settings.backend,
        "opening working trees"
    );

    let upstream = git::open(settings.backend, &workspace.upstream_dir)
        .context("Cannot open upstream repository")?;
    let mirror = git::open(settings.backend, &workspace.mirror_dir)
        .context("Cannot open mirror repository")?;

    let synchronizer = Synchronizer::new(&*upstream, &*mirror, &settings);

    ui::display_status("Comparing upstream and mirror tags...");
    let plan = synchronizer.plan()?;
    ui::display_plan(&plan);

    let report = if args.dry_run {
        synchronizer.preview(plan)
    } else {
        synchronizer.apply(plan)?
    };

    ui::display_report(&report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let args = SyncWorkflowArgs {
            upstream: Some(PathBuf::from("core")),
            limit: Some(5),
            backend: Some(Backend::Cli),
            ..Default::default()
        };
        let config = args.apply_overrides(Config::default());
        assert_eq!(config.paths.upstream, PathBuf::from("core"));
        assert_eq!(config.paths.mirror, PathBuf::from("v2ray-proto"));
        assert_eq!(config.sync.tag_limit, 5);
        assert_eq!(config.sync.backend, Backend::Cli);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let config = SyncWorkflowArgs::default().apply_overrides(Config::default());
        assert_eq!(config, Config::default());
    }
}
