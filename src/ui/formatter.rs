//! Pure formatting functions for UI output.
//!
//! Everything here returns a `String` so it can be tested without a terminal.
//! Styling goes through `console`, which drops colors when output is not a TTY.

use console::style;

use crate::boundary::SyncWarning;
use crate::reconciler::SyncPlan;
use crate::sync::SyncReport;

/// Format an error line in red.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Format a success line with a green checkmark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Format a status line with a yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Format a non-fatal warning.
pub fn format_warning(warning: &SyncWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Format the pending versions of a plan.
///
/// Shows the mirror baseline followed by one numbered line per pending tag,
/// oldest first, or a single up-to-date line when nothing is pending.
pub fn format_plan(plan: &SyncPlan) -> String {
    if plan.is_empty() {
        return format!(
            "Mirror is up to date at {}",
            style(&plan.mirror_latest).green()
        );
    }

    let mut out = format!(
        "{}\n  Mirror latest: {}\n",
        style("Pending versions:").bold(),
        style(&plan.mirror_latest).red()
    );
    for (i, tag) in plan.pending.iter().enumerate() {
        let marker = if tag.is_prerelease() {
            format!(" {}", style("(pre-release)").yellow())
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  {}. {}{}\n",
            i + 1,
            style(tag.original()).green(),
            marker
        ));
    }
    out.trim_end().to_string()
}

/// Format the closing summary of a run.
pub fn format_report(report: &SyncReport) -> String {
    if report.dry_run {
        return format!(
            "Dry run: {} version(s) would be mirrored",
            report.plan.pending.len()
        );
    }

    let mut out = format!("Mirrored {} version(s)", report.applied.len());
    for applied in &report.applied {
        let commit = if applied.committed {
            "committed"
        } else {
            "no commit"
        };
        out.push_str(&format!(
            "\n  {} ({} file(s), {})",
            style(&applied.tag).green(),
            applied.files_copied,
            commit
        ));
    }
    out
}
