//! User interface module - terminal output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing to stdout/stderr

pub mod formatter;

use crate::boundary::SyncWarning;
use crate::reconciler::SyncPlan;
use crate::sync::SyncReport;

pub use formatter::{
    format_error, format_plan, format_report, format_status, format_success, format_warning,
};

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print a success message.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Print a status message.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

/// Print a warning to stderr.
pub fn display_warning(warning: &SyncWarning) {
    eprintln!("{}", format_warning(warning));
}

/// Print the pending versions before anything is applied.
pub fn display_plan(plan: &SyncPlan) {
    println!("\n{}\n", format_plan(plan));
}

/// Print the warnings and summary of a finished run.
pub fn display_report(report: &SyncReport) {
    for warning in &report.warnings {
        display_warning(warning);
    }
    display_success(&format_report(report));
}
