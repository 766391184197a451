//! Run configuration: command-line flags with environment fallbacks.
//!
//! The environment variables match what the grading workflow sets:
//! `LAB_DUE_DATE`, `GITHUB_EVENT_PATH`, and `GITHUB_STEP_SUMMARY`. Flags
//! take precedence so the tool can be exercised locally.

use std::env;
use std::path::PathBuf;

/// Everything `labmark run` needs to grade one submission.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root of the lab checkout.
    pub lab_root: PathBuf,
    /// Configured due date, if any.
    pub due_date: Option<String>,
    /// Path to the CI event payload, if any.
    pub event_path: Option<PathBuf>,
    /// Path to the Markdown summary sink, if any.
    pub summary_path: Option<PathBuf>,
    /// Optional path for the JSON report.
    pub json_path: Option<PathBuf>,
}

impl RunConfig {
    /// Merge flags with environment fallbacks.
    pub fn resolve(
        lab_root: PathBuf,
        due_date: Option<String>,
        event_path: Option<PathBuf>,
        summary_path: Option<PathBuf>,
        json_path: Option<PathBuf>,
    ) -> Self {
        Self {
            lab_root,
            due_date: due_date.or_else(|| env_nonempty("LAB_DUE_DATE")),
            event_path: event_path.or_else(|| env_nonempty("GITHUB_EVENT_PATH").map(PathBuf::from)),
            summary_path: summary_path
                .or_else(|| env_nonempty("GITHUB_STEP_SUMMARY").map(PathBuf::from)),
            json_path,
        }
    }
}

/// Read an environment variable, treating unset and empty alike.
fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
