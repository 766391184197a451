//! The Markdown job-summary document.
//!
//! Written to the CI summary sink (`GITHUB_STEP_SUMMARY`) when one is
//! configured. Same content as the console report, reorganized under
//! headings with the total emphasized first.

use std::path::Path;

use anyhow::{Context, Result};

use labmark_core::model::GradeReport;

/// Render the Markdown summary document.
pub fn render(report: &GradeReport) -> String {
    let mut md: Vec<String> = Vec::new();

    md.push("# Lab 7-2 RESTful APIs – Auto Grade Report".into());
    md.push(String::new());

    md.push(format!(
        "## **Total score: `{} / {}`**",
        report.total, report.total_max
    ));
    md.push(String::new());

    md.push(format!("## Submission ({} marks)", report.submission.max));
    md.push(format!(
        "- **Score:** {} / {}",
        report.submission.score, report.submission.max
    ));
    if !report.submission.reason.is_empty() {
        md.push(format!("- {}", report.submission.reason));
    }
    md.push(String::new());

    md.push(format!("## Implementation ({} marks)", report.implementation_max));
    md.push(format!(
        "- **Score:** {} / {}",
        report.implementation_adjusted, report.implementation_max
    ));
    md.push(String::new());

    md.push("## Task Breakdown".into());
    for task in &report.tasks {
        md.push(format!("### Task {}: {}", task.id, task.label));
        md.push(format!(
            "**Score:** {} / {} (C: {}, Corr: {}, Q: {})",
            task.score, task.max, task.completeness, task.correctness, task.quality
        ));
        if !task.details.is_empty() {
            md.push("**Details:**".into());
            for detail in &task.details {
                md.push(format!("- {detail}"));
            }
        }
        md.push(String::new());
    }

    md.join("\n")
}

/// Render the summary and write it to the sink path.
pub fn write(report: &GradeReport, path: &Path) -> Result<()> {
    std::fs::write(path, render(report))
        .with_context(|| format!("failed to write job summary to {}", path.display()))?;
    Ok(())
}
