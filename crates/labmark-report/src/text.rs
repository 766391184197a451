//! The line-oriented console report.
//!
//! Section order is fixed: header, submission, implementation summary,
//! per-task breakdown, overall result.

use labmark_core::model::GradeReport;

/// Render the full console report.
pub fn render(report: &GradeReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("==============================================".into());
    lines.push(" SWE 363 – Lab 7-2 RESTful APIs: Grade Report".into());
    lines.push("==============================================".into());
    lines.push(String::new());

    lines.push(format!("Submission ({} marks)", report.submission.max));
    lines.push("---------------------".into());
    lines.push(format!(
        "Score: {} / {} {}",
        report.submission.score,
        report.submission.max,
        if report.submission.on_time {
            "(on time)"
        } else {
            "(late)"
        }
    ));
    if !report.submission.reason.is_empty() {
        lines.push(format!("Note: {}", report.submission.reason));
    }
    lines.push(String::new());

    lines.push(format!("Implementation ({} marks)", report.implementation_max));
    lines.push("-------------------------".into());
    lines.push(format!(
        "Raw implementation score:      {} / {}",
        report.implementation_raw, report.implementation_max
    ));
    if report.implementation_raw != report.implementation_adjusted {
        lines.push(format!(
            "Adjusted implementation score: {} / {} (flexible rules applied)",
            report.implementation_adjusted, report.implementation_max
        ));
    } else {
        lines.push(format!(
            "Adjusted implementation score: {} / {}",
            report.implementation_adjusted, report.implementation_max
        ));
    }
    lines.push(format!(
        "Tasks attempted: {} / {}",
        report.attempted_tasks,
        report.tasks.len()
    ));
    lines.push(format!(
        "Tasks fully correct: {} / {}",
        report.fully_correct_tasks,
        report.tasks.len()
    ));
    lines.push(String::new());

    for task in &report.tasks {
        lines.push(format!("Task {}: {}", task.id, task.label));
        lines.push(format!(
            "  Score: {} / {} (Completeness: {}, Correctness: {}, Quality: {})",
            task.score, task.max, task.completeness, task.correctness, task.quality
        ));
        if !task.details.is_empty() {
            lines.push("  Details:".into());
            for detail in &task.details {
                lines.push(format!("    - {detail}"));
            }
        }
        lines.push(String::new());
    }

    lines.push("Overall Result".into());
    lines.push("--------------".into());
    lines.push(format!(
        "Total score: {} / {} (Submission: {}, Implementation: {})",
        report.total, report.total_max, report.submission.score, report.implementation_adjusted
    ));
    lines.push(String::new());

    lines.join("\n")
}
