//! The `labmark run` command.
//!
//! Reads the submission snapshot, grades it, prints the console report, and
//! writes the optional sinks. This command is deliberately infallible:
//! every I/O failure downgrades to a logged fallback so the student always
//! sees a report and CI always sees exit code 0.

use comfy_table::{Cell, Table};
use tracing::{info, warn};

use labmark_core::sources::Sources;
use labmark_core::{aggregate, submission, tasks};
use labmark_report::{summary, text};

use crate::config::RunConfig;

pub fn execute(config: &RunConfig) {
    info!(lab_root = %config.lab_root.display(), "grading submission");

    let sources = Sources::load(&config.lab_root);
    let event = submission::load_event(config.event_path.as_deref());
    let timing = submission::evaluate(config.due_date.as_deref(), event.as_ref());
    let graded = tasks::grade_all(&sources);
    let report = aggregate::finalize(timing, graded);

    println!("{}", text::render(&report));
    print_summary_table(&report);

    if let Some(path) = &config.summary_path {
        match summary::write(&report, path) {
            Ok(()) => info!(path = %path.display(), "job summary written"),
            Err(err) => warn!(%err, "job summary could not be written"),
        }
    }

    if let Some(path) = &config.json_path {
        match report.save_json(path) {
            Ok(()) => info!(path = %path.display(), "JSON report written"),
            Err(err) => warn!(%err, "JSON report could not be written"),
        }
    }
}

fn print_summary_table(report: &labmark_core::model::GradeReport) {
    let mut table = Table::new();
    table.set_header(vec!["Part", "Score", "Max"]);

    table.add_row(vec![
        Cell::new(if report.submission.on_time {
            "Submission (on time)"
        } else {
            "Submission (late)"
        }),
        Cell::new(report.submission.score),
        Cell::new(report.submission.max),
    ]);
    for task in &report.tasks {
        table.add_row(vec![
            Cell::new(&task.label),
            Cell::new(task.score),
            Cell::new(task.max),
        ]);
    }
    table.add_row(vec![
        Cell::new("Implementation (adjusted)"),
        Cell::new(report.implementation_adjusted),
        Cell::new(report.implementation_max),
    ]);
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(report.total),
        Cell::new(report.total_max),
    ]);

    eprintln!("{table}");
}
