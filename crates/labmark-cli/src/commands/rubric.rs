//! The `labmark rubric` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use labmark_core::model::{IMPLEMENTATION_MAX, SUBMISSION_MAX, TOTAL_MAX};
use labmark_core::tasks::RUBRIC;

/// Print the fixed rubric: how the 100 marks are allocated.
pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        "Part",
        "Completeness",
        "Correctness",
        "Quality",
        "Max",
    ]);

    table.add_row(vec![
        Cell::new("Submission timing"),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new(SUBMISSION_MAX),
    ]);
    for spec in &RUBRIC {
        table.add_row(vec![
            Cell::new(spec.label),
            Cell::new(spec.caps.completeness),
            Cell::new(spec.caps.correctness),
            Cell::new(spec.caps.quality),
            Cell::new(spec.caps.total()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Implementation total"),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(IMPLEMENTATION_MAX),
    ]);
    table.add_row(vec![
        Cell::new("Overall total"),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(TOTAL_MAX),
    ]);

    println!("{table}");
    Ok(())
}
