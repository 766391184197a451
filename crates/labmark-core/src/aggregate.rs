//! Combining task results and the submission check into a final report.
//!
//! The flexible-rounding policy is intentionally lenient: it exists so that
//! overlapping signals can never double-penalize a fully correct submission,
//! and so that any genuine attempt lands at or above the floor. The rules
//! apply in priority order; the first match wins.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::model::{
    GradeReport, SubmissionResult, TaskResult, ATTEMPT_FLOOR, IMPLEMENTATION_MAX, TOTAL_MAX,
};

/// Apply the flexible-rounding policy to a raw implementation sum.
///
/// Rules, first match wins:
/// 1. nothing attempted: 0
/// 2. every task fully correct: [`IMPLEMENTATION_MAX`]
/// 3. attempted but raw below [`ATTEMPT_FLOOR`]: the floor
/// 4. otherwise: the raw sum, unchanged
pub fn adjust_implementation(raw: u32, attempted: usize, fully_correct: usize, task_count: usize) -> u32 {
    let adjusted = if attempted == 0 {
        0
    } else if fully_correct == task_count {
        IMPLEMENTATION_MAX
    } else if raw < ATTEMPT_FLOOR {
        ATTEMPT_FLOOR
    } else {
        raw
    };
    adjusted.min(IMPLEMENTATION_MAX)
}

/// Fold the submission check and the six task results into a [`GradeReport`].
pub fn finalize(submission: SubmissionResult, tasks: Vec<TaskResult>) -> GradeReport {
    let implementation_raw: u32 = tasks.iter().map(|t| t.score).sum();
    let attempted_tasks = tasks.iter().filter(|t| t.is_attempted()).count();
    let fully_correct_tasks = tasks.iter().filter(|t| t.is_fully_correct()).count();

    let implementation_adjusted = adjust_implementation(
        implementation_raw,
        attempted_tasks,
        fully_correct_tasks,
        tasks.len(),
    );

    if implementation_adjusted != implementation_raw {
        debug!(
            raw = implementation_raw,
            adjusted = implementation_adjusted,
            "flexible rounding applied"
        );
    }

    let total = (submission.score + implementation_adjusted).min(TOTAL_MAX);

    GradeReport {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        submission,
        tasks,
        implementation_raw,
        implementation_adjusted,
        implementation_max: IMPLEMENTATION_MAX,
        attempted_tasks,
        fully_correct_tasks,
        total,
        total_max: TOTAL_MAX,
    }
}
